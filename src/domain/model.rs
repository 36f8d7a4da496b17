use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const OUTPUT_HEADERS: [&str; 10] = [
    "phone_number",
    "Customer",
    "Last Name",
    "Purchase Date",
    "Year",
    "Model",
    "VIN",
    "Miles",
    "Payoff",
    "Payment",
];

/// One data row of the quote export, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRow {
    pub data: HashMap<String, String>,
}

impl InputRow {
    pub fn new(data: HashMap<String, String>) -> Self {
        Self { data }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.data.get(column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InputRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A row of the Previous Service file, always in `OUTPUT_HEADERS` order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub phone_number: String,
    pub customer: String,
    pub last_name: String,
    pub purchase_date: String,
    pub year: String,
    pub model: String,
    pub vin: String,
    pub miles: String,
    pub payoff: String,
    pub payment: String,
}

impl OutputRecord {
    pub fn fields(&self) -> [&str; 10] {
        [
            self.phone_number.as_str(),
            self.customer.as_str(),
            self.last_name.as_str(),
            self.purchase_date.as_str(),
            self.year.as_str(),
            self.model.as_str(),
            self.vin.as_str(),
            self.miles.as_str(),
            self.payoff.as_str(),
            self.payment.as_str(),
        ]
    }
}

pub const DEFAULT_MAX_YEAR: i64 = 2024;
pub const DEFAULT_MIN_EQUITY: f64 = -6000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub max_year: i64,
    pub min_equity: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_year: DEFAULT_MAX_YEAR,
            min_equity: DEFAULT_MIN_EQUITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingFirstName,
    TradeYearTooNew,
    EquityTooNegative,
    NoUsablePhone,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DropReason::MissingFirstName => "no customer first name",
            DropReason::TradeYearTooNew => "trade year newer than max year",
            DropReason::EquityTooNegative => "trade equity below minimum",
            DropReason::NoUsablePhone => "no usable phone number",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformResult {
    pub records: Vec<OutputRecord>,
    pub kept_count: usize,
    pub dropped_count: usize,
    pub drop_reasons: BTreeMap<DropReason, usize>,
}

/// What a finished run reports back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub kept_count: usize,
    pub dropped_count: usize,
    pub drop_reasons: BTreeMap<DropReason, usize>,
    pub output_path: Option<String>,
}
