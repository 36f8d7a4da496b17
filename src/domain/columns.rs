use serde::{Deserialize, Serialize};

/// Header names of the dealership quote export.
///
/// The defaults match the export as shipped; any of them can be renamed from
/// the `[columns]` table of the TOML config when the export drifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMap {
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_name: String,
    pub customer_voice_phone: String,
    pub customer_text_phone: String,
    pub customer_mobile_phone: String,
    pub customer_home_phone: String,
    pub customer_work_phone: String,
    pub trade_year: String,
    pub trade_model: String,
    pub trade_vin: String,
    pub trade_mileage: String,
    pub trade_payoff: String,
    pub trade_monthly_payment: String,
    pub trade_purchase_date: String,
    pub trade_equity: String,
}

pub const RECOGNIZED_COLUMNS: [&str; 16] = [
    "CustomerFirstName",
    "CustomerLastName",
    "CustomerName",
    "CustomerVoicePhone",
    "CustomerTextPhone",
    "CustomerMobilePhone",
    "CustomerHomePhone",
    "CustomerWorkPhone",
    "TradeYear",
    "TradeModel",
    "TradeVIN",
    "TradeMileage",
    "TradePayoff",
    "TradeMonthlyPayment",
    "TradePurchaseDate",
    "TradeEquity",
];

impl Default for ColumnMap {
    fn default() -> Self {
        let [customer_first_name, customer_last_name, customer_name, customer_voice_phone, customer_text_phone, customer_mobile_phone, customer_home_phone, customer_work_phone, trade_year, trade_model, trade_vin, trade_mileage, trade_payoff, trade_monthly_payment, trade_purchase_date, trade_equity] =
            RECOGNIZED_COLUMNS.map(str::to_string);

        Self {
            customer_first_name,
            customer_last_name,
            customer_name,
            customer_voice_phone,
            customer_text_phone,
            customer_mobile_phone,
            customer_home_phone,
            customer_work_phone,
            trade_year,
            trade_model,
            trade_vin,
            trade_mileage,
            trade_payoff,
            trade_monthly_payment,
            trade_purchase_date,
            trade_equity,
        }
    }
}

impl ColumnMap {
    /// Phone columns in lookup priority; the first usable number wins.
    pub fn phone_priority(&self) -> [&str; 5] {
        [
            self.customer_voice_phone.as_str(),
            self.customer_text_phone.as_str(),
            self.customer_mobile_phone.as_str(),
            self.customer_home_phone.as_str(),
            self.customer_work_phone.as_str(),
        ]
    }

    pub fn recognized(&self) -> [(&'static str, &str); 16] {
        [
            ("customer_first_name", self.customer_first_name.as_str()),
            ("customer_last_name", self.customer_last_name.as_str()),
            ("customer_name", self.customer_name.as_str()),
            ("customer_voice_phone", self.customer_voice_phone.as_str()),
            ("customer_text_phone", self.customer_text_phone.as_str()),
            ("customer_mobile_phone", self.customer_mobile_phone.as_str()),
            ("customer_home_phone", self.customer_home_phone.as_str()),
            ("customer_work_phone", self.customer_work_phone.as_str()),
            ("trade_year", self.trade_year.as_str()),
            ("trade_model", self.trade_model.as_str()),
            ("trade_vin", self.trade_vin.as_str()),
            ("trade_mileage", self.trade_mileage.as_str()),
            ("trade_payoff", self.trade_payoff.as_str()),
            ("trade_monthly_payment", self.trade_monthly_payment.as_str()),
            ("trade_purchase_date", self.trade_purchase_date.as_str()),
            ("trade_equity", self.trade_equity.as_str()),
        ]
    }

    /// Recognised columns absent from a parsed header row.
    pub fn missing_from<'a>(&'a self, headers: &[String]) -> Vec<&'a str> {
        self.recognized()
            .into_iter()
            .map(|(_, column)| column)
            .filter(|column| !headers.iter().any(|h| h.as_str() == *column))
            .collect()
    }
}
