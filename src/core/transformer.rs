use crate::core::normalize::{
    format_date, format_year, normalize_phone, parse_currency, parse_year, proper_case,
};
use crate::domain::columns::ColumnMap;
use crate::domain::model::{DropReason, FilterConfig, InputRow, OutputRecord, TransformResult};

/// Applies the keep/drop rules and the output reshaping to quote export rows.
#[derive(Debug, Clone, Default)]
pub struct RowTransformer {
    config: FilterConfig,
    columns: ColumnMap,
}

impl RowTransformer {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            columns: ColumnMap::default(),
        }
    }

    pub fn with_columns(config: FilterConfig, columns: ColumnMap) -> Self {
        Self { config, columns }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn trimmed(&self, row: &InputRow, column: &str) -> String {
        row.get(column).map(str::trim).unwrap_or_default().to_string()
    }

    /// `CustomerFirstName`, else the first word of `CustomerName`.
    ///
    /// The fallback applies only when the first-name cell is absent or empty;
    /// a whitespace-only cell is used as is and cases to `""`.
    pub fn first_name(&self, row: &InputRow) -> String {
        let raw = row
            .get(&self.columns.customer_first_name)
            .filter(|v| !v.is_empty())
            .or_else(|| {
                row.get(&self.columns.customer_name)
                    .and_then(|name| name.split_whitespace().next())
            });
        proper_case(raw)
    }

    pub fn choose_phone(&self, row: &InputRow) -> Option<String> {
        self.columns
            .phone_priority()
            .into_iter()
            .find_map(|column| normalize_phone(row.get(column)))
    }

    /// Returns the first rule the row breaks, or `None` when it is kept.
    pub fn evaluate(&self, row: &InputRow) -> Option<DropReason> {
        if self.first_name(row).is_empty() {
            return Some(DropReason::MissingFirstName);
        }

        if let Some(year) = parse_year(row.get(&self.columns.trade_year)) {
            if year > self.config.max_year {
                return Some(DropReason::TradeYearTooNew);
            }
        }

        if let Some(equity) = parse_currency(row.get(&self.columns.trade_equity)) {
            if equity < self.config.min_equity {
                return Some(DropReason::EquityTooNegative);
            }
        }

        if self.choose_phone(row).is_none() {
            return Some(DropReason::NoUsablePhone);
        }

        None
    }

    pub fn should_keep(&self, row: &InputRow) -> bool {
        self.evaluate(row).is_none()
    }

    pub fn transform(&self, row: &InputRow) -> OutputRecord {
        let columns = &self.columns;
        OutputRecord {
            phone_number: self.choose_phone(row).unwrap_or_default(),
            customer: self.first_name(row),
            last_name: proper_case(row.get(&columns.customer_last_name)),
            purchase_date: format_date(row.get(&columns.trade_purchase_date)),
            year: format_year(row.get(&columns.trade_year)),
            model: self.trimmed(row, &columns.trade_model),
            vin: self.trimmed(row, &columns.trade_vin),
            miles: self.trimmed(row, &columns.trade_mileage),
            payoff: self.trimmed(row, &columns.trade_payoff),
            payment: self.trimmed(row, &columns.trade_monthly_payment),
        }
    }

    /// Filters and reshapes a whole export, preserving row order.
    pub fn run<'a, I>(&self, rows: I) -> TransformResult
    where
        I: IntoIterator<Item = &'a InputRow>,
    {
        let mut result = TransformResult::default();

        for (index, row) in rows.into_iter().enumerate() {
            if row.is_empty() {
                tracing::debug!("Skipping empty row {}", index + 1);
                continue;
            }

            match self.evaluate(row) {
                None => {
                    result.records.push(self.transform(row));
                    result.kept_count += 1;
                }
                Some(reason) => {
                    tracing::debug!("Dropping row {}: {}", index + 1, reason);
                    *result.drop_reasons.entry(reason).or_insert(0) += 1;
                    result.dropped_count += 1;
                }
            }
        }

        result
    }
}
