use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// One row of the orders export, as it appears on disk. `order_datetime` is
/// kept as text because the export mixes full timestamps and bare dates.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderRow {
    pub order_datetime: String,
    pub city: String,
    pub order_value: f64,
    pub delivery_time_min: f64,
    pub delivery_fee: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub promo_code_used: Option<String>,
    #[serde(default)]
    pub restaurant_category: Option<String>,
}

/// A single delivery order with its timestamp collapsed to the calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_date: NaiveDate,
    pub city: String,
    pub order_value: f64,
    pub delivery_time_min: f64,
    pub delivery_fee: f64,
    pub payment_method: Option<String>,
    pub promo_code_used: Option<String>,
    pub restaurant_category: Option<String>,
}

impl OrderRecord {
    /// Zero-value orders are promotions or cancellations, negative times and
    /// fees are entry errors. Flagged rows stay in the dataset.
    pub fn is_flagged(&self) -> bool {
        self.order_value == 0.0 || self.delivery_time_min < 0.0 || self.delivery_fee < 0.0
    }
}

impl TryFrom<RawOrderRow> for OrderRecord {
    type Error = AnalysisError;

    fn try_from(raw: RawOrderRow) -> Result<Self> {
        let order_date = parse_order_date(&raw.order_datetime)?;

        Ok(Self {
            order_date,
            city: raw.city,
            order_value: raw.order_value,
            delivery_time_min: raw.delivery_time_min,
            delivery_fee: raw.delivery_fee,
            payment_method: raw.payment_method,
            promo_code_used: raw.promo_code_used,
            restaurant_category: raw.restaurant_category,
        })
    }
}

/// Parse the `order_datetime` column. Accepts `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD`.
pub fn parse_order_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.date());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AnalysisError::InvalidFormat(format!("Invalid order_datetime: '{}'", value))
    })
}
