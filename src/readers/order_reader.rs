use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::models::{OrderRecord, RawOrderRow};

/// Loads the orders CSV into memory, preserving row order.
pub struct OrderReader {
    trim_fields: bool,
}

impl OrderReader {
    pub fn new() -> Self {
        Self { trim_fields: true }
    }

    /// Read all order records from a CSV file.
    ///
    /// The file must carry the header row
    /// `order_datetime,city,order_value,delivery_time_min,delivery_fee` (the
    /// optional `payment_method`, `promo_code_used` and `restaurant_category`
    /// columns are picked up when present). A missing file, a wrong column
    /// count or an unparsable field aborts the load; a file with no data rows
    /// is also an error since there is nothing to analyze.
    pub fn read_orders(&self, path: &Path) -> Result<Vec<OrderRecord>> {
        let file = File::open(path).map_err(|e| {
            AnalysisError::Io(std::io::Error::new(
                e.kind(),
                format!("cannot open '{}': {}", path.display(), e),
            ))
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(if self.trim_fields {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(file);

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let raw: RawOrderRow = result?;
            records.push(OrderRecord::try_from(raw)?);
        }

        if records.is_empty() {
            return Err(AnalysisError::EmptyDataset(path.to_path_buf()));
        }

        debug!(rows = records.len(), path = %path.display(), "orders loaded");
        Ok(records)
    }
}

impl Default for OrderReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_orders_core_columns() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            "order_datetime,city,order_value,delivery_time_min,delivery_fee"
        )?;
        writeln!(temp_file, "2024-03-01 12:15:00,Dubai,45.50,28,7.5")?;
        writeln!(temp_file, "2024-03-02 19:05:30,Sharjah,0,32,6.0")?;

        let reader = OrderReader::new();
        let records = reader.read_orders(temp_file.path())?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].city, "Dubai");
        assert_eq!(records[0].order_date.to_string(), "2024-03-01");
        assert_eq!(records[0].order_value, 45.5);
        assert_eq!(records[1].order_value, 0.0);
        assert!(records[1].is_flagged());
        assert!(records[0].payment_method.is_none());

        Ok(())
    }

    #[test]
    fn test_read_orders_full_columns() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            "order_datetime,city,order_value,delivery_time_min,delivery_fee,\
             payment_method,promo_code_used,restaurant_category"
        )?;
        writeln!(
            temp_file,
            "2024-03-01 12:15:00,Abu Dhabi,88.25,41,9.0,Card,Yes,Burgers"
        )?;

        let reader = OrderReader::new();
        let records = reader.read_orders(temp_file.path())?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payment_method.as_deref(), Some("Card"));
        assert_eq!(records[0].promo_code_used.as_deref(), Some("Yes"));
        assert_eq!(records[0].restaurant_category.as_deref(), Some("Burgers"));

        Ok(())
    }

    #[test]
    fn test_read_orders_missing_file() {
        let reader = OrderReader::new();
        let result = reader.read_orders(Path::new("no_such_orders.csv"));
        assert!(matches!(result, Err(AnalysisError::Io(_))));
    }

    #[test]
    fn test_read_orders_wrong_column_count() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            "order_datetime,city,order_value,delivery_time_min,delivery_fee"
        )?;
        writeln!(temp_file, "2024-03-01 12:15:00,Dubai,45.50")?;

        let reader = OrderReader::new();
        assert!(reader.read_orders(temp_file.path()).is_err());

        Ok(())
    }

    #[test]
    fn test_read_orders_empty_dataset() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            "order_datetime,city,order_value,delivery_time_min,delivery_fee"
        )?;

        let reader = OrderReader::new();
        let result = reader.read_orders(temp_file.path());
        assert!(matches!(result, Err(AnalysisError::EmptyDataset(_))));

        Ok(())
    }
}
