use crate::enums::{Product, Region};
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single synthetic sale.
///
/// `total` and `month` are derived on every call rather than stored, so they can
/// never drift from the fields they are computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub product: Product,
    pub quantity: u32,
    /// Always carries exactly two decimal places.
    pub unit_price: Decimal,
    pub region: Region,
}

impl Transaction {
    /// Builds a transaction, normalizing `unit_price` to two decimal places.
    pub fn new(
        date: NaiveDate,
        product: Product,
        quantity: u32,
        unit_price: Decimal,
        region: Region,
    ) -> Result<Self, CoreError> {
        if quantity == 0 {
            return Err(CoreError::InvalidInput(
                "quantity".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        if unit_price.is_sign_negative() {
            return Err(CoreError::InvalidInput(
                "unit_price".to_string(),
                format!("must not be negative, got {unit_price}"),
            ));
        }

        let mut unit_price = unit_price.round_dp(2);
        unit_price.rescale(2);

        Ok(Self { date, product, quantity, unit_price, region })
    }

    /// `quantity * unit_price`, exact.
    pub fn total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }

    /// The calendar month of the sale as `YYYY-MM`.
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// The immutable transaction table handed from the generator to every later stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTable {
    records: Vec<Transaction>,
}

impl SalesTable {
    pub fn new(records: Vec<Transaction>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a SalesTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
