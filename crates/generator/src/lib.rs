//! # Synthetic Sales Generator
//!
//! Produces the transaction table the rest of the pipeline reports on. Each
//! column is sampled independently and uniformly, then the columns are zipped
//! row by row. A fixed seed makes the output reproducible: the same settings
//! always produce an identical table.

use chrono::{Days, NaiveDate};
use configuration::GeneratorSettings;
use core_types::{Product, Region, SalesTable, Transaction};
use rand::Rng;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

pub mod error;

pub use error::GeneratorError;

/// Quantity is drawn from `[1, 20)`.
pub const QUANTITY_RANGE: std::ops::Range<u32> = 1..20;

/// Unit price is drawn in whole cents from `[10.00, 100.00)`.
pub const UNIT_PRICE_CENTS_RANGE: std::ops::Range<i64> = 1_000..10_000;

/// Generates the default table: seed 0, 1000 rows, every day of 2023.
pub fn generate() -> Result<SalesTable, GeneratorError> {
    SalesGenerator::new(GeneratorSettings::default()).generate()
}

/// A deterministic generator for synthetic transactions.
#[derive(Debug, Clone)]
pub struct SalesGenerator {
    settings: GeneratorSettings,
}

impl SalesGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Draws every column in full, one after the other, then zips them.
    pub fn generate(&self) -> Result<SalesTable, GeneratorError> {
        let GeneratorSettings { seed, record_count, start_date, end_date } = self.settings;

        let day_span = end_date
            .signed_duration_since(start_date)
            .num_days();
        if day_span < 0 {
            return Err(GeneratorError::InvalidDateRange { start: start_date, end: end_date });
        }
        let day_count = day_span as u64 + 1;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let dates: Vec<NaiveDate> = (0..record_count)
            .map(|_| {
                let offset = rng.random_range(0..day_count);
                start_date
                    .checked_add_days(Days::new(offset))
                    .ok_or(GeneratorError::InvalidDateRange { start: start_date, end: end_date })
            })
            .collect::<Result<_, _>>()?;
        let products: Vec<Product> = (0..record_count)
            .map(|_| *Product::ALL.choose(&mut rng).unwrap_or(&Product::A))
            .collect();
        let quantities: Vec<u32> = (0..record_count)
            .map(|_| rng.random_range(QUANTITY_RANGE))
            .collect();
        let unit_prices: Vec<Decimal> = (0..record_count)
            .map(|_| Decimal::new(rng.random_range(UNIT_PRICE_CENTS_RANGE), 2))
            .collect();
        let regions: Vec<Region> = (0..record_count)
            .map(|_| *Region::ALL.choose(&mut rng).unwrap_or(&Region::North))
            .collect();

        let records = dates
            .into_iter()
            .zip(products)
            .zip(quantities)
            .zip(unit_prices)
            .zip(regions)
            .map(|((((date, product), quantity), unit_price), region)| {
                Transaction::new(date, product, quantity, unit_price, region)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            seed,
            rows = records.len(),
            from = %start_date,
            to = %end_date,
            "Generated synthetic sales table"
        );

        Ok(SalesTable::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_table_has_1000_rows_within_bounds() {
        let table = generate().unwrap();
        assert_eq!(table.len(), 1000);

        let ten = Decimal::new(10, 0);
        let hundred = Decimal::new(100, 0);
        for tx in &table {
            assert!(QUANTITY_RANGE.contains(&tx.quantity), "quantity {}", tx.quantity);
            assert!(tx.unit_price >= ten && tx.unit_price < hundred, "price {}", tx.unit_price);
            assert_eq!(tx.unit_price.scale(), 2);
            assert_eq!(tx.total(), Decimal::from(tx.quantity) * tx.unit_price);
            assert_eq!(tx.date.format("%Y").to_string(), "2023");
            assert!(Product::ALL.contains(&tx.product));
            assert!(Region::ALL.contains(&tx.region));
        }
    }

    #[test]
    fn same_seed_same_table() {
        assert_eq!(generate().unwrap(), generate().unwrap());
    }

    #[test]
    fn different_seed_different_table() {
        let other = SalesGenerator::new(GeneratorSettings { seed: 7, ..Default::default() })
            .generate()
            .unwrap();
        assert_ne!(generate().unwrap(), other);
    }

    #[test]
    fn every_category_and_month_is_drawn() {
        let table = generate().unwrap();
        let products: HashSet<_> = table.iter().map(|tx| tx.product).collect();
        let regions: HashSet<_> = table.iter().map(|tx| tx.region).collect();
        let months: HashSet<_> = table.iter().map(|tx| tx.month()).collect();
        assert_eq!(products.len(), 4);
        assert_eq!(regions.len(), 4);
        assert_eq!(months.len(), 12);
    }

    #[test]
    fn single_day_range_pins_every_date() {
        let day = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
        let table = SalesGenerator::new(GeneratorSettings {
            record_count: 25,
            start_date: day,
            end_date: day,
            ..Default::default()
        })
        .generate()
        .unwrap();
        assert_eq!(table.len(), 25);
        assert!(table.iter().all(|tx| tx.date == day));
    }

    #[test]
    fn zero_rows_yields_empty_table() {
        let table = SalesGenerator::new(GeneratorSettings { record_count: 0, ..Default::default() })
            .generate()
            .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn inverted_range_is_an_error() {
        let err = SalesGenerator::new(GeneratorSettings {
            start_date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            ..Default::default()
        })
        .generate()
        .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidDateRange { .. }));
    }
}
