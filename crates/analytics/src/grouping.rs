use crate::error::AnalyticsError;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;

/// Values partitioned by key, with keys kept in the order they were first seen.
#[derive(Debug, Clone)]
pub struct Groups<K> {
    groups: Vec<(K, Vec<Decimal>)>,
}

impl<K: Eq + Hash + Clone> Groups<K> {
    /// Partitions `items` by `key_fn`, collecting `value_fn` for each item.
    pub fn collect<I, T, FK, FV>(items: I, key_fn: FK, value_fn: FV) -> Self
    where
        I: IntoIterator<Item = T>,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> Decimal,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<(K, Vec<Decimal>)> = Vec::new();

        for item in items {
            let key = key_fn(&item);
            let value = value_fn(&item);
            match index.get(&key) {
                Some(&slot) => groups[slot].1.push(value),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((key, vec![value]));
                }
            }
        }

        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    /// The raw values of every group, in key order.
    pub fn values(&self) -> impl Iterator<Item = (&K, &[Decimal])> {
        self.groups.iter().map(|(key, values)| (key, values.as_slice()))
    }

    pub fn sums(&self) -> Result<Vec<(K, Decimal)>, AnalyticsError> {
        self.groups
            .iter()
            .map(|(key, values)| Ok((key.clone(), checked_sum(values, "group sum")?)))
            .collect()
    }

    pub fn means(&self) -> Result<Vec<(K, Decimal)>, AnalyticsError> {
        self.groups
            .iter()
            .map(|(key, values)| {
                let sum = checked_sum(values, "group mean")?;
                let mean = checked_mean(sum, values.len(), "group mean")?;
                Ok((key.clone(), mean))
            })
            .collect()
    }
}

/// Sorts by value, largest first. The sort is stable, so equal values keep
/// their existing relative order.
pub fn sort_descending<K>(entries: &mut [(K, Decimal)]) {
    entries.sort_by(|a, b| b.1.cmp(&a.1));
}

pub(crate) fn checked_sum(values: &[Decimal], metric: &str) -> Result<Decimal, AnalyticsError> {
    values.iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(*v)
            .ok_or_else(|| AnalyticsError::Overflow(metric.to_string()))
    })
}

pub(crate) fn checked_mean(sum: Decimal, count: usize, metric: &str) -> Result<Decimal, AnalyticsError> {
    if count == 0 {
        return Err(AnalyticsError::DivisionByZero(metric.to_string()));
    }
    sum.checked_div(Decimal::from(count))
        .ok_or_else(|| AnalyticsError::Overflow(metric.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn keys_keep_first_seen_order() {
        let data = [("b", dec!(1)), ("a", dec!(2)), ("b", dec!(3)), ("c", dec!(4)), ("a", dec!(5))];
        let groups = Groups::collect(data.iter(), |(k, _)| *k, |(_, v)| *v);

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(
            groups.sums().unwrap(),
            vec![("b", dec!(4)), ("a", dec!(7)), ("c", dec!(4))]
        );
        assert_eq!(
            groups.means().unwrap(),
            vec![("b", dec!(2)), ("a", dec!(3.5)), ("c", dec!(4))]
        );
    }

    #[test]
    fn descending_sort_keeps_ties_in_place() {
        let mut entries = vec![("x", dec!(1)), ("y", dec!(5)), ("z", dec!(1)), ("w", dec!(5))];
        sort_descending(&mut entries);
        assert_eq!(entries, vec![("y", dec!(5)), ("w", dec!(5)), ("x", dec!(1)), ("z", dec!(1))]);
    }

    #[test]
    fn mean_of_nothing_is_an_error() {
        assert_eq!(
            checked_mean(Decimal::ZERO, 0, "avg"),
            Err(AnalyticsError::DivisionByZero("avg".to_string()))
        );
    }

    #[test]
    fn overflow_is_reported() {
        let err = checked_sum(&[Decimal::MAX, Decimal::ONE], "total").unwrap_err();
        assert_eq!(err, AnalyticsError::Overflow("total".to_string()));
    }
}
