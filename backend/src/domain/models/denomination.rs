//! Domain model for the denomination reference catalog.
use std::collections::HashMap;

/// Tolerance used when matching a client-supplied face value against the catalog.
pub const VALUE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Denomination {
    pub id: i64,
    pub value: f64,
}

/// Point-in-time copy of the reference catalog.
///
/// Every line of one statement is priced from the same snapshot, so a single
/// write never mixes prices from two different reads of the catalog.
#[derive(Debug, Clone, Default)]
pub struct DenominationCatalog {
    values_by_id: HashMap<i64, f64>,
}

impl DenominationCatalog {
    pub fn from_denominations(denominations: &[Denomination]) -> Self {
        let values_by_id = denominations.iter().map(|d| (d.id, d.value)).collect();
        Self { values_by_id }
    }

    pub fn value_of(&self, denomination_id: i64) -> Option<f64> {
        self.values_by_id.get(&denomination_id).copied()
    }

    /// Resolve a face value to a denomination id.
    ///
    /// Values are not unique in the catalog; when several ids share a value the
    /// lowest id wins so the choice is stable across calls.
    pub fn id_for_value(&self, value: f64) -> Option<i64> {
        self.values_by_id
            .iter()
            .filter(|(_, v)| (**v - value).abs() < VALUE_EPSILON)
            .map(|(id, _)| *id)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> DenominationCatalog {
        DenominationCatalog::from_denominations(&[
            Denomination { id: 1, value: 100.0 },
            Denomination { id: 2, value: 0.25 },
            Denomination { id: 7, value: 100.0 },
        ])
    }

    #[test]
    fn test_value_of() {
        let catalog = catalog();
        assert_eq!(catalog.value_of(2), Some(0.25));
        assert_eq!(catalog.value_of(999), None);
        assert_eq!(catalog.value_of(7), Some(100.0));
    }

    #[test]
    fn test_id_for_value_prefers_lowest_id() {
        let catalog = catalog();
        assert_eq!(catalog.id_for_value(100.0), Some(1));
        assert_eq!(catalog.id_for_value(0.25), Some(2));
        assert_eq!(catalog.id_for_value(3.0), None);
    }
}
