//! Free-text and state filtering plus criticality sorting

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use shared::{ClassifiedProduct, StockState};

/// Search text and optional state selection, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub state: Option<StockState>,
}

impl FilterCriteria {
    pub fn new(query: impl Into<String>, state: Option<StockState>) -> Self {
        Self {
            query: query.into(),
            state,
        }
    }

    /// Lowercased, trimmed query; `None` when it matches everything
    fn needle(&self) -> Option<String> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    pub fn matches(&self, product: &ClassifiedProduct) -> bool {
        self.matches_text(product, self.needle().as_deref()) && self.matches_state(product)
    }

    fn matches_text(&self, product: &ClassifiedProduct, needle: Option<&str>) -> bool {
        match needle {
            None => true,
            Some(needle) => {
                product.record.description.to_lowercase().contains(needle)
                    || product.record.code.to_lowercase().contains(needle)
            }
        }
    }

    fn matches_state(&self, product: &ClassifiedProduct) -> bool {
        match self.state {
            None => true,
            Some(selected) => product.state == Some(selected),
        }
    }
}

/// Products satisfying the criteria, in their original relative order
pub fn filter_products(products: &[ClassifiedProduct], criteria: &FilterCriteria) -> Vec<ClassifiedProduct> {
    let needle = criteria.needle();
    products
        .iter()
        .filter(|p| criteria.matches_text(p, needle.as_deref()) && criteria.matches_state(p))
        .cloned()
        .collect()
}

/// Display ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirective {
    /// Keep the order the data source returned
    #[default]
    Source,
    /// Most critical first; unclassified last
    Criticality,
}

impl FromStr for SortDirective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "source" => Ok(SortDirective::Source),
            "criticality" | "state" => Ok(SortDirective::Criticality),
            other => Err(format!("unknown sort '{other}' (expected source or criticality)")),
        }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirective::Source => write!(f, "source"),
            SortDirective::Criticality => write!(f, "criticality"),
        }
    }
}

/// Stable in-place sort
pub fn sort_products(products: &mut [ClassifiedProduct], directive: SortDirective) {
    match directive {
        SortDirective::Source => {}
        SortDirective::Criticality => products.sort_by_key(ClassifiedProduct::rank),
    }
}

/// States present in the input, in criticality order
pub fn distinct_states(products: &[ClassifiedProduct]) -> Vec<StockState> {
    StockState::ALL
        .into_iter()
        .filter(|state| products.iter().any(|p| p.state == Some(*state)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ProductRecord;

    fn product(code: &str, description: &str, state: Option<StockState>) -> ClassifiedProduct {
        ClassifiedProduct::new(ProductRecord::new(code, description, 1.0, 0.0, 0.0), state)
    }

    fn codes(products: &[ClassifiedProduct]) -> Vec<&str> {
        products.iter().map(|p| p.record.code.as_str()).collect()
    }

    fn sample() -> Vec<ClassifiedProduct> {
        vec![
            product("ABC123", "Copper cable", Some(StockState::Normal)),
            product("XYZ999", "other", Some(StockState::Critical)),
            product("CAB-7", "Aluminium CABLE", Some(StockState::Critical)),
            product("NOSTATE", "Mystery", None),
        ]
    }

    #[test]
    fn test_query_is_case_insensitive_on_code() {
        let result = filter_products(&sample(), &FilterCriteria::new("abc", None));
        assert_eq!(codes(&result), vec!["ABC123"]);
    }

    #[test]
    fn test_query_matches_description_and_is_trimmed() {
        let result = filter_products(&sample(), &FilterCriteria::new("  cable ", None));
        assert_eq!(codes(&result), vec!["ABC123", "CAB-7"]);
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let result = filter_products(&sample(), &FilterCriteria::new("   ", None));
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_query_and_state_combine_with_and() {
        let result = filter_products(&sample(), &FilterCriteria::new("cable", Some(StockState::Critical)));
        assert_eq!(codes(&result), vec!["CAB-7"]);

        let none = filter_products(&sample(), &FilterCriteria::new("abc", Some(StockState::Critical)));
        assert!(none.is_empty());
    }

    #[test]
    fn test_state_filter_excludes_unclassified() {
        for state in StockState::ALL {
            let result = filter_products(&sample(), &FilterCriteria::new("", Some(state)));
            assert!(result.iter().all(|p| p.state == Some(state)));
        }
    }

    #[test]
    fn test_criticality_sort_is_stable() {
        let mut products = vec![
            product("N1", "", Some(StockState::Normal)),
            product("U1", "", None),
            product("C1", "", Some(StockState::Critical)),
            product("O1", "", Some(StockState::Overstock)),
            product("C2", "", Some(StockState::Critical)),
            product("W1", "", Some(StockState::Caution)),
        ];

        sort_products(&mut products, SortDirective::Criticality);
        assert_eq!(codes(&products), vec!["C1", "C2", "W1", "N1", "O1", "U1"]);
    }

    #[test]
    fn test_source_sort_keeps_order() {
        let mut products = sample();
        sort_products(&mut products, SortDirective::Source);
        assert_eq!(codes(&products), codes(&sample()));
    }

    #[test]
    fn test_distinct_states_in_rank_order() {
        assert_eq!(distinct_states(&sample()), vec![StockState::Critical, StockState::Normal]);
        assert!(distinct_states(&[]).is_empty());
    }

    #[test]
    fn test_sort_directive_parsing() {
        assert_eq!("".parse::<SortDirective>().unwrap(), SortDirective::Source);
        assert_eq!("Criticality".parse::<SortDirective>().unwrap(), SortDirective::Criticality);
        assert!("price".parse::<SortDirective>().is_err());
    }
}
