//! The derivation layer: computing the currently visible clause subset.
//!
//! Pure and cheap enough to run on every keystroke and every render.

use shared_types::{Clause, RiskLevel};

/// Which risk band the clause list is narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskFilter {
    #[default]
    All,
    Only(RiskLevel),
}

impl RiskFilter {
    /// Parse a filter from its button name (`all`, `high`, `medium`, `safe`).
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("all") {
            return Some(RiskFilter::All);
        }
        RiskLevel::parse(s).map(RiskFilter::Only)
    }

    /// Element-id suffix of the matching filter button.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFilter::All => "all",
            RiskFilter::Only(level) => level.css_class(),
        }
    }

    pub fn matches(&self, clause: &Clause) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::Only(level) => clause.risk == *level,
        }
    }
}

/// The filtered view: clauses matching the active risk filter and the
/// search text, in document order.
///
/// `query` must already be lower-cased and trimmed; the controller
/// normalizes it once per keystroke so this stays allocation-light.
pub fn filtered_clauses<'a>(
    clauses: &'a [Clause],
    filter: RiskFilter,
    query: &str,
) -> Vec<&'a Clause> {
    clauses
        .iter()
        .filter(|clause| filter.matches(clause) && matches_query(clause, query))
        .collect()
}

fn matches_query(clause: &Clause, query: &str) -> bool {
    query.is_empty()
        || clause.clause_type.to_lowercase().contains(query)
        || clause.original.to_lowercase().contains(query)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn clause_strategy() -> impl Strategy<Value = (String, RiskLevel, String)> {
        (
            prop_oneof![
                Just("Termination".to_string()),
                Just("Payment".to_string()),
                Just("Deposit".to_string()),
                "[a-z]{1,8}",
            ],
            prop_oneof![
                Just(RiskLevel::High),
                Just(RiskLevel::Medium),
                Just(RiskLevel::Safe)
            ],
            "[a-z ]{0,20}",
        )
    }

    fn clauses_strategy() -> impl Strategy<Value = Vec<Clause>> {
        prop::collection::vec(clause_strategy(), 0..24).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (clause_type, risk, original))| Clause {
                    id: i as u32 + 1,
                    clause_type,
                    risk,
                    original,
                    explanation: "وضاحت".to_string(),
                    note: None,
                })
                .collect()
        })
    }

    fn filter_strategy() -> impl Strategy<Value = RiskFilter> {
        prop_oneof![
            Just(RiskFilter::All),
            Just(RiskFilter::Only(RiskLevel::High)),
            Just(RiskFilter::Only(RiskLevel::Medium)),
            Just(RiskFilter::Only(RiskLevel::Safe)),
        ]
    }

    proptest! {
        /// The filtered view is an order-preserving subsequence of the input.
        #[test]
        fn filtered_is_a_subsequence(clauses in clauses_strategy(), filter in filter_strategy(), query in "[a-z]{0,4}") {
            let result = filtered_clauses(&clauses, filter, &query);
            let mut cursor = 0usize;
            for kept in &result {
                let position = clauses[cursor..]
                    .iter()
                    .position(|c| c.id == kept.id)
                    .expect("kept clause must come from the input");
                cursor += position + 1;
            }
        }

        /// Exactly the clauses matching the predicate are kept.
        #[test]
        fn filtered_matches_predicate_exactly(clauses in clauses_strategy(), filter in filter_strategy(), query in "[a-z]{0,4}") {
            let result = filtered_clauses(&clauses, filter, &query);
            let kept: Vec<u32> = result.iter().map(|c| c.id).collect();
            for clause in &clauses {
                let matches = filter.matches(clause)
                    && (query.is_empty()
                        || clause.clause_type.to_lowercase().contains(&query)
                        || clause.original.to_lowercase().contains(&query));
                prop_assert_eq!(matches, kept.contains(&clause.id));
            }
        }

        /// Derivation never mutates its input and is stable across calls.
        #[test]
        fn filtered_is_deterministic(clauses in clauses_strategy(), filter in filter_strategy(), query in "[a-z]{0,4}") {
            let first: Vec<u32> = filtered_clauses(&clauses, filter, &query).iter().map(|c| c.id).collect();
            let second: Vec<u32> = filtered_clauses(&clauses, filter, &query).iter().map(|c| c.id).collect();
            prop_assert_eq!(first, second);
        }
    }
}
