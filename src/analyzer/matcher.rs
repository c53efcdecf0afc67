use crate::model::{MatchOutcome, ModelGroup};
use crate::normalizer::normalize_text;

/// Interface for matching a query against extracted model groups.
pub trait MatchEngine {
    fn match_groups(&self, groups: &[ModelGroup], query: &str) -> MatchOutcome;
}

/// Case-insensitive substring matcher.
pub struct SubstringMatcher;

impl SubstringMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SubstringMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchEngine for SubstringMatcher {
    /// Every hit lands in `matches` (no dedup); a group is returned once if any of its models hit.
    fn match_groups(&self, groups: &[ModelGroup], query: &str) -> MatchOutcome {
        let needle = normalize_text(query);
        let mut outcome = MatchOutcome::default();

        for group in groups {
            let hits: Vec<&String> = group
                .iter()
                .filter(|model| normalize_text(model).contains(&needle))
                .collect();

            if !hits.is_empty() {
                outcome.matches.extend(hits.into_iter().cloned());
                outcome.groups.push(group.clone());
            }
        }

        outcome
    }
}
