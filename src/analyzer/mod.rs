// Analyzer module: matching of search queries against extracted model groups.

pub mod matcher;

pub use matcher::{MatchEngine, SubstringMatcher};
