//! Construction parameters for state space trees.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration shared by [`GameTree`](crate::tictactoe::GameTree) and
/// [`NaiveTree`](crate::tictactoe::NaiveTree).
///
/// # Examples
///
/// ```
/// use tictactoe_space::TreeConfig;
///
/// let config = TreeConfig::default().with_filter_transforms(false);
/// assert!(config.check_winner);
/// assert!(!config.filter_transforms);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Stop expanding positions that already have a winner
    pub check_winner: bool,
    /// Merge positions equivalent under the D4 symmetry group
    pub filter_transforms: bool,
}

impl TreeConfig {
    pub fn new(check_winner: bool, filter_transforms: bool) -> Self {
        Self {
            check_winner,
            filter_transforms,
        }
    }

    /// Winner pruning and symmetry filtering both enabled
    pub fn full() -> Self {
        Self::new(true, true)
    }

    /// Every move sequence to full depth, no symmetry merging
    pub fn exhaustive() -> Self {
        Self::new(false, false)
    }

    pub fn with_check_winner(mut self, check_winner: bool) -> Self {
        self.check_winner = check_winner;
        self
    }

    pub fn with_filter_transforms(mut self, filter_transforms: bool) -> Self {
        self.filter_transforms = filter_transforms;
        self
    }

    /// All four flag combinations, in the order the report prints them
    pub fn variants() -> [TreeConfig; 4] {
        [
            Self::new(false, false),
            Self::new(true, false),
            Self::new(false, true),
            Self::new(true, true),
        ]
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for TreeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match (self.check_winner, self.filter_transforms) {
            (false, false) => "no early out",
            (true, false) => "check for winner",
            (false, true) => "filter transforms",
            (true, true) => "fully compressed",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(TreeConfig::default(), TreeConfig::new(true, true));
        assert_eq!(TreeConfig::exhaustive(), TreeConfig::new(false, false));
        assert_eq!(
            TreeConfig::full().with_check_winner(false),
            TreeConfig::variants()[2]
        );
    }

    #[test]
    fn serializes_as_flags() {
        let json = serde_json::to_string(&TreeConfig::full()).unwrap();
        assert_eq!(json, r#"{"check_winner":true,"filter_transforms":true}"#);
        let back: TreeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TreeConfig::full());
    }

    #[test]
    fn labels_are_distinct() {
        let labels: std::collections::HashSet<String> = TreeConfig::variants()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels.len(), 4);
    }
}
