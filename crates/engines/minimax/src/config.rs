//! Minimax agent configuration.

use chess_core::SearchError;
use serde::{Deserialize, Serialize};

/// Settings for [`crate::MinimaxAgent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinimaxConfig {
    /// Plies searched below the root. Must be at least 1.
    pub depth: u8,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self { depth: 2 }
    }
}

impl MinimaxConfig {
    /// Builder pattern: set search depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth == 0 {
            return Err(SearchError::invalid("minimax depth must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MinimaxConfig::default();
        assert_eq!(config.depth, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = MinimaxConfig::default().with_depth(0).validate().unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfiguration(_)));
    }
}
