use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_HISTORY_COUNT: usize = 7;

/// Ruleset parameters for one game. Built once and shared read-only by every
/// `BoardState` derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfiguration {
    /// Edge length of the (square) board.
    pub size: usize,
    /// Points added to white's score as compensation for playing second.
    pub komi: f32,
    /// Number of prior boards kept in `BoardState::history`, not counting the
    /// current one.
    pub max_history_count: usize,
    pub is_verbose_debugging_enabled: bool,
}

impl GameConfiguration {
    pub fn new(size: usize, komi: f32) -> Self {
        assert!(size > 0, "board size must be positive");
        GameConfiguration {
            size,
            komi,
            max_history_count: DEFAULT_MAX_HISTORY_COUNT,
            is_verbose_debugging_enabled: false,
        }
    }

    pub fn with_max_history_count(mut self, max_history_count: usize) -> Self {
        self.max_history_count = max_history_count;
        self
    }

    pub fn with_verbose_debugging(mut self, enabled: bool) -> Self {
        self.is_verbose_debugging_enabled = enabled;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn point_count(&self) -> usize {
        self.size * self.size
    }
}

impl Default for GameConfiguration {
    fn default() -> Self {
        GameConfiguration::new(19, 7.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfiguration::new(9, 6.5);
        assert_eq!(config.size, 9);
        assert_eq!(config.komi, 6.5);
        assert_eq!(config.max_history_count, 7);
        assert!(!config.is_verbose_debugging_enabled);
        assert_eq!(config.point_count(), 81);
    }

    #[test]
    fn builder_methods() {
        let config = GameConfiguration::new(5, 0.0)
            .with_max_history_count(2)
            .with_verbose_debugging(true);
        assert_eq!(config.max_history_count, 2);
        assert!(config.is_verbose_debugging_enabled);
    }

    #[test]
    fn parses_partial_json() {
        let config = GameConfiguration::from_json(r#"{"size": 13, "komi": 5.5}"#).unwrap();
        assert_eq!(config.size, 13);
        assert_eq!(config.komi, 5.5);
        assert_eq!(config.max_history_count, DEFAULT_MAX_HISTORY_COUNT);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(GameConfiguration::from_json("{size: 9}").is_err());
    }

    #[test]
    #[should_panic(expected = "board size")]
    fn rejects_empty_board() {
        GameConfiguration::new(0, 0.0);
    }
}
