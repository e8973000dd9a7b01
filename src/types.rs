//! Shared types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Free-form JSON object, used for inputs and settings maps
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// How the wait between retries grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    Constant,
    Linear,
    /// Doubles on every attempt
    #[default]
    Exponential,
}

impl BackoffType {
    /// Wait before retry number `attempt + 1`, never more than `max`
    pub fn delay(self, attempt: u32, initial: Duration, max: Duration) -> Duration {
        let delay = match self {
            BackoffType::Constant => initial,
            BackoffType::Linear => initial.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => initial.saturating_mul(2u32.saturating_pow(attempt)),
        };
        delay.min(max)
    }
}

/// Treat empty strings as absent.
///
/// Cursors, environment variables and `next.start` values all arrive as
/// strings where `""` means "not set".
pub trait NonEmpty {
    fn non_empty(self) -> Option<String>;
}

impl NonEmpty for Option<String> {
    fn non_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl NonEmpty for String {
    fn non_empty(self) -> Option<String> {
        Some(self).non_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_backoff_type_from_config_text() {
        let backoff: BackoffType = serde_yaml::from_str("linear").unwrap();
        assert_eq!(backoff, BackoffType::Linear);
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }

    #[test_case(BackoffType::Constant, 3 => 100 ; "constant ignores attempt")]
    #[test_case(BackoffType::Linear, 2 => 300 ; "linear")]
    #[test_case(BackoffType::Exponential, 3 => 800 ; "exponential")]
    #[test_case(BackoffType::Exponential, 20 => 1000 ; "capped")]
    #[test_case(BackoffType::Exponential, 64 => 1000 ; "huge attempt saturates")]
    fn test_backoff_delay(backoff: BackoffType, attempt: u32) -> u128 {
        backoff
            .delay(attempt, Duration::from_millis(100), Duration::from_secs(1))
            .as_millis()
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(Some("a".to_string()).non_empty(), Some("a".to_string()));
        assert_eq!(Some(String::new()).non_empty(), None);
        assert_eq!(None::<String>.non_empty(), None);
        assert_eq!(String::new().non_empty(), None);
    }
}
