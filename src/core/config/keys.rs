use std::error::Error as StdError;
use std::fmt;

use crate::core::config::data::Config;
use crate::core::panes::{MAX_SPLIT_RATIO, MIN_SPLIT_RATIO};
use crate::core::registry;

/// Keys accepted by `agentdeck set` / `agentdeck unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    DefaultAgent,
    Theme,
    Markdown,
    Syntax,
    ResponseDelayMs,
    RecentActivitySecs,
    CollapseThreshold,
    SplitRatio,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 8] = [
        ConfigKey::DefaultAgent,
        ConfigKey::Theme,
        ConfigKey::Markdown,
        ConfigKey::Syntax,
        ConfigKey::ResponseDelayMs,
        ConfigKey::RecentActivitySecs,
        ConfigKey::CollapseThreshold,
        ConfigKey::SplitRatio,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::DefaultAgent => "default-agent",
            ConfigKey::Theme => "theme",
            ConfigKey::Markdown => "markdown",
            ConfigKey::Syntax => "syntax",
            ConfigKey::ResponseDelayMs => "response-delay-ms",
            ConfigKey::RecentActivitySecs => "recent-activity-secs",
            ConfigKey::CollapseThreshold => "collapse-threshold",
            ConfigKey::SplitRatio => "split-ratio",
        }
    }

    pub fn parse(name: &str) -> Result<Self, ConfigKeyError> {
        Self::ALL
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigKeyError::UnknownKey(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigKeyError {
    UnknownKey(String),
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKeyError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            ConfigKeyError::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "Invalid value '{value}' for {key}: expected {expected}"),
        }
    }
}

impl StdError for ConfigKeyError {}

fn parse_bool(key: ConfigKey, value: &str) -> Result<bool, ConfigKeyError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigKeyError::InvalidValue {
            key: key.name(),
            value: value.to_string(),
            expected: "on or off",
        }),
    }
}

fn parse_number<T: std::str::FromStr>(
    key: ConfigKey,
    value: &str,
    expected: &'static str,
) -> Result<T, ConfigKeyError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigKeyError::InvalidValue {
            key: key.name(),
            value: value.to_string(),
            expected,
        })
}

impl Config {
    pub fn set_value(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigKeyError> {
        match key {
            ConfigKey::DefaultAgent => {
                let agent = registry::find(value).ok_or_else(|| ConfigKeyError::InvalidValue {
                    key: key.name(),
                    value: value.to_string(),
                    expected: "an agent id from `agentdeck agents`",
                })?;
                self.default_agent = Some(agent.id.to_string());
            }
            ConfigKey::Theme => {
                let theme = value.trim().to_ascii_lowercase();
                if theme != "dark" && theme != "light" {
                    return Err(ConfigKeyError::InvalidValue {
                        key: key.name(),
                        value: value.to_string(),
                        expected: "dark or light",
                    });
                }
                self.theme = Some(theme);
            }
            ConfigKey::Markdown => self.markdown = Some(parse_bool(key, value)?),
            ConfigKey::Syntax => self.syntax = Some(parse_bool(key, value)?),
            ConfigKey::ResponseDelayMs => {
                self.response_delay_ms = Some(parse_number(key, value, "milliseconds")?)
            }
            ConfigKey::RecentActivitySecs => {
                self.recent_activity_secs = Some(parse_number(key, value, "seconds")?)
            }
            ConfigKey::CollapseThreshold => {
                self.collapse_threshold = Some(parse_number(key, value, "a character count")?)
            }
            ConfigKey::SplitRatio => {
                let ratio: f64 = parse_number(key, value, "a percentage between 20 and 80")?;
                if !(MIN_SPLIT_RATIO..=MAX_SPLIT_RATIO).contains(&ratio) {
                    return Err(ConfigKeyError::InvalidValue {
                        key: key.name(),
                        value: value.to_string(),
                        expected: "a percentage between 20 and 80",
                    });
                }
                self.split_ratio = Some(ratio);
            }
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::DefaultAgent => self.default_agent = None,
            ConfigKey::Theme => self.theme = None,
            ConfigKey::Markdown => self.markdown = None,
            ConfigKey::Syntax => self.syntax = None,
            ConfigKey::ResponseDelayMs => self.response_delay_ms = None,
            ConfigKey::RecentActivitySecs => self.recent_activity_secs = None,
            ConfigKey::CollapseThreshold => self.collapse_threshold = None,
            ConfigKey::SplitRatio => self.split_ratio = None,
        }
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.default_agent {
            Some(agent) => println!("  default-agent: {agent}"),
            None => println!("  default-agent: (unset, {})", registry::DEFAULT_AGENT_ID),
        }
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset, dark)"),
        }
        println!(
            "  markdown: {}",
            if self.markdown_enabled() { "on" } else { "off" }
        );
        println!(
            "  syntax: {}",
            if self.syntax_enabled() { "on" } else { "off" }
        );
        println!(
            "  response-delay-ms: {}",
            self.response_delay().as_millis()
        );
        println!(
            "  recent-activity-secs: {}",
            self.recent_activity_window().as_secs()
        );
        println!("  collapse-threshold: {}", self.collapse_threshold());
        println!("  split-ratio: {}", self.initial_split_ratio());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_round_trips_through_its_name() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::parse(key.name()), Ok(key));
        }
        assert!(matches!(
            ConfigKey::parse("default-provider"),
            Err(ConfigKeyError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_default_agent_normalizes_id() {
        let mut config = Config::default();
        config
            .set_value(ConfigKey::DefaultAgent, "Gemini-1.5-Pro")
            .expect("known agent");
        assert_eq!(config.default_agent.as_deref(), Some("gemini-1.5-pro"));
        assert!(config
            .set_value(ConfigKey::DefaultAgent, "nope")
            .is_err());
    }

    #[test]
    fn set_rejects_out_of_range_split_ratio() {
        let mut config = Config::default();
        assert!(config.set_value(ConfigKey::SplitRatio, "90").is_err());
        config.set_value(ConfigKey::SplitRatio, "40").expect("in range");
        assert_eq!(config.split_ratio, Some(40.0));
    }

    #[test]
    fn booleans_accept_on_off() {
        let mut config = Config::default();
        config.set_value(ConfigKey::Markdown, "off").expect("valid");
        assert_eq!(config.markdown, Some(false));
        assert!(config.set_value(ConfigKey::Syntax, "maybe").is_err());
    }

    #[test]
    fn unset_clears_value() {
        let mut config = Config::default();
        config.set_value(ConfigKey::Theme, "light").expect("valid");
        config.unset_value(ConfigKey::Theme);
        assert!(config.theme.is_none());
    }
}
