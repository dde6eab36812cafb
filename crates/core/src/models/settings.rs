use serde::{Deserialize, Serialize};

use super::goal::{DEFAULT_EXPECTED_RETURN, DEFAULT_INFLATION_RATE};

/// User-configurable settings, stored inside the encrypted profile file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Overrides the environment-provided backend URL when set.
    pub api_base_url: Option<String>,

    /// Annual return (percent) pre-filled on new goals.
    pub default_expected_return: f64,

    /// Annual inflation (percent) pre-filled on new goals.
    pub default_inflation_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            default_expected_return: DEFAULT_EXPECTED_RETURN,
            default_inflation_rate: DEFAULT_INFLATION_RATE,
        }
    }
}
