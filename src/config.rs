use crate::errors::ValidatorError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Registry key of the remote driver.
pub const SMARTY_STREETS_DRIVER: &str = "smartystreets";
/// Registry key of the echo driver.
pub const FAKE_DRIVER: &str = "fake";

/// Implementation name resolved to the remote provider.
pub const SMARTY_STREETS_CLASS: &str = "smarty_streets";
/// Implementation name resolved to the echo provider.
pub const FAKE_CLASS: &str = "fake";

pub const DEFAULT_SMARTY_STREETS_URL: &str = "https://us-street.api.smartystreets.com/street-address";
pub const DEFAULT_CANDIDATES: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How strictly the remote API matches the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrictness {
    /// Only valid USPS addresses.
    Strict,
    /// Valid USPS addresses plus invalid primary numbers inside a valid street range.
    #[default]
    Range,
    /// One candidate for every submitted address, even if invalid or ambiguous.
    Invalid,
}

impl MatchStrictness {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrictness::Strict => "strict",
            MatchStrictness::Range => "range",
            MatchStrictness::Invalid => "invalid",
        }
    }
}

impl fmt::Display for MatchStrictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStrictness {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(MatchStrictness::Strict),
            "range" => Ok(MatchStrictness::Range),
            "invalid" => Ok(MatchStrictness::Invalid),
            other => anyhow::bail!(
                "match mode '{}' is not one of strict, range, invalid",
                other
            ),
        }
    }
}

/// One entry of the drivers registry.
///
/// `class` names the implementation; the remaining fields are only read by the
/// remote provider. Values that could not be read from the environment are kept in
/// `problems` and only reported if this driver gets selected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverConfig {
    pub class: String,
    pub api_url: Option<String>,
    pub auth_id: Option<String>,
    pub auth_token: Option<String>,
    pub candidates: Option<u32>,
    pub match_strictness: Option<MatchStrictness>,
    pub timeout_secs: Option<u64>,
    #[serde(skip)]
    pub problems: Vec<String>,
}

impl DriverConfig {
    pub fn fake() -> Self {
        Self {
            class: FAKE_CLASS.to_string(),
            ..Self::default()
        }
    }
}

/// Settings of the remote provider with every default applied.
#[derive(Debug, Clone)]
pub struct SmartyStreetsConfig {
    pub api_url: String,
    pub auth_id: String,
    pub auth_token: String,
    pub candidates: u32,
    pub match_strictness: MatchStrictness,
    pub timeout: Duration,
}

impl Default for SmartyStreetsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_SMARTY_STREETS_URL.to_string(),
            auth_id: String::new(),
            auth_token: String::new(),
            candidates: DEFAULT_CANDIDATES,
            match_strictness: MatchStrictness::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TryFrom<&DriverConfig> for SmartyStreetsConfig {
    type Error = ValidatorError;

    fn try_from(driver: &DriverConfig) -> Result<Self, Self::Error> {
        if !driver.problems.is_empty() {
            return Err(ValidatorError::Configuration(driver.problems.join("; ")));
        }

        let api_url = driver
            .api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SMARTY_STREETS_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ValidatorError::Configuration(format!(
                "SmartyStreets API URL '{}' must start with http:// or https://",
                api_url
            )));
        }

        let candidates = driver.candidates.unwrap_or(DEFAULT_CANDIDATES);
        if candidates == 0 {
            return Err(ValidatorError::Configuration(
                "SmartyStreets candidates must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            auth_id: driver.auth_id.clone().unwrap_or_default(),
            auth_token: driver.auth_token.clone().unwrap_or_default(),
            candidates,
            match_strictness: driver.match_strictness.unwrap_or_default(),
            timeout: Duration::from_secs(driver.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Selected registry key; `None` disables validation.
    pub driver: Option<String>,
    #[serde(default)]
    pub drivers: HashMap<String, DriverConfig>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok());

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Address validator driver: {:?}", config.driver);

        Ok(config)
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unreadable driver values never fail the whole configuration; they are recorded
    /// on the driver entry they belong to.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let driver = non_empty("ADDRESS_VALIDATOR_DRIVER");
        let mut problems = Vec::new();

        let candidates = non_empty("SMARTY_STREETS_CANDIDATES").and_then(|raw| {
            raw.parse::<u32>()
                .map_err(|_| {
                    problems.push(format!(
                        "SMARTY_STREETS_CANDIDATES must be a positive number, got '{}'",
                        raw
                    ))
                })
                .ok()
        });

        let match_strictness = non_empty("SMARTY_STREETS_MATCH").and_then(|raw| {
            raw.parse::<MatchStrictness>()
                .map_err(|e| problems.push(format!("SMARTY_STREETS_MATCH: {}", e)))
                .ok()
        });

        let timeout_secs = non_empty("SMARTY_STREETS_TIMEOUT_SECS").and_then(|raw| {
            raw.parse::<u64>()
                .map_err(|_| {
                    problems.push(format!(
                        "SMARTY_STREETS_TIMEOUT_SECS must be a number of seconds, got '{}'",
                        raw
                    ))
                })
                .ok()
        });

        let smarty_streets = DriverConfig {
            class: SMARTY_STREETS_CLASS.to_string(),
            api_url: non_empty("SMARTY_STREETS_API_URL"),
            auth_id: lookup("SMARTY_STREETS_API_ID"),
            auth_token: lookup("SMARTY_STREETS_API_AUTH_TOKEN"),
            candidates,
            match_strictness,
            timeout_secs,
            problems,
        };

        let mut drivers = HashMap::new();
        drivers.insert(SMARTY_STREETS_DRIVER.to_string(), smarty_streets);
        drivers.insert(FAKE_DRIVER.to_string(), DriverConfig::fake());

        Self { driver, drivers }
    }

    /// Registry entry of the selected driver, if both exist.
    pub fn selected_driver(&self) -> Option<(&str, &DriverConfig)> {
        let name = self.driver.as_deref()?;
        self.drivers.get(name).map(|driver| (name, driver))
    }
}
