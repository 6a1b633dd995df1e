//! Page behavior configuration.
//!
//! In the browser the configuration is [`UiConfig::default`] with the base URL
//! replaced by the page origin. Native harnesses load it from the environment
//! with [`UiConfig::from_env`], or from any key/value source with
//! [`UiConfig::from_lookup`].
//!
//! # Environment Variables
//!
//! All optional:
//! - `NEXAMART_BASE_URL` - Storefront origin relative endpoints resolve against (default: `http://127.0.0.1:5000`)
//! - `NEXAMART_FLASH_FADE_MS` - Delay before a flash message fades (default: 5000)
//! - `NEXAMART_FLASH_REMOVE_MS` - Delay between fade and removal (default: 300)
//! - `NEXAMART_NOTIFICATION_MS` - Lifetime of a toast notification (default: 5000)

use std::time::Duration;

use nexamart_core::PricingRules;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_FLASH_FADE_MS: u64 = 5000;
const DEFAULT_FLASH_REMOVE_MS: u64 = 300;
const DEFAULT_NOTIFICATION_MS: u64 = 5000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Page behavior configuration.
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Origin that relative endpoints such as `/send_register_otp` resolve against
    pub base_url: Url,
    /// Flash message timing
    pub flash: FlashTiming,
    /// How long a toast notification stays on the page
    pub notification_lifetime: Duration,
    /// Shipping and tax policy used by the live cart totals
    pub pricing: PricingRules,
}

/// When flash messages fade and leave the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashTiming {
    /// Delay from initialization to the fade-out
    pub fade_after: Duration,
    /// Delay from the fade-out to removal
    pub remove_after_fade: Duration,
}

impl Default for FlashTiming {
    fn default() -> Self {
        Self {
            fade_after: Duration::from_millis(DEFAULT_FLASH_FADE_MS),
            remove_after_fade: Duration::from_millis(DEFAULT_FLASH_REMOVE_MS),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            flash: FlashTiming::default(),
            notification_lifetime: Duration::from_millis(DEFAULT_NOTIFICATION_MS),
            pricing: PricingRules::default(),
        }
    }
}

impl UiConfig {
    /// Default configuration pointed at `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from `lookup`, which maps a variable name to its
    /// value. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = match lookup("NEXAMART_BASE_URL") {
            Some(value) => Url::parse(&value).map_err(|e| {
                ConfigError::InvalidEnvVar("NEXAMART_BASE_URL".to_string(), e.to_string())
            })?,
            None => default_base_url(),
        };

        let millis = |key: &str, default: u64| {
            lookup(key).map_or(Ok(Duration::from_millis(default)), |value| {
                parse_millis(key, &value)
            })
        };

        let flash = FlashTiming {
            fade_after: millis("NEXAMART_FLASH_FADE_MS", DEFAULT_FLASH_FADE_MS)?,
            remove_after_fade: millis("NEXAMART_FLASH_REMOVE_MS", DEFAULT_FLASH_REMOVE_MS)?,
        };
        let notification_lifetime = millis("NEXAMART_NOTIFICATION_MS", DEFAULT_NOTIFICATION_MS)?;

        Ok(Self {
            base_url,
            flash,
            notification_lifetime,
            pricing: PricingRules::default(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
