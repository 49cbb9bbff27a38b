//! EaseNote configuration file handling
//!
//! `easenote.toml` holds the sign-in client id, the splash timing and the
//! default log filter. Every section is optional.

use anyhow::{Context, Result};
use easenote_animation::{Easing, Timing};
use easenote_auth::SignInConfig;
use easenote_splash::SplashSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration (easenote.toml)
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Injected into the auth gate
    #[serde(default)]
    pub auth: SignInConfig,
    #[serde(default)]
    pub splash: SplashConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.splash.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Easing names accepted in the configuration file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingName {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl From<EasingName> for Easing {
    fn from(name: EasingName) -> Self {
        match name {
            EasingName::Linear => Easing::Linear,
            EasingName::EaseIn => Easing::EaseIn,
            EasingName::EaseOut => Easing::EaseOut,
            EasingName::EaseInOut => Easing::EaseInOut,
        }
    }
}

/// Splash transition configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SplashConfig {
    /// Duration of one retrigger in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,
    /// Delay before the first retrigger after mount
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: f32,
    #[serde(default)]
    pub easing: EasingName,
}

fn default_duration_ms() -> u32 {
    500
}

fn default_settle_delay_ms() -> f32 {
    100.0
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            easing: EasingName::default(),
        }
    }
}

impl SplashConfig {
    fn validate(&self) -> Result<()> {
        if !(self.settle_delay_ms.is_finite() && self.settle_delay_ms >= 0.0) {
            anyhow::bail!(
                "splash.settle_delay_ms must be non-negative, got {}",
                self.settle_delay_ms
            );
        }
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing::new(self.duration_ms, self.easing.into())
    }

    pub fn settings(&self) -> SplashSettings {
        SplashSettings {
            timing: self.timing(),
            settle_delay_ms: self.settle_delay_ms,
        }
    }
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}
