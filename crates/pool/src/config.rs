//! Pool configuration management with precedence and validation
use crate::errors::{Error, RecoveryHint, Result};
use crate::strategy::StrategyKind;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tilepool_core::PixelFormat;

pub const TILEPOOL_MAX_SIZE_VAR: &str = "TILEPOOL_MAX_SIZE";
pub const TILEPOOL_STRATEGY_VAR: &str = "TILEPOOL_STRATEGY";
pub const TILEPOOL_ALLOWED_FORMATS_VAR: &str = "TILEPOOL_ALLOWED_FORMATS";
pub const TILEPOOL_SIZE_MULTIPLIER_VAR: &str = "TILEPOOL_SIZE_MULTIPLIER";

/// Configuration for a bitmap pool
#[derive(Debug, Clone, PartialEq)]
pub struct PoolConfig {
    /// Byte budget before the size multiplier is applied
    pub max_size: u64,
    /// Strategy used to match requests against pooled bitmaps
    pub strategy: StrategyKind,
    /// Formats the pool accepts on `put`
    pub allowed_formats: BTreeSet<PixelFormat>,
    /// Scales `max_size` to the effective budget
    pub size_multiplier: f64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 32 * 1024 * 1024, // 32MB
            strategy: StrategyKind::SizeConfig,
            allowed_formats: PixelFormat::ALL.into_iter().collect(),
            size_multiplier: 1.0,
        }
    }
}

impl PoolConfig {
    /// Reject settings the pool cannot run with
    pub fn validate(&self) -> Result<()> {
        validate_multiplier(self.size_multiplier)?;

        if self.allowed_formats.is_empty() {
            return Err(Error::Configuration {
                message: "At least one pixel format must be allowed".to_string(),
                recovery_hint: RecoveryHint::UseDefault {
                    value: PixelFormat::DEFAULT.to_string(),
                },
            });
        }

        Ok(())
    }

    /// Byte budget after applying the size multiplier
    pub fn effective_max_size(&self) -> u64 {
        scaled_size(self.max_size, self.size_multiplier)
    }
}

pub(crate) fn validate_multiplier(multiplier: f64) -> Result<()> {
    if multiplier.is_finite() && multiplier >= 0.0 {
        Ok(())
    } else {
        Err(Error::Configuration {
            message: format!("Size multiplier must be a finite non-negative number, got {multiplier}"),
            recovery_hint: RecoveryHint::UseDefault {
                value: "1.0".to_string(),
            },
        })
    }
}

pub(crate) fn scaled_size(size: u64, multiplier: f64) -> u64 {
    (size as f64 * multiplier).round() as u64
}

/// Partial configuration read from a file or the environment
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PoolConfigOverrides {
    pub max_size: Option<u64>,
    pub strategy: Option<StrategyKind>,
    pub allowed_formats: Option<Vec<PixelFormat>>,
    pub size_multiplier: Option<f64>,
}

impl PoolConfigOverrides {
    fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn apply_to(self, config: &mut PoolConfig) {
        if let Some(max_size) = self.max_size {
            config.max_size = max_size;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(formats) = self.allowed_formats {
            config.allowed_formats = formats.into_iter().collect();
        }
        if let Some(multiplier) = self.size_multiplier {
            config.size_multiplier = multiplier;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    pool: PoolConfigOverrides,
}

/// Source of configuration for debugging and precedence tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Default configuration
    Default,
    /// Configuration file
    ConfigFile(PathBuf),
    /// Environment variable
    EnvironmentVariable(String),
}

/// Loaded configuration together with the layer that last changed it
#[derive(Debug, Clone)]
pub struct PoolConfiguration {
    pub pool: PoolConfig,
    pub source: ConfigSource,
}

/// Builder for creating pool configurations
pub struct PoolConfigBuilder {
    config: PoolConfig,
}

impl PoolConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: PoolConfig::default(),
        }
    }

    /// Set the byte budget
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.config.max_size = max_size;
        self
    }

    /// Set the pooling strategy
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Restrict the formats accepted by `put`
    pub fn with_allowed_formats(mut self, formats: impl IntoIterator<Item = PixelFormat>) -> Self {
        self.config.allowed_formats = formats.into_iter().collect();
        self
    }

    /// Set the size multiplier
    pub fn with_size_multiplier(mut self, multiplier: f64) -> Self {
        self.config.size_multiplier = multiplier;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<PoolConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for PoolConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration loader that handles precedence
pub struct PoolConfigLoader;

impl PoolConfigLoader {
    /// Load configuration: defaults, then the config file, then environment variables
    pub fn load() -> Result<PoolConfiguration> {
        let mut configuration = PoolConfiguration {
            pool: PoolConfig::default(),
            source: ConfigSource::Default,
        };

        let config_path = Self::get_config_file_path()?;
        if let Some(file_overrides) = Self::load_from_config_file(&config_path)? {
            file_overrides.apply_to(&mut configuration.pool);
            configuration.source = ConfigSource::ConfigFile(config_path);
        }

        if let Some(env_overrides) = Self::load_from_env()? {
            env_overrides.apply_to(&mut configuration.pool);
            configuration.source = ConfigSource::EnvironmentVariable("TILEPOOL_*".to_string());
        }

        configuration.pool.validate()?;
        tracing::debug!(
            source = ?configuration.source,
            max_size = configuration.pool.max_size,
            strategy = %configuration.pool.strategy,
            "Loaded pool configuration"
        );
        Ok(configuration)
    }

    /// Load overrides from a JSON config file, `None` if it does not exist
    pub fn load_from_config_file(path: &std::path::Path) -> Result<Option<PoolConfigOverrides>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            operation: "read config file",
            source: e,
            recovery_hint: RecoveryHint::CheckPermissions {
                path: path.to_path_buf(),
            },
        })?;

        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| Error::Serialization {
            key: path.display().to_string(),
            source: Box::new(e),
            recovery_hint: RecoveryHint::Manual {
                instructions: "Check config file syntax".to_string(),
            },
        })?;

        if file.pool.is_empty() {
            Ok(None)
        } else {
            Ok(Some(file.pool))
        }
    }

    /// Load overrides from `TILEPOOL_*` environment variables
    pub fn load_from_env() -> Result<Option<PoolConfigOverrides>> {
        let mut overrides = PoolConfigOverrides::default();

        if let Ok(max_size_str) = std::env::var(TILEPOOL_MAX_SIZE_VAR) {
            overrides.max_size = Some(parse_env(TILEPOOL_MAX_SIZE_VAR, &max_size_str)?);
        }

        if let Ok(strategy_str) = std::env::var(TILEPOOL_STRATEGY_VAR) {
            overrides.strategy = Some(strategy_str.parse()?);
        }

        if let Ok(formats_str) = std::env::var(TILEPOOL_ALLOWED_FORMATS_VAR) {
            let formats = formats_str
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| {
                    part.parse::<PixelFormat>().map_err(|e| Error::Configuration {
                        message: format!("Invalid value for {TILEPOOL_ALLOWED_FORMATS_VAR}: {e}"),
                        recovery_hint: RecoveryHint::UseDefault {
                            value: PixelFormat::DEFAULT.to_string(),
                        },
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            overrides.allowed_formats = Some(formats);
        }

        if let Ok(multiplier_str) = std::env::var(TILEPOOL_SIZE_MULTIPLIER_VAR) {
            overrides.size_multiplier =
                Some(parse_env(TILEPOOL_SIZE_MULTIPLIER_VAR, &multiplier_str)?);
        }

        if overrides.is_empty() {
            Ok(None)
        } else {
            Ok(Some(overrides))
        }
    }

    /// Get the configuration file path
    pub fn get_config_file_path() -> Result<PathBuf> {
        let config_dir = if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config_home)
        } else {
            dirs::config_dir().ok_or_else(|| Error::Configuration {
                message: "Could not determine config directory".to_string(),
                recovery_hint: RecoveryHint::Manual {
                    instructions: "Set XDG_CONFIG_HOME or HOME environment variable".to_string(),
                },
            })?
        };

        Ok(config_dir.join("tilepool").join("config.json"))
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| Error::Configuration {
        message: format!("Invalid value for {name}: '{value}'"),
        recovery_hint: RecoveryHint::Manual {
            instructions: format!("Unset {name} or give it a valid number"),
        },
    })
}
