//! 演示程序配置，从 TOML 文件读取
//!
//! ```toml
//! assign_interval_ms = 1000
//! move_interval_ms = 1000
//! order_interval_ms = 1500
//! ticks = 30
//!
//! [[couriers]]
//! name = "driver"
//! speed = 4
//!
//! [[couriers.storage_places]]
//! name = "trunk"
//! volume = 30
//! ```
use delivery_domain::kernel::MIN_VOLUME;
use delivery_domain::model::courier::{MAX_SPEED, MIN_SPEED};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// 随 crate 提供的配置文件，与工作目录无关
pub const DEFAULT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/delivery.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub assign_interval_ms: u64,
    pub move_interval_ms: u64,
    pub order_interval_ms: u64,
    /// 移动周期数上限，0 表示不限
    pub ticks: u64,
    pub couriers: Vec<CourierConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourierConfig {
    pub name: String,
    pub speed: u8,
    /// bag 之外的存储位
    #[serde(default)]
    pub storage_places: Vec<StoragePlaceConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoragePlaceConfig {
    pub name: String,
    pub volume: i32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            assign_interval_ms: 1000,
            move_interval_ms: 1000,
            order_interval_ms: 1500,
            ticks: 30,
            couriers: vec![
                CourierConfig {
                    name: "walker".to_string(),
                    speed: 1,
                    storage_places: Vec::new(),
                },
                CourierConfig {
                    name: "driver".to_string(),
                    speed: 4,
                    storage_places: vec![StoragePlaceConfig {
                        name: "trunk".to_string(),
                        volume: 30,
                    }],
                },
            ],
        }
    }
}

impl DemoConfig {
    /// 读取配置文件；文件不存在时使用默认配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("assign_interval_ms", self.assign_interval_ms),
            ("move_interval_ms", self.move_interval_ms),
            ("order_interval_ms", self.order_interval_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{key} must be positive")));
            }
        }

        for courier in &self.couriers {
            if courier.name.trim().is_empty() {
                return Err(ConfigError::Invalid("courier name is empty".to_string()));
            }
            if !(MIN_SPEED..=MAX_SPEED).contains(&courier.speed) {
                return Err(ConfigError::Invalid(format!(
                    "courier {}: speed {} not in {MIN_SPEED}..={MAX_SPEED}",
                    courier.name, courier.speed
                )));
            }
            for place in &courier.storage_places {
                if place.name.trim().is_empty() || place.volume < MIN_VOLUME {
                    return Err(ConfigError::Invalid(format!(
                        "courier {}: bad storage place {:?}",
                        courier.name, place.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn assign_interval(&self) -> Duration {
        Duration::from_millis(self.assign_interval_ms)
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }

    pub fn order_interval(&self) -> Duration {
        Duration::from_millis(self.order_interval_ms)
    }
}
