//! Shared domain records and configuration for the pizza vendor catalog.

pub mod app_config;
pub mod config;
pub mod vendors;

pub use app_config::{AppConfig, Environment, PipelineConfig, PromoSource};
pub use config::{
    build_app_config, build_pipeline_config, load_app_config, load_app_config_from_env,
    load_pipeline_config_from_env,
};
pub use vendors::{NewVendor, PromoRecord, StoredVendor, VendorRecord, VendorUpdate};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
