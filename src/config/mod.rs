//! Configuration loading and parameter resolution for the salary engine.
//!
//! This module loads statutory parameter periods (UF, UTM, ceilings, insurance
//! rates, AFP rates and tax brackets) from YAML files and serves them through
//! the [`ParameterProvider`] trait.
//!
//! # Example
//!
//! ```no_run
//! use sueldo_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/cl").unwrap();
//! println!("Loaded {} periods", config.periodos().len());
//! ```

mod loader;
mod provider;
mod types;

pub use loader::ConfigLoader;
pub use provider::ParameterProvider;
pub use types::{PeriodoConfig, TramoConfig};
