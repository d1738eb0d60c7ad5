//! Core library for the `skysense` forecast client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The forecast provider abstraction and its Weatherbit implementation
//! - Shared domain models, the two-slot forecast store and text reports
//!
//! It is used by `skysense-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;
pub mod store;

pub use config::Config;
pub use error::ForecastError;
pub use model::{ForecastDay, ForecastSeries};
pub use provider::{ForecastProvider, provider_from_config};
pub use store::{ForecastStore, Slot};
