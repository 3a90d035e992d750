//! Growth Service
//!
//! Single entry point over the growth predictor, scenario comparator and
//! PDCA learner. Responses use the `ApiResponse` envelope so callers can tell
//! a rejected request from a legitimately empty result.

pub mod config;
pub mod response;
pub mod service;

pub use config::ServiceConfig;
pub use response::{ApiError, ApiResponse};
pub use service::{GrowthService, Operation, PersonalizedPrediction};
