//! Blooming Health - personal health dashboard core
//!
//! Holds a user profile and daily lifestyle metrics, persists them to a local
//! key-value store, and turns them into a heuristic wellness assessment:
//! profile + metrics → BMI and point bands → clamped risk score → labels and
//! recommendations.
//!
//! ## Modules
//!
//! - **Store**: profile, metrics and last assessment with local persistence
//! - **Scorer**: pure mapping from (profile, metrics) to a risk assessment
//! - **Analysis**: the delayed, async trigger that runs the scorer on the store

pub mod analysis;
pub mod config;
pub mod error;
pub mod report;
pub mod scorer;
pub mod storage;
pub mod store;
pub mod types;
pub mod validation;

pub use analysis::analyze;
pub use config::DashboardConfig;
pub use error::DashboardError;
pub use scorer::RiskScorer;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::HealthStore;
pub use types::{DailyMetrics, Gender, Profile, RiskAssessment, RiskLevel};

/// Crate version embedded in every report
pub const BLOOM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "blooming-health";
