//! Assessment reports
//!
//! Packages the store's current state and last assessment into a single
//! JSON-ready snapshot with producer metadata.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DashboardError;
use crate::storage::KeyValueStorage;
use crate::store::HealthStore;
use crate::types::{DailyMetrics, Profile, RiskAssessment};
use crate::{BLOOM_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Snapshot of one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    /// Rounded BMI the assessment was based on
    pub bmi: f64,
    pub profile: Profile,
    pub metrics: DailyMetrics,
    pub assessment: RiskAssessment,
    /// Recommendations as one sentence-delimited string
    pub summary: String,
}

/// Builds reports tagged with a stable instance ID
pub struct ReportBuilder {
    instance_id: String,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportBuilder {
    /// Create a builder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Build a report; `None` while no analysis has been run
    pub fn build<S: KeyValueStorage>(&self, store: &HealthStore<S>) -> Option<AssessmentReport> {
        let assessment = store.assessment()?.clone();

        Some(AssessmentReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: BLOOM_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            bmi: store.bmi(),
            profile: store.profile().clone(),
            metrics: store.metrics().clone(),
            summary: assessment.recommendation_text(),
            assessment,
        })
    }

    /// Build and serialize a report
    pub fn build_to_json<S: KeyValueStorage>(
        &self,
        store: &HealthStore<S>,
    ) -> Result<Option<String>, DashboardError> {
        match self.build(store) {
            Some(report) => Ok(Some(serde_json::to_string(&report)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::RiskScorer;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_no_report_before_analysis() {
        let store = HealthStore::new(MemoryStorage::new());
        assert!(ReportBuilder::new().build(&store).is_none());
        assert_eq!(ReportBuilder::new().build_to_json(&store).unwrap(), None);
    }

    #[test]
    fn test_report_fields() {
        let mut store = HealthStore::new(MemoryStorage::new());
        store.set_assessment(RiskScorer::assess(store.profile(), store.metrics()));

        let builder = ReportBuilder::with_instance_id("test-instance".to_string());
        let json = builder.build_to_json(&store).unwrap().unwrap();
        let report: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(report["report_version"], REPORT_VERSION);
        assert_eq!(report["producer"]["name"], "blooming-health");
        assert_eq!(report["producer"]["instance_id"], "test-instance");
        assert_eq!(report["bmi"], 22.9);
        assert_eq!(report["profile"]["gender"], "Male");
        assert_eq!(report["assessment"]["bmi_category"], "Normal");
        assert!(report["summary"]
            .as_str()
            .unwrap()
            .ends_with("Include fruits and vegetables in your daily diet"));
        let computed_at = report["computed_at_utc"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(computed_at).is_ok());
    }
}
