//! Delayed analysis trigger
//!
//! Runs the scorer against the store after a fixed artificial delay. There is
//! exactly one suspend point and no cancellation; if two analyses overlap the
//! later one simply overwrites the stored result.

use std::time::Duration;

use crate::scorer::RiskScorer;
use crate::storage::KeyValueStorage;
use crate::store::HealthStore;
use crate::types::RiskAssessment;

/// Default artificial delay before a result is produced
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(2000);

/// Wait `delay`, score the store's current state, and replace its assessment
///
/// Returns the new assessment, which the store also holds in memory; call
/// [`HealthStore::save`] to persist it.
pub async fn analyze<S: KeyValueStorage>(
    store: &mut HealthStore<S>,
    delay: Duration,
) -> RiskAssessment {
    tracing::debug!(delay_ms = delay.as_millis() as u64, "analysis started");
    tokio::time::sleep(delay).await;

    let assessment = RiskScorer::assess(store.profile(), store.metrics());
    tracing::info!(
        risk_level = %assessment.risk_level,
        risk_score = assessment.risk_score,
        "analysis complete"
    );
    store.set_assessment(assessment.clone());
    assessment
}
