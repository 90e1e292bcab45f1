//! Profile/metrics store
//!
//! Holds the current profile, daily metrics and last assessment on top of a
//! [`KeyValueStorage`]. Field edits are persisted immediately; the assessment
//! is persisted only by an explicit [`HealthStore::save`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DashboardError;
use crate::scorer::RiskScorer;
use crate::storage::{KeyValueStorage, ALL_KEYS, ASSESSMENT_KEY, METRICS_KEY, PROFILE_KEY};
use crate::types::{DailyMetrics, MetricField, Profile, ProfileField, RiskAssessment};

/// Dashboard state bound to a storage backend
#[derive(Debug)]
pub struct HealthStore<S: KeyValueStorage> {
    storage: S,
    profile: Profile,
    metrics: DailyMetrics,
    assessment: Option<RiskAssessment>,
}

impl<S: KeyValueStorage> HealthStore<S> {
    /// Fresh state with defaults, nothing read from storage
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            profile: Profile::default(),
            metrics: DailyMetrics::default(),
            assessment: None,
        }
    }

    /// Restore persisted state, falling back to defaults per entry
    pub fn load(storage: S) -> Self {
        let profile = read_entry::<Profile>(&storage, PROFILE_KEY).unwrap_or_default();
        let metrics = read_entry::<DailyMetrics>(&storage, METRICS_KEY).unwrap_or_default();
        // A saved `null` means no analysis has been run yet
        let assessment = read_entry::<Option<RiskAssessment>>(&storage, ASSESSMENT_KEY).flatten();

        Self {
            storage,
            profile,
            metrics,
            assessment,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn metrics(&self) -> &DailyMetrics {
        &self.metrics
    }

    /// Last assessment; `None` until the first analysis
    pub fn assessment(&self) -> Option<&RiskAssessment> {
        self.assessment.as_ref()
    }

    /// Rounded BMI of the current profile
    pub fn bmi(&self) -> f64 {
        RiskScorer::bmi(&self.profile)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Validate and apply a profile edit, then persist the whole profile
    ///
    /// On error the in-memory profile is left unchanged.
    pub fn update_profile(&mut self, field: ProfileField) -> Result<(), DashboardError> {
        field.validate()?;
        let mut updated = self.profile.clone();
        updated.apply(field);
        write_entry(&mut self.storage, PROFILE_KEY, &updated)?;
        self.profile = updated;
        Ok(())
    }

    /// Validate and apply a metrics edit, then persist the whole metrics record
    ///
    /// On error the in-memory metrics are left unchanged.
    pub fn update_metrics(&mut self, field: MetricField) -> Result<(), DashboardError> {
        field.validate()?;
        let mut updated = self.metrics.clone();
        updated.apply(field);
        write_entry(&mut self.storage, METRICS_KEY, &updated)?;
        self.metrics = updated;
        Ok(())
    }

    /// Replace the last assessment in memory only
    pub fn set_assessment(&mut self, assessment: RiskAssessment) {
        self.assessment = Some(assessment);
    }

    /// Persist all three entries
    pub fn save(&mut self) -> Result<(), DashboardError> {
        write_entry(&mut self.storage, METRICS_KEY, &self.metrics)?;
        write_entry(&mut self.storage, PROFILE_KEY, &self.profile)?;
        write_entry(&mut self.storage, ASSESSMENT_KEY, &self.assessment)?;
        tracing::info!(has_assessment = self.assessment.is_some(), "saved health data");
        Ok(())
    }

    /// Remove every persisted entry and restore defaults
    pub fn reset(&mut self) -> Result<(), DashboardError> {
        for key in ALL_KEYS {
            self.storage.remove(key)?;
        }
        self.profile = Profile::default();
        self.metrics = DailyMetrics::default();
        self.assessment = None;
        Ok(())
    }
}

/// Read and parse one entry; absent, unreadable or unparsable yields `None`
fn read_entry<T: DeserializeOwned>(storage: &impl KeyValueStorage, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read stored entry, using defaults");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unparsable stored entry");
            None
        }
    }
}

fn write_entry<T: Serialize>(
    storage: &mut impl KeyValueStorage,
    key: &str,
    value: &T,
) -> Result<(), DashboardError> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)?;
    tracing::debug!(key, "persisted entry");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use crate::types::{Gender, RiskLevel};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_empty_storage_uses_defaults() {
        let store = HealthStore::load(MemoryStorage::new());

        assert_eq!(store.profile(), &Profile::default());
        assert_eq!(store.metrics(), &DailyMetrics::default());
        assert!(store.assessment().is_none());
    }

    #[test]
    fn test_field_edit_persists_immediately() {
        let mut store = HealthStore::new(MemoryStorage::new());
        store.update_profile(ProfileField::Age(44)).unwrap();
        store.update_metrics(MetricField::Steps(12_345)).unwrap();

        let storage = store.into_storage();
        let profile: Profile =
            serde_json::from_str(&storage.get(PROFILE_KEY).unwrap().unwrap()).unwrap();
        let metrics: DailyMetrics =
            serde_json::from_str(&storage.get(METRICS_KEY).unwrap().unwrap()).unwrap();

        assert_eq!(profile.age, 44);
        assert_eq!(profile.height_cm, 175.0);
        assert_eq!(metrics.steps, 12_345);
        assert_eq!(storage.get(ASSESSMENT_KEY).unwrap(), None);
    }

    #[test]
    fn test_rejected_edit_leaves_state_untouched() {
        let mut store = HealthStore::new(MemoryStorage::new());
        let result = store.update_profile(ProfileField::HeightCm(20.0));

        assert!(matches!(result, Err(DashboardError::Validation(_))));
        assert_eq!(store.profile().height_cm, 175.0);
        assert_eq!(store.storage().get(PROFILE_KEY).unwrap(), None);
    }

    #[test]
    fn test_round_trip_is_exact() {
        let mut store = HealthStore::new(MemoryStorage::new());
        store.update_profile(ProfileField::Gender(Gender::Female)).unwrap();
        store.update_profile(ProfileField::HeightCm(163.7)).unwrap();
        store.update_profile(ProfileField::WeightKg(58.3)).unwrap();
        store.update_metrics(MetricField::SleepHours(6.5)).unwrap();
        store.update_metrics(MetricField::Calories(2750)).unwrap();

        let profile = store.profile().clone();
        let metrics = store.metrics().clone();

        let reloaded = HealthStore::load(store.into_storage());
        assert_eq!(reloaded.profile(), &profile);
        assert_eq!(reloaded.metrics(), &metrics);
    }

    #[test]
    fn test_assessment_persisted_only_on_save() {
        let mut store = HealthStore::new(MemoryStorage::new());
        let assessment = RiskScorer::assess(store.profile(), store.metrics());
        store.set_assessment(assessment.clone());

        assert_eq!(store.storage().get(ASSESSMENT_KEY).unwrap(), None);

        store.save().unwrap();
        let reloaded = HealthStore::load(store.into_storage());
        assert_eq!(reloaded.assessment(), Some(&assessment));
    }

    #[test]
    fn test_save_without_assessment_reloads_as_none() {
        let mut store = HealthStore::new(MemoryStorage::new());
        store.save().unwrap();

        assert_eq!(
            store.storage().get(ASSESSMENT_KEY).unwrap().as_deref(),
            Some("null")
        );
        let reloaded = HealthStore::load(store.into_storage());
        assert!(reloaded.assessment().is_none());
    }

    #[test]
    fn test_unparsable_entries_fall_back_independently() {
        let mut storage = MemoryStorage::new();
        storage.set(PROFILE_KEY, "{not json").unwrap();
        let metrics = r#"{"calories":3100,"exercise_minutes":0,"sleep_hours":6.0,"steps":100}"#;
        storage.set(METRICS_KEY, metrics).unwrap();
        storage.set(ASSESSMENT_KEY, r#"{"risk_level":"Extreme"}"#).unwrap();

        let store = HealthStore::load(storage);
        assert_eq!(store.profile(), &Profile::default());
        assert_eq!(store.metrics().calories, 3100);
        assert!(store.assessment().is_none());
    }

    #[test]
    fn test_reset_clears_storage() {
        let mut store = HealthStore::new(MemoryStorage::new());
        store.update_profile(ProfileField::Age(70)).unwrap();
        let assessment = RiskScorer::assess(store.profile(), store.metrics());
        assert_eq!(assessment.risk_level, RiskLevel::High);
        store.set_assessment(assessment);
        store.save().unwrap();

        store.reset().unwrap();
        assert_eq!(store.profile(), &Profile::default());
        assert!(store.assessment().is_none());
        for key in ALL_KEYS {
            assert_eq!(store.storage().get(key).unwrap(), None);
        }
    }

    #[test]
    fn test_file_backed_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = HealthStore::load(FileStorage::new(tmp.path()));
        store.update_metrics(MetricField::ExerciseMinutes(45)).unwrap();

        let reloaded = HealthStore::load(FileStorage::new(tmp.path()));
        assert_eq!(reloaded.metrics().exercise_minutes, 45);
        assert_eq!(reloaded.profile(), &Profile::default());
    }
}
