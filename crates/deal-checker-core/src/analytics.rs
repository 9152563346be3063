use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::deal::types::FinancingMethod;
use crate::DealCheckerResult;

/// Usage counters keyed by financing method, owned by the caller and updated
/// after a successful evaluation. The evaluator itself never touches this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub financing_methods: BTreeMap<String, u64>,
    pub total_calculations: u64,
    pub last_updated: DateTime<Utc>,
}

impl Default for AnalyticsData {
    fn default() -> Self {
        AnalyticsData {
            financing_methods: BTreeMap::new(),
            total_calculations: 0,
            last_updated: Utc::now(),
        }
    }
}

impl AnalyticsData {
    /// Count one calculation against the given financing method.
    pub fn record(&mut self, method: &FinancingMethod) {
        *self
            .financing_methods
            .entry(method.as_str().to_string())
            .or_insert(0) += 1;
        self.total_calculations += 1;
        self.last_updated = Utc::now();
    }

    /// Calculations recorded for one financing method.
    pub fn count_for(&self, method: &FinancingMethod) -> u64 {
        self.financing_methods
            .get(method.as_str())
            .copied()
            .unwrap_or(0)
    }
}

/// Load the counter store; a missing file yields empty data.
pub fn load(path: &Path) -> DealCheckerResult<AnalyticsData> {
    if !path.exists() {
        return Ok(AnalyticsData::default());
    }
    let contents = fs::read_to_string(path)?;
    let data = serde_json::from_str(&contents)?;
    Ok(data)
}

/// Persist the counter store.
pub fn save(path: &Path, data: &AnalyticsData) -> DealCheckerResult<()> {
    let serialized = serde_json::to_string_pretty(data)?;
    fs::write(path, serialized)?;
    Ok(())
}

/// Record one calculation for `method` in the store at `path` and return the
/// updated snapshot.
pub fn track(path: &Path, method: &FinancingMethod) -> DealCheckerResult<AnalyticsData> {
    let mut data = load(path)?;
    data.record(method);
    save(path, &data)?;
    Ok(data)
}

/// Remove the counter store. A missing file is not an error.
pub fn clear(path: &Path) -> DealCheckerResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_store(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "deal-checker-analytics-{}-{}.json",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_load_missing_file_yields_empty_data() {
        let path = temp_store("missing");
        let data = load(&path).unwrap();
        assert_eq!(data.total_calculations, 0);
        assert!(data.financing_methods.is_empty());
    }

    #[test]
    fn test_track_increments_method_and_total() {
        let path = temp_store("track");

        track(&path, &FinancingMethod::Cash).unwrap();
        track(&path, &FinancingMethod::Cash).unwrap();
        let data = track(&path, &FinancingMethod::Musharakah).unwrap();

        assert_eq!(data.count_for(&FinancingMethod::Cash), 2);
        assert_eq!(data.count_for(&FinancingMethod::Musharakah), 1);
        assert_eq!(data.count_for(&FinancingMethod::Ijara), 0);
        assert_eq!(data.total_calculations, 3);

        clear(&path).unwrap();
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_store("roundtrip");

        let mut data = AnalyticsData::default();
        data.record(&FinancingMethod::Murabaha);
        data.record(&FinancingMethod::OtherFinanced("helptobuy".into()));
        save(&path, &data).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, data);

        clear(&path).unwrap();
    }

    #[test]
    fn test_clear_tolerates_missing_file() {
        let path = temp_store("clear-missing");
        clear(&path).unwrap();
    }
}
