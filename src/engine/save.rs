//! Local save blob for the idle demo. Field names match the JSON layout
//! already stored in players' browsers, so older saves keep loading.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub multiplier: Option<f64>,
    #[serde(default)]
    pub generated: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSnapshot {
    pub name: String,
    #[serde(default, alias = "owned")]
    pub amount_owned: Option<u32>,
    #[serde(default)]
    pub multiplier: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeSnapshot {
    pub name: String,
    #[serde(default)]
    pub purchased: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(default)]
    pub total_generated: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrestigeSnapshot {
    #[serde(default)]
    pub owned: Option<u64>,
    #[serde(default)]
    pub lifetime: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    #[serde(default)]
    pub resources: Vec<ResourceSnapshot>,
    #[serde(default)]
    pub workers: Vec<WorkerSnapshot>,
    #[serde(default)]
    pub upgrades: Vec<UpgradeSnapshot>,
    #[serde(default)]
    pub totals: Totals,
    #[serde(default)]
    pub prestige: PrestigeSnapshot,
    /// Milliseconds since the epoch.
    #[serde(default)]
    pub saved_at: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_partial_legacy_blob() {
        let raw = r#"{
            "resources": [{"name": "Kolektivní Vůle", "amount": 12.5}],
            "workers": [{"name": "Uliční agitátor", "amountOwned": 3}],
            "prestige": {"owned": 2}
        }"#;
        let save: SaveData = serde_json::from_str(raw).unwrap();
        assert_eq!(save.resources[0].amount, Some(12.5));
        assert_eq!(save.resources[0].multiplier, None);
        assert_eq!(save.workers[0].amount_owned, Some(3));
        assert!(save.upgrades.is_empty());
        assert_eq!(save.totals.total_generated, 0.0);
        assert_eq!(save.prestige.lifetime, None);
    }

    #[test]
    fn writes_camel_case_keys() {
        let save = SaveData {
            totals: Totals { total_generated: 5.0 },
            saved_at: 1.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&save).unwrap();
        assert!(json.contains("\"totalGenerated\":5.0"));
        assert!(json.contains("\"savedAt\":1.0"));
    }

    #[test]
    fn worker_count_accepts_short_key() {
        let raw = r#"{"workers": [{"name": "Uliční agitátor", "owned": 7}]}"#;
        let save: SaveData = serde_json::from_str(raw).unwrap();
        assert_eq!(save.workers[0].amount_owned, Some(7));
    }
}
