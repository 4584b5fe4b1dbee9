use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// État de santé déduit de la sortie de `fsck`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    #[serde(rename = "Healthy")]
    Healthy,
    #[serde(rename = "Needs Repair")]
    NeedsRepair,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::NeedsRepair => "Needs Repair",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Usage disque tel que rapporté par `df` (valeurs recopiées telles quelles).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub size: String,
    pub used: String,
    pub available: String,
    pub usage_percent: String,
}

/// Une entrée de la table des montages retenue pour la vérification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Périphérique source (ex: `/dev/sda1`).
    pub device: String,
    /// Premier point de montage rencontré pour ce périphérique.
    pub mount_point: String,
    pub fs_type: String,
}

/// Résultat de la vérification d'une partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionStatus {
    pub device: String,
    pub status: HealthStatus,
    /// Sortie brute de `fsck` (stdout puis stderr).
    pub check_output: String,
    pub disk_usage: DiskUsage,
    /// Horodatage UTC ISO-8601 (`YYYY-MM-DDTHH:MM:SSZ`).
    pub last_checked: String,
}

/// Partition dont la vérification a échoué (isolée du reste du lot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionFailure {
    pub device: String,
    pub command: String,
    pub error: String,
}

/// Rapport complet d'une exécution.
///
/// La liste des partitions est sérialisée sous la clé `<fs_type>_partitions`
/// (ex: `ext4_partitions`), toujours présente même vide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub timestamp: String,
    pub fs_type: String,
    pub partitions: Vec<PartitionStatus>,
    pub failures: Vec<PartitionFailure>,
}

impl Report {
    pub fn partitions_key(&self) -> String {
        format!("{}_partitions", self.fs_type)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Serialize for Report {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.failures.is_empty() { 2 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.serialize_entry(&self.partitions_key(), &self.partitions)?;
        if !self.failures.is_empty() {
            map.serialize_entry("failures", &self.failures)?;
        }
        map.end()
    }
}
