use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::domain::{
    MonitorConfig, MonitorError, Partition, PartitionFailure, PartitionStatus, Report,
};
use crate::infrastructure::command::{CommandRunner, SystemRunner};
use crate::infrastructure::{df, fsck, mounts};

pub mod logging;
pub mod report;

/// Format des horodatages du rapport (UTC, précision seconde).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn now() -> String {
    format_timestamp(Utc::now())
}

/// Liste les partitions montées de type `fs_type`.
pub fn list_partitions(fs_type: &str) -> Vec<Partition> {
    let partitions = mounts::list_partitions(fs_type);
    if partitions.is_empty() {
        info!(fs_type, "no_partitions");
    } else {
        debug!(fs_type, count = partitions.len(), "partitions_listed");
    }
    partitions
}

/// Orchestration : énumération, vérification séquentielle, rapport.
pub struct Monitor<R = SystemRunner> {
    config: MonitorConfig,
    runner: R,
}

impl Monitor<SystemRunner> {
    pub fn new(config: MonitorConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: CommandRunner> Monitor<R> {
    pub fn with_runner(config: MonitorConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Vérifie une partition : `fsck` non destructif puis `df`.
    pub fn check_partition(&self, partition: &Partition) -> Result<PartitionStatus, MonitorError> {
        let started_at = Instant::now();
        let device = partition.device.as_str();

        let check_output = fsck::run_check(&self.runner, &self.config.fsck, device)?;
        let status = fsck::classify(&check_output, &self.config.fsck.clean_marker);
        let disk_usage = df::query_usage(&self.runner, &self.config.df, device)?;

        debug!(
            device,
            mount_point = %partition.mount_point,
            status = %status,
            usage = %disk_usage.usage_percent,
            duration_ms = started_at.elapsed().as_millis(),
            "partition_checked"
        );

        Ok(PartitionStatus {
            device: partition.device.clone(),
            status,
            check_output,
            disk_usage,
            last_checked: now(),
        })
    }

    /// Vérifie les partitions données, dans l'ordre.
    ///
    /// Une partition en échec est consignée dans `failures` et la suite continue,
    /// sauf si `fail_fast` est actif : l'erreur est alors propagée telle quelle.
    /// Un périphérique de `devices` absent de `partitions` compte comme un échec
    /// et aucune commande n'est lancée pour lui.
    pub fn gather_report_for(&self, partitions: &[Partition]) -> Result<Report, MonitorError> {
        let mut statuses = Vec::with_capacity(partitions.len());
        let mut failures = Vec::new();

        for err in self.unmatched_devices(partitions) {
            if self.config.fail_fast {
                error!(error = %err, "device_not_found");
                return Err(err);
            }
            warn!(error = %err, "device_not_found");
            failures.push(PartitionFailure {
                device: err.device().unwrap_or_default().to_string(),
                command: err.command().unwrap_or_default().to_string(),
                error: err.to_string(),
            });
        }

        for partition in partitions.iter().filter(|p| self.is_selected(p)) {
            match self.check_partition(partition) {
                Ok(status) => statuses.push(status),
                Err(err) if self.config.fail_fast => {
                    error!(device = %partition.device, error = %err, "partition_failed");
                    return Err(err);
                }
                Err(err) => {
                    warn!(device = %partition.device, error = %err, "partition_failed");
                    failures.push(PartitionFailure {
                        device: partition.device.clone(),
                        command: err.command().unwrap_or_default().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        let report = Report {
            timestamp: now(),
            fs_type: self.config.fs_type.clone(),
            partitions: statuses,
            failures,
        };
        info!(
            fs_type = %report.fs_type,
            checked = report.partitions.len(),
            failed = report.failures.len(),
            "report_gathered"
        );
        Ok(report)
    }

    /// Énumère puis vérifie toutes les partitions du type configuré.
    pub fn gather_report(&self) -> Result<Report, MonitorError> {
        let partitions = list_partitions(&self.config.fs_type);
        self.gather_report_for(&partitions)
    }

    /// Statuts des partitions vérifiées avec succès.
    pub fn gather_status(&self) -> Result<Vec<PartitionStatus>, MonitorError> {
        self.gather_report().map(|report| report.partitions)
    }

    fn is_selected(&self, partition: &Partition) -> bool {
        self.config.devices.is_empty() || self.config.devices.contains(&partition.device)
    }

    fn unmatched_devices(&self, partitions: &[Partition]) -> Vec<MonitorError> {
        let mut missing: Vec<&String> = Vec::new();
        for device in &self.config.devices {
            if !missing.contains(&device) && !partitions.iter().any(|p| &p.device == device) {
                missing.push(device);
            }
        }
        missing
            .into_iter()
            .map(|device| MonitorError::NotMounted {
                device: device.clone(),
                fs_type: self.config.fs_type.clone(),
            })
            .collect()
    }
}

#[cfg(feature = "config")]
pub fn load_config_from_path<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<MonitorConfig, MonitorError> {
    use std::path::Component;

    let path_ref = path.as_ref();
    if path_ref
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(MonitorError::Config(format!(
            "chemin refusé (composant `..`): {}",
            path_ref.display()
        )));
    }
    let data = std::fs::read_to_string(path_ref).map_err(|e| {
        error!(
            path = %path_ref.display(),
            error = %e,
            "config_error"
        );
        MonitorError::Config(format!("read {}: {e}", path_ref.display()))
    })?;
    toml::from_str::<MonitorConfig>(&data).map_err(|e| {
        error!(
            path = %path_ref.display(),
            error = %e,
            "config_error"
        );
        MonitorError::Config(format!("toml parse: {e}"))
    })
}
