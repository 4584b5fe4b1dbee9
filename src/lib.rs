//! ext4_monitor — état de santé et usage des partitions d'un type de FS donné.
//!
//! Pour chaque partition montée du type demandé (ext4 par défaut), lance une
//! vérification non destructive (`fsck -n`) et une requête d'usage (`df`),
//! puis assemble un rapport horodaté sérialisable en JSON.
//!
//! # Examples
//! ```no_run
//! use ext4_monitor::{render_json, JsonStyle, Monitor, MonitorConfig};
//! let monitor = Monitor::new(MonitorConfig::default());
//! let report = monitor.gather_report().expect("report");
//! println!("{}", render_json(&report, JsonStyle::Pretty).expect("json"));
//! ```

#![forbid(unsafe_code)]

mod application;
pub mod domain;
mod infrastructure;

pub use domain::{
    DfConfig, DiskUsage, FsckConfig, HealthStatus, MonitorConfig, MonitorError, Partition,
    PartitionFailure, PartitionStatus, Report, RuntimeConfig,
};

pub use application::report::{render_json, render_summary, JsonStyle};
pub use application::{format_timestamp, list_partitions, Monitor, TIMESTAMP_FORMAT};

pub use infrastructure::command::{CommandOutput, CommandRunner, SystemRunner};

#[cfg(feature = "config")]
pub use application::load_config_from_path;

pub use application::logging::init_logging;

// Outils de test/fuzz internes
#[cfg(any(test, feature = "internals"))]
pub mod internals {
    pub use crate::infrastructure::df::parse_df_output_for_tests;
    pub use crate::infrastructure::mounts::partitions_from_mountinfo_for_tests;
}
