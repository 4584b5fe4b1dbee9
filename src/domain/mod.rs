pub mod config;
pub mod error;
pub mod model;

pub use config::{DfConfig, FsckConfig, MonitorConfig, RuntimeConfig};
pub use error::MonitorError;
pub use model::{
    DiskUsage, HealthStatus, Partition, PartitionFailure, PartitionStatus, Report,
};
