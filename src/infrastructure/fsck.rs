use crate::domain::{FsckConfig, HealthStatus, MonitorError};
use crate::infrastructure::command::{run_checked, CommandRunner};

pub(crate) const COMMAND: &str = "fsck";

/// Construit `[sudo] fsck <args> <device>`.
pub(crate) fn invocation(cfg: &FsckConfig, device: &str) -> (String, Vec<String>) {
    let mut args = Vec::with_capacity(cfg.args.len() + 2);
    let program = if cfg.sudo {
        args.push(cfg.program.clone());
        "sudo".to_string()
    } else {
        cfg.program.clone()
    };
    args.extend(cfg.args.iter().cloned());
    args.push(device.to_string());
    (program, args)
}

/// Lance la vérification non destructive et retourne sa sortie brute.
pub(crate) fn run_check<R: CommandRunner + ?Sized>(
    runner: &R,
    cfg: &FsckConfig,
    device: &str,
) -> Result<String, MonitorError> {
    let (program, args) = invocation(cfg, device);
    let output = run_checked(runner, device, COMMAND, &program, &args)?;
    Ok(output.combined())
}

pub(crate) fn classify(output: &str, clean_marker: &str) -> HealthStatus {
    if output.contains(clean_marker) {
        HealthStatus::Healthy
    } else {
        HealthStatus::NeedsRepair
    }
}
