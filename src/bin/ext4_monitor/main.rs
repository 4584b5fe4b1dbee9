#![forbid(unsafe_code)]

use std::process::ExitCode;

#[cfg(not(feature = "config"))]
use anyhow::bail;
use anyhow::{Context, Result};
use clap::Parser;
use ext4_monitor::{Monitor, MonitorConfig};
use tracing::debug;

#[path = "../../cli/opts.rs"]
mod cli_opts;
#[cfg(feature = "config")]
mod config_guard;
mod output;

use cli_opts::Opts;

fn main() -> Result<ExitCode> {
    let opts = Opts::parse();

    #[cfg(feature = "config")]
    let cfg = config_guard::load_config(&opts)?.unwrap_or_default();

    #[cfg(not(feature = "config"))]
    let cfg = {
        if opts.config.is_some() {
            bail!("--config nécessite la feature `config` (cargo run --features \"cli config\").");
        }
        MonitorConfig::default()
    };

    apply_runtime_env(&cfg);
    ext4_monitor::init_logging();

    let cfg = apply_cli_overrides(cfg, &opts);
    debug!(
        fs_type = %cfg.fs_type,
        devices = ?cfg.devices,
        fail_fast = cfg.fail_fast,
        sudo = cfg.fsck.sudo,
        "effective_config"
    );

    let monitor = Monitor::new(cfg);
    let report = monitor
        .gather_report()
        .context("vérification des partitions interrompue")?;

    output::emit(&report, &opts)?;

    Ok(if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// `runtime.rust_log` du fichier de config, sauf si RUST_LOG est déjà défini.
fn apply_runtime_env(cfg: &MonitorConfig) {
    let Some(level) = cfg.runtime.as_ref().and_then(|rt| rt.rust_log.as_deref()) else {
        return;
    };
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", level);
    }
}

/// Les drapeaux CLI priment sur le fichier de config.
fn apply_cli_overrides(mut cfg: MonitorConfig, opts: &Opts) -> MonitorConfig {
    if let Some(fs_type) = &opts.fs_type {
        cfg.fs_type = fs_type.clone();
    }
    if !opts.devices.is_empty() {
        cfg.devices = opts.devices.clone();
    }
    if opts.fail_fast {
        cfg.fail_fast = true;
    }
    if opts.no_sudo {
        cfg.fsck.sudo = false;
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_config() {
        let cfg = MonitorConfig {
            fs_type: "ext3".into(),
            devices: vec!["/dev/sda1".into()],
            ..MonitorConfig::default()
        };
        let opts = Opts::try_parse_from([
            "ext4-monitor",
            "--fs-type",
            "ext4",
            "--device",
            "/dev/sdb1",
            "--device",
            "/dev/sdc1",
            "--fail-fast",
            "--no-sudo",
        ])
        .unwrap();
        let cfg = apply_cli_overrides(cfg, &opts);
        assert_eq!(cfg.fs_type, "ext4");
        assert_eq!(cfg.devices, ["/dev/sdb1", "/dev/sdc1"]);
        assert!(cfg.fail_fast);
        assert!(!cfg.fsck.sudo);
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let cfg = MonitorConfig {
            fs_type: "ext3".into(),
            fail_fast: true,
            ..MonitorConfig::default()
        };
        let opts = Opts::try_parse_from(["ext4-monitor"]).unwrap();
        let cfg = apply_cli_overrides(cfg, &opts);
        assert_eq!(cfg.fs_type, "ext3");
        assert!(cfg.fail_fast);
        assert!(cfg.fsck.sudo);
    }
}
