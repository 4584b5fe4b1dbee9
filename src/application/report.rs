use std::fmt::Write as _;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::domain::{MonitorError, Report};

const JSON_INDENT: &[u8] = b"    ";

/// Mise en forme du document JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// Indentation de 4 espaces.
    #[default]
    Pretty,
    /// Une seule ligne.
    Compact,
}

/// Sérialise le rapport en JSON.
pub fn render_json(report: &Report, style: JsonStyle) -> Result<String, MonitorError> {
    let map_err = |e: serde_json::Error| MonitorError::System(format!("json: {e}"));
    match style {
        JsonStyle::Compact => serde_json::to_string(report).map_err(map_err),
        JsonStyle::Pretty => {
            let mut buf = Vec::new();
            let mut ser =
                Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
            report.serialize(&mut ser).map_err(map_err)?;
            String::from_utf8(buf).map_err(|e| MonitorError::System(format!("utf8: {e}")))
        }
    }
}

/// Résumé lisible : une ligne par partition, puis les échecs.
pub fn render_summary(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} UTC)", report.partitions_key(), report.timestamp);
    let _ = writeln!(
        out,
        "{:<20} {:<13} {:>8} {:>8} {:>8} {:>5}",
        "DEVICE", "STATUS", "SIZE", "USED", "AVAIL", "USE%"
    );
    if report.partitions.is_empty() && report.failures.is_empty() {
        let _ = writeln!(out, "(aucune partition {} trouvée)", report.fs_type);
    }
    for p in &report.partitions {
        let du = &p.disk_usage;
        let _ = writeln!(
            out,
            "{:<20} {:<13} {:>8} {:>8} {:>8} {:>5}",
            p.device, p.status, du.size, du.used, du.available, du.usage_percent
        );
    }
    for f in &report.failures {
        let _ = writeln!(out, "{:<20} ÉCHEC ({}): {}", f.device, f.command, f.error);
    }
    out
}
