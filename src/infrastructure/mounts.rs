use std::collections::HashSet;
use std::fs;

use sysinfo::Disks;
use tracing::debug;

use crate::domain::Partition;

const MOUNTINFO: &str = "/proc/self/mountinfo";

/// Entrée brute d'une table des montages : (source, point de montage, type de FS).
type MountEntry = (String, String, String);

/// Partitions montées de type `fs_type`, dans l'ordre de la table des montages.
///
/// Sans `/proc/self/mountinfo` (hors Linux), la liste vient de sysinfo.
pub(crate) fn list_partitions(fs_type: &str) -> Vec<Partition> {
    match fs::read_to_string(MOUNTINFO) {
        Ok(txt) => partitions_from_mountinfo(&txt, fs_type),
        Err(err) => {
            debug!(path = MOUNTINFO, error = %err, "mountinfo unavailable, using sysinfo");
            partitions_from_sysinfo(fs_type)
        }
    }
}

/// Filtre par type de FS, écarte les sources vides/`none` et ne garde que le
/// premier point de montage de chaque périphérique.
fn select_partitions<I>(entries: I, fs_type: &str) -> Vec<Partition>
where
    I: IntoIterator<Item = MountEntry>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for (device, mount_point, fstype) in entries {
        if fstype != fs_type || device.is_empty() || device == "none" {
            continue;
        }
        if seen.insert(device.clone()) {
            out.push(Partition {
                device,
                mount_point,
                fs_type: fstype,
            });
        }
    }
    out
}

fn partitions_from_mountinfo(content: &str, fs_type: &str) -> Vec<Partition> {
    let entries = content.lines().filter_map(|line| {
        // format: ID parent maj:min root mount_point opts [optional...] - fstype source superopts
        let (left, right) = line.split_once(" - ")?;
        let mount_point = left.split_whitespace().nth(4)?;
        let mut r = right.split_whitespace();
        let fstype = r.next()?;
        let source = r.next()?;
        Some((
            unescape_mount_field(source),
            unescape_mount_field(mount_point),
            fstype.to_string(),
        ))
    });
    select_partitions(entries, fs_type)
}

/// Décode les séquences octales du noyau (`\040` pour l'espace, etc.).
fn unescape_mount_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = &bytes[i + 1..i + 4];
            if digits.iter().all(|b| (b'0'..=b'7').contains(b)) {
                let value = digits
                    .iter()
                    .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
                if let Ok(byte) = u8::try_from(value) {
                    out.push(byte);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn partitions_from_sysinfo(fs_type: &str) -> Vec<Partition> {
    let disks = Disks::new_with_refreshed_list();
    let entries = disks.list().iter().map(|d| {
        (
            d.name().to_string_lossy().into_owned(),
            d.mount_point().to_string_lossy().into_owned(),
            d.file_system().to_string_lossy().into_owned(),
        )
    });
    select_partitions(entries, fs_type)
}

#[cfg(any(test, feature = "internals"))]
pub fn partitions_from_mountinfo_for_tests(content: &str, fs_type: &str) -> Vec<Partition> {
    partitions_from_mountinfo(content, fs_type)
}
