use crate::cli_opts::Opts;
use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

const CONFIG_MAX_BYTES: u64 = 1_048_576; // 1 MiB

/// Charge le fichier --config après contrôle du chemin.
///
/// Le fichier désigne des programmes lancés via sudo : il doit être un fichier
/// régulier, raisonnablement petit et non modifiable par un autre utilisateur.
pub(crate) fn load_config(opts: &Opts) -> Result<Option<ext4_monitor::MonitorConfig>> {
    if let Some(path) = &opts.config {
        let canon = validate_config_path(path, opts.config_allow_symlink)?;
        let cfg = ext4_monitor::load_config_from_path(&canon).context("chargement config TOML")?;
        Ok(Some(cfg))
    } else {
        Ok(None)
    }
}

fn validate_config_path(p: &Path, allow_symlink: bool) -> Result<PathBuf> {
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        bail!("--config: chemins relatifs contenant `..` refusés.");
    }

    let p = expand_home_if_needed(p.to_path_buf());

    // lstat : détecter le symlink sans le suivre
    let lmd =
        fs::symlink_metadata(&p).with_context(|| format!("read metadata: {}", p.display()))?;
    if lmd.file_type().is_symlink() && !allow_symlink {
        bail!("--config ne doit pas être un lien symbolique (utilisez --config-allow-symlink si vous assumez).");
    }

    let canon = p
        .canonicalize()
        .with_context(|| format!("canonicalize: {}", p.display()))?;

    let md = fs::metadata(&canon)?;
    if !md.is_file() {
        bail!("--config doit pointer vers un fichier régulier.");
    }
    if md.len() > CONFIG_MAX_BYTES {
        bail!("fichier --config trop volumineux (> 1 MiB).");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if (md.mode() & 0o022) != 0 {
            bail!("--config modifiable par le groupe ou les autres: refusé (chmod go-w).");
        }
        if let Some(parent) = canon.parent() {
            if let Ok(pmd) = fs::metadata(parent) {
                let m = pmd.mode();
                let world_w = (m & 0o002) != 0;
                let sticky = (m & 0o1000) != 0;
                if world_w && !sticky {
                    bail!("répertoire parent du --config monde-écrivable sans sticky: refusé.");
                }
            }
        }
    }

    Ok(canon)
}

fn expand_home_if_needed(p: PathBuf) -> PathBuf {
    if let Some(s) = p.to_str() {
        if let Some(rest) = s.strip_prefix("~/") {
            if let Ok(home) = env::var("HOME") {
                return Path::new(&home).join(rest);
            }
        }
    }
    p
}
