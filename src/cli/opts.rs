use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ext4-monitor",
    version,
    about = "Vérifie les partitions ext4 (fsck -n + df) et produit un rapport JSON"
)]
pub(crate) struct Opts {
    /// Type de système de fichiers à surveiller (défaut: ext4, ou valeur du fichier de config)
    #[arg(long = "fs-type", value_name = "TYPE")]
    pub(crate) fs_type: Option<String>,

    /// Limite la vérification à ce périphérique (peut être répété, ex: /dev/sda1)
    #[arg(long = "device", value_name = "DEV", action = ArgAction::Append)]
    pub(crate) devices: Vec<String>,

    /// Fichier de config TOML (feature `config`)
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Autorise que --config soit un lien symbolique (par défaut: refusé)
    #[arg(long = "config-allow-symlink", action = ArgAction::SetTrue, requires = "config")]
    pub(crate) config_allow_symlink: bool,

    /// Interrompt à la première partition en échec (sinon l'échec est consigné et on continue)
    #[arg(long = "fail-fast", action = ArgAction::SetTrue)]
    pub(crate) fail_fast: bool,

    /// Lance fsck sans sudo (déjà root, ou droits délégués autrement)
    #[arg(long = "no-sudo", action = ArgAction::SetTrue)]
    pub(crate) no_sudo: bool,

    /// JSON sur une seule ligne
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "summary")]
    pub(crate) compact: bool,

    /// Affiche un tableau lisible au lieu du JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub(crate) summary: bool,
}
