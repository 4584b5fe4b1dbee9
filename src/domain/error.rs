use std::io;

use thiserror::Error;

/// Erreurs possibles de la bibliothèque.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Erreur liée au système (sérialisation, I/O).
    #[error("system error: {0}")]
    System(String),

    /// Impossible de lancer la commande externe (binaire absent, permissions…).
    #[error("failed to run {command} on {device}: {source}")]
    Spawn {
        device: String,
        command: String,
        #[source]
        source: io::Error,
    },

    /// La commande externe a retourné un code de sortie non nul.
    #[error("error running {command} on {device} ({status}): {output}")]
    CommandFailed {
        device: String,
        command: String,
        status: String,
        output: String,
    },

    /// Sortie de commande inexploitable (ex: `df` sans ligne de données).
    #[error("cannot parse {command} output for {device}: {reason}")]
    Parse {
        device: String,
        command: String,
        reason: String,
    },

    /// Périphérique demandé absent de la table des montages pour ce type de FS.
    #[error("{device} is not a mounted {fs_type} partition")]
    NotMounted { device: String, fs_type: String },

    /// Erreur de config.
    #[error("config error: {0}")]
    Config(String),
}

impl MonitorError {
    /// Périphérique concerné, pour les erreurs rattachées à une partition.
    pub fn device(&self) -> Option<&str> {
        match self {
            Self::Spawn { device, .. }
            | Self::CommandFailed { device, .. }
            | Self::Parse { device, .. }
            | Self::NotMounted { device, .. } => Some(device),
            Self::System(_) | Self::Config(_) => None,
        }
    }

    /// Étape en cause : commande externe (`fsck`, `df`) ou `mount` pour la
    /// recherche dans la table des montages.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Spawn { command, .. }
            | Self::CommandFailed { command, .. }
            | Self::Parse { command, .. } => Some(command),
            Self::NotMounted { .. } => Some("mount"),
            Self::System(_) | Self::Config(_) => None,
        }
    }
}
