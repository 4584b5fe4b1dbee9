use serde::Deserialize;

/// Configuration haut-niveau.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Type de système de fichiers à surveiller (ex: "ext4").
    pub fs_type: String,
    /// Restreint la vérification à ces périphériques (vide = tous).
    pub devices: Vec<String>,
    /// Interrompt l'exécution à la première partition en échec.
    pub fail_fast: bool,
    /// Vérification de cohérence (non destructive).
    pub fsck: FsckConfig,
    /// Requête d'usage disque.
    pub df: DfConfig,
    /// Paramètres runtime (logging).
    pub runtime: Option<RuntimeConfig>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            fs_type: "ext4".into(),
            devices: Vec::new(),
            fail_fast: false,
            fsck: FsckConfig::default(),
            df: DfConfig::default(),
            runtime: None,
        }
    }
}

/// Invocation de `fsck`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FsckConfig {
    pub program: String,
    /// Arguments placés avant le périphérique. Doivent rester en lecture seule.
    pub args: Vec<String>,
    /// Préfixe la commande par `sudo`.
    pub sudo: bool,
    /// Marqueur recherché dans la sortie pour conclure à un FS sain.
    pub clean_marker: String,
}

impl Default for FsckConfig {
    fn default() -> Self {
        Self {
            program: "fsck".into(),
            args: vec!["-n".into()],
            sudo: true,
            clean_marker: "clean".into(),
        }
    }
}

/// Invocation de `df`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DfConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for DfConfig {
    fn default() -> Self {
        Self {
            program: "df".into(),
            args: vec!["-h".into(), "--output=size,used,avail,pcent".into()],
        }
    }
}

/// Paramètres runtime supplémentaires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Valeur à appliquer pour la variable d'environnement RUST_LOG.
    pub rust_log: Option<String>,
}
