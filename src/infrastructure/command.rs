use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::MonitorError;

/// Sortie capturée d'une commande externe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Code de sortie (`None` si tué par un signal).
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => format!("exit status: {code}"),
            None => "terminated by signal".to_string(),
        }
    }

    /// stdout suivi de stderr, comme si les deux flux étaient fusionnés.
    pub fn combined(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len());
        out.push_str(&self.stdout);
        out.push_str(&self.stderr);
        out
    }
}

/// Exécution de commandes externes (remplaçable en test).
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// Lance réellement les processus, de façon bloquante.
///
/// stdin est fermé et `LC_ALL=C` est forcé pour que la sortie analysée ne
/// dépende pas de la locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        (**self).run(program, args)
    }
}

/// Lance `program args…` pour `device` et exige un code de sortie nul.
///
/// `command` est le nom rapporté dans les erreurs (ex: `fsck` même si la
/// commande réelle est `sudo`).
pub(crate) fn run_checked<R: CommandRunner + ?Sized>(
    runner: &R,
    device: &str,
    command: &str,
    program: &str,
    args: &[String],
) -> Result<CommandOutput, MonitorError> {
    debug!(device, command, program, args = ?args, "command_start");
    let output = runner
        .run(program, args)
        .map_err(|source| MonitorError::Spawn {
            device: device.to_string(),
            command: command.to_string(),
            source,
        })?;

    if !output.success() {
        return Err(MonitorError::CommandFailed {
            device: device.to_string(),
            command: command.to_string(),
            status: output.status_label(),
            output: output.combined().trim_end().to_string(),
        });
    }
    Ok(output)
}
