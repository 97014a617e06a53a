use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info, instrument};

use super::{PlatformError, PlatformService};

/// Program plus arguments, resolved before anything is spawned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

/// Shells out to the hosting CLI and the OS clipboard/browser helpers
#[derive(Debug, Clone)]
pub struct CommandPlatform {
    os: String,
    deploy_message: String,
}

impl Default for CommandPlatform {
    fn default() -> Self {
        Self::for_os(std::env::consts::OS)
    }
}

impl CommandPlatform {
    pub fn for_os(os: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            deploy_message: "Update match reports".to_string(),
        }
    }

    pub fn deploy_command(&self, dir: &Path) -> CommandSpec {
        CommandSpec::new("npx", &["netlify", "deploy", "--prod"])
            .arg(format!("--dir={}", dir.display()))
            .arg(format!("--message={}", self.deploy_message))
    }

    pub fn clipboard_command(&self) -> Result<CommandSpec, PlatformError> {
        match self.os.as_str() {
            "macos" => Ok(CommandSpec::new("pbcopy", &[])),
            "windows" => Ok(CommandSpec::new("clip", &[])),
            "linux" | "freebsd" | "openbsd" | "netbsd" => {
                Ok(CommandSpec::new("xclip", &["-selection", "clipboard"]))
            }
            other => Err(PlatformError::Unsupported {
                action: "clipboard",
                os: other.to_string(),
            }),
        }
    }

    pub fn open_command(&self, path: &Path) -> Result<CommandSpec, PlatformError> {
        let target = path.display().to_string();
        match self.os.as_str() {
            "macos" => Ok(CommandSpec::new("open", &[]).arg(target)),
            "windows" => Ok(CommandSpec::new("cmd", &["/C", "start", ""]).arg(target)),
            "linux" | "freebsd" | "openbsd" | "netbsd" => {
                Ok(CommandSpec::new("xdg-open", &[]).arg(target))
            }
            other => Err(PlatformError::Unsupported {
                action: "open",
                os: other.to_string(),
            }),
        }
    }
}

fn run(spec: &CommandSpec) -> Result<(), PlatformError> {
    debug!(program = %spec.program, args = ?spec.args, "Running command");
    let status = spec
        .command()
        .status()
        .map_err(|source| PlatformError::Spawn {
            program: spec.program.clone(),
            source,
        })?;
    check_status(spec, status)
}

fn check_status(spec: &CommandSpec, status: std::process::ExitStatus) -> Result<(), PlatformError> {
    if status.success() {
        Ok(())
    } else {
        Err(PlatformError::Failed {
            program: spec.program.clone(),
            status: status.to_string(),
        })
    }
}

impl PlatformService for CommandPlatform {
    #[instrument(skip(self))]
    fn deploy(&self, dir: &Path) -> Result<(), PlatformError> {
        run(&self.deploy_command(dir))?;
        info!(dir = %dir.display(), "Deployed");
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        let spec = self.clipboard_command()?;
        let spawn_err = |source| PlatformError::Spawn {
            program: spec.program.clone(),
            source,
        };

        let mut child = spec
            .command()
            .stdin(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(spawn_err)?;
        }
        let status = child.wait().map_err(spawn_err)?;
        check_status(&spec, status)?;

        info!(bytes = text.len(), "Copied to clipboard");
        Ok(())
    }

    #[instrument(skip(self))]
    fn open_in_browser(&self, path: &Path) -> Result<(), PlatformError> {
        run(&self.open_command(path)?)
    }
}
