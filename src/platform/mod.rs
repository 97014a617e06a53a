mod command;
mod errors;

pub use command::{CommandPlatform, CommandSpec};
pub use errors::PlatformError;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// OS and third-party integrations. Core modules never call these; only
/// the CLI layer does, through whichever implementation it was handed.
pub trait PlatformService {
    fn deploy(&self, dir: &Path) -> Result<(), PlatformError>;
    fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError>;
    fn open_in_browser(&self, path: &Path) -> Result<(), PlatformError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Deploy(PathBuf),
    Clipboard(String),
    Open(PathBuf),
}

/// Records calls instead of running anything. Used for `--dry-run` and tests.
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<PlatformCall>>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn push(&self, call: PlatformCall) {
        tracing::info!(?call, "Platform call skipped (dry run)");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl PlatformService for RecordingPlatform {
    fn deploy(&self, dir: &Path) -> Result<(), PlatformError> {
        self.push(PlatformCall::Deploy(dir.to_path_buf()));
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        self.push(PlatformCall::Clipboard(text.to_string()));
        Ok(())
    }

    fn open_in_browser(&self, path: &Path) -> Result<(), PlatformError> {
        self.push(PlatformCall::Open(path.to_path_buf()));
        Ok(())
    }
}
