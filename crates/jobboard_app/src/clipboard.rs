//! Share-link clipboard: OSC 52 escape on a terminal, a text file otherwise.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jobboard_logging::{board_debug, board_warn};

pub const SHARE_LINK_FILENAME: &str = "share_link.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyMethod {
    Terminal,
    File(PathBuf),
}

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> anyhow::Result<CopyMethod>;
}

/// Escape sequence asking the terminal to put `text` on the system clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

#[derive(Debug, Clone)]
pub struct TerminalClipboard {
    fallback_dir: PathBuf,
    use_osc52: bool,
}

impl TerminalClipboard {
    /// Uses OSC 52 when stdout is a terminal.
    pub fn new(fallback_dir: impl Into<PathBuf>) -> Self {
        Self {
            fallback_dir: fallback_dir.into(),
            use_osc52: io::stdout().is_terminal(),
        }
    }

    pub fn file_only(fallback_dir: impl Into<PathBuf>) -> Self {
        Self {
            fallback_dir: fallback_dir.into(),
            use_osc52: false,
        }
    }

    pub fn fallback_path(&self) -> PathBuf {
        self.fallback_dir.join(SHARE_LINK_FILENAME)
    }

    fn write_fallback(&self, text: &str) -> anyhow::Result<PathBuf> {
        ensure_dir(&self.fallback_dir)?;
        let path = self.fallback_path();
        fs::write(&path, format!("{text}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

impl Clipboard for TerminalClipboard {
    fn copy(&self, text: &str) -> anyhow::Result<CopyMethod> {
        if self.use_osc52 {
            let mut stdout = io::stdout();
            match stdout
                .write_all(osc52_sequence(text).as_bytes())
                .and_then(|()| stdout.flush())
            {
                Ok(()) => {
                    board_debug!("Copied {} byte(s) via OSC 52", text.len());
                    return Ok(CopyMethod::Terminal);
                }
                Err(err) => board_warn!("OSC 52 copy failed: {}", err),
            }
        }
        let path = self.write_fallback(text)?;
        board_debug!("Share link written to {:?}", path);
        Ok(CopyMethod::File(path))
    }
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))
}
