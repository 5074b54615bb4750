//! A file on disk as the active document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use ketname_core::{EditError, EditorSurface};

use crate::cli::LineRange;

pub struct FileEditor {
    path: PathBuf,
    text: String,
    selection: Option<String>,
}

impl FileEditor {
    /// Read `path`; `lines` picks the selection.
    pub fn open(path: &Path, lines: Option<LineRange>) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let selection = match lines {
            Some(range) => Some(select_lines(&text, range)?),
            None => None,
        };
        Ok(Self {
            path: path.to_path_buf(),
            text,
            selection,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Lines `range.start..=range.end` without the final line break.
fn select_lines(text: &str, range: LineRange) -> Result<String> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    if range.end > lines.len() {
        bail!(
            "Line range {range} is outside the file ({} lines)",
            lines.len()
        );
    }
    let selected = lines[range.start - 1..range.end].concat();
    let selected = selected
        .strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(&selected);
    Ok(selected.to_string())
}

#[async_trait]
impl EditorSurface for FileEditor {
    fn document_text(&self) -> String {
        self.text.clone()
    }

    fn selection_text(&self) -> Option<String> {
        self.selection.clone()
    }

    /// Write to a sibling temp file, then rename over the original.
    async fn replace_document(&self, new_text: &str) -> Result<(), EditError> {
        let target = self.path.display().to_string();
        let io_err = |source: std::io::Error| EditError::Io {
            target: target.clone(),
            source,
        };

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| EditError::Rejected(format!("{target} is not a file")))?;
        let mut temp_name = std::ffi::OsString::from(".");
        temp_name.push(file_name);
        temp_name.push(".ketname.tmp");
        let temp_path = self.path.with_file_name(temp_name);

        tokio::fs::write(&temp_path, new_text).await.map_err(io_err)?;
        if let Ok(metadata) = tokio::fs::metadata(&self.path).await {
            // Keep the original mode bits.
            let copied = tokio::fs::set_permissions(&temp_path, metadata.permissions()).await;
            if let Err(err) = copied {
                tracing::warn!(path = %target, error = %err, "could not copy file permissions");
            }
        }
        if let Err(err) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(io_err(err));
        }
        tracing::debug!(path = %target, bytes = new_text.len(), "document replaced");
        Ok(())
    }
}
