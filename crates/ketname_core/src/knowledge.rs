//! Domain knowledge: project documents appended to every prompt.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Where domain-knowledge documents are read from.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    async fn read(&self, path: &Path) -> io::Result<String>;
}

/// Reads documents from the local filesystem as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsKnowledgeSource;

#[async_trait]
impl KnowledgeSource for FsKnowledgeSource {
    async fn read(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeReadFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Concatenated document text plus the documents that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainKnowledge {
    pub text: String,
    pub failures: Vec<KnowledgeReadFailure>,
}

/// Absolute paths are kept; relative ones are joined onto `root`.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Read every path in order, appending each document followed by a newline.
///
/// A failed read is recorded in `failures` and contributes nothing; the
/// remaining paths are still read.
pub async fn load_domain_knowledge(
    source: &dyn KnowledgeSource,
    paths: &[PathBuf],
    root: &Path,
) -> DomainKnowledge {
    let mut knowledge = DomainKnowledge::default();

    for path in paths {
        let resolved = resolve_path(root, path);
        match source.read(&resolved).await {
            Ok(content) => {
                tracing::debug!(path = %resolved.display(), bytes = content.len(), "loaded domain knowledge");
                knowledge.text.push_str(&content);
                knowledge.text.push('\n');
            }
            Err(err) => {
                tracing::warn!(path = %resolved.display(), error = %err, "failed to read domain knowledge");
                knowledge.failures.push(KnowledgeReadFailure {
                    path: resolved,
                    message: err.to_string(),
                });
            }
        }
    }

    knowledge
}
