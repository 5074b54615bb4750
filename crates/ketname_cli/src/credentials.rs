//! API key storage in `~/.ketname/env`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ketname_core::{CredentialError, CredentialStore};

pub const API_KEY_VAR: &str = "KETNAME_API_KEY";

/// `~/.ketname/env`
pub fn default_env_path() -> Result<PathBuf, CredentialError> {
    let home = dirs::home_dir()
        .ok_or_else(|| CredentialError::Unavailable("could not find home directory".into()))?;
    Ok(home.join(".ketname").join("env"))
}

/// Reads the key from the environment first, then the env file. Writes
/// go to the env file as `export KETNAME_API_KEY="..."`.
pub struct EnvFileCredentialStore {
    path: PathBuf,
    env_value: Option<String>,
}

impl EnvFileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_value: None,
        }
    }

    /// Store at the default path, seeded with `KETNAME_API_KEY` if set.
    pub fn from_env() -> Result<Self, CredentialError> {
        let mut store = Self::new(default_env_path()?);
        store.env_value = std::env::var(API_KEY_VAR).ok();
        Ok(store)
    }

    #[cfg(test)]
    pub fn with_env_value(mut self, value: Option<String>) -> Self {
        self.env_value = value;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for EnvFileCredentialStore {
    async fn get(&self) -> Result<Option<String>, CredentialError> {
        if let Some(value) = self.env_value.as_ref().filter(|v| !v.is_empty()) {
            return Ok(Some(value.clone()));
        }
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(read_exports(&contents)
                .remove(API_KEY_VAR)
                .filter(|v| !v.is_empty())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, credential: &str) -> Result<(), CredentialError> {
        if credential.chars().any(|c| c.is_control() || c == '`') {
            return Err(CredentialError::Invalid(
                "contains control characters or backticks".into(),
            ));
        }
        save_export(&self.path, API_KEY_VAR, credential)?;
        tracing::info!(path = %self.path.display(), "stored API key");
        Ok(())
    }
}

/// `export KEY=value` lines. Double-quoted values are unescaped.
fn read_exports(contents: &str) -> BTreeMap<String, String> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim().strip_prefix("export ")?;
            let (key, value) = line.split_once('=')?;
            Some((key.trim().to_string(), unquote(value.trim())))
        })
        .collect()
}

fn unquote(value: &str) -> String {
    let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) else {
        return value.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match (c, chars.clone().next()) {
            ('\\', Some(next @ ('\\' | '"' | '$'))) => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Quote for both `source` in a POSIX shell and dotenv parsing.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Set one export in the env file, keeping the others.
fn save_export(path: &Path, var: &str, value: &str) -> io::Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err),
    };

    let mut exports = read_exports(&existing);
    exports.insert(var.to_string(), value.to_string());

    let mut content = String::new();
    content.push_str("# ketname configuration\n");
    content.push_str("# Source this file: source ~/.ketname/env\n\n");
    for (key, value) in &exports {
        content.push_str(&format!("export {key}={}\n", quote(value)));
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, content)?;
    restrict_permissions(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// `abcd...wxyz` for display; short keys are fully masked.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = EnvFileCredentialStore::new(dir.path().join(".ketname/env"));

        assert_eq!(store.get().await.unwrap(), None);
        store.set("AIza-secret").await.unwrap();
        assert_eq!(store.get().await.unwrap().as_deref(), Some("AIza-secret"));

        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("export KETNAME_API_KEY=\"AIza-secret\""));
    }

    #[tokio::test]
    async fn test_other_exports_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env");
        fs::write(&path, "export KETNAME_MODEL=\"gemini-2.5-pro\"\nexport KETNAME_API_KEY=old\n")
            .unwrap();

        EnvFileCredentialStore::new(&path).set("new").await.unwrap();

        let exports = read_exports(&fs::read_to_string(&path).unwrap());
        assert_eq!(exports.get("KETNAME_MODEL").map(String::as_str), Some("gemini-2.5-pro"));
        assert_eq!(exports.get(API_KEY_VAR).map(String::as_str), Some("new"));
    }

    #[tokio::test]
    async fn test_environment_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env");
        fs::write(&path, "export KETNAME_API_KEY=\"from-file\"\n").unwrap();

        let store = EnvFileCredentialStore::new(&path).with_env_value(Some("from-env".into()));
        assert_eq!(store.get().await.unwrap().as_deref(), Some("from-env"));

        let store = EnvFileCredentialStore::new(&path).with_env_value(Some(String::new()));
        assert_eq!(store.get().await.unwrap().as_deref(), Some("from-file"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let store = EnvFileCredentialStore::new(dir.path().join("env"));
        store.set("k").await.unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_special_characters_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = EnvFileCredentialStore::new(dir.path().join("env"));
        let key = r#"ab"c\d$HOME"#;

        store.set(key).await.unwrap();
        assert_eq!(store.get().await.unwrap().as_deref(), Some(key));

        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.contains(r#"export KETNAME_API_KEY="ab\"c\\d\$HOME""#));
        let parsed: Vec<(String, String)> = dotenvy::from_read_iter(written.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(parsed.contains(&(API_KEY_VAR.to_string(), key.to_string())));
    }

    #[tokio::test]
    async fn test_multiline_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = EnvFileCredentialStore::new(dir.path().join("env"));
        let err = store.set("abc\nexport X=1").await.unwrap_err();
        assert!(matches!(err, CredentialError::Invalid(_)));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key("AIzaSyExampleKey1234"), "AIza...1234");
    }
}
