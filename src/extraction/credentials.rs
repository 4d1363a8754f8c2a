//! API key storage (file-based with keyring mirror)

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

const KEYRING_SERVICE: &str = "cardbox";
const KEYRING_KEY: &str = "openai_api_key";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("API key cannot be empty")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stored-credential manager. The file under the data directory is
/// authoritative; the OS keyring is a best-effort mirror.
pub struct ApiKeyStore {
    data_dir: PathBuf,
}

impl ApiKeyStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn key_file_path(&self) -> PathBuf {
        self.data_dir.join(".credentials").join("openai")
    }

    pub fn set(&self, key: &str) -> Result<(), CredentialError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty);
        }

        let path = self.key_file_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, key)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o600));
        }

        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_KEY) {
            let _ = entry.set_password(key);
        }

        Ok(())
    }

    /// File first, then keyring. Absent is `None`, never an error; the
    /// pipeline turns `None` into its missing-credential failure.
    pub fn get(&self) -> Option<String> {
        if let Ok(data) = fs::read_to_string(self.key_file_path()) {
            let data = data.trim();
            if !data.is_empty() {
                return Some(data.to_string());
            }
        }

        keyring::Entry::new(KEYRING_SERVICE, KEYRING_KEY)
            .ok()
            .and_then(|entry| entry.get_password().ok())
            .filter(|key| !key.is_empty())
    }

    pub fn clear(&self) -> Result<(), CredentialError> {
        let path = self.key_file_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }

        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_KEY) {
            let _ = entry.delete_credential();
        }

        Ok(())
    }
}
