use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::{Session, SessionError, SessionResult, SessionStore};

/// Session persisted as a small TOML file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> SessionResult<Option<Session>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        let session: Session =
            toml::from_str(&content).map_err(|e| SessionError::Parse(e.to_string()))?;
        debug!(path = %self.path.display(), "Loaded persisted session");
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> SessionResult<()> {
        let content =
            toml::to_string(session).map_err(|e| SessionError::Encode(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.path, content).await?;
        Ok(())
    }

    async fn clear(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
