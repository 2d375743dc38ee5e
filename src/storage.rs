//! Session token cache. The only state this app persists.

use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

use crate::errors::AppError;
use crate::session::SessionContext;

pub fn resolve_session_path() -> PathBuf {
    if let Ok(path) = env::var("DEALFLOW_SESSION_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/session.json")
}

/// A missing or unreadable cache is not an error; the caller falls back to a
/// fresh login.
pub async fn load_session(path: &Path) -> Option<SessionContext> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(session) => Some(session),
            Err(err) => {
                error!("failed to parse session file: {err}");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!("failed to read session file: {err}");
            None
        }
    }
}

pub async fn persist_session(path: &Path, session: &SessionContext) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(session).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
