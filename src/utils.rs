use std::io;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "netatmo_station";
const TOKEN_FILE_NAME: &str = "netatmo_tokens.json";

pub fn default_token_path() -> io::Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(TOKEN_FILE_NAME))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine user config directory",
            )
        })
}

pub async fn ensure_parent_dir_exists(path: &Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    match tokio::fs::metadata(parent).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!(
                        "Token path parent exists but is not a directory: {}",
                        parent.display()
                    ),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => tokio::fs::create_dir_all(parent).await,
        Err(e) => Err(e),
    }
}
