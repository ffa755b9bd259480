use std::path::{Path, PathBuf};

pub struct QuillPaths {
    pub quill_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

/// Find the `.quill/` directory for `start_dir`.
///
/// Walks up from `start_dir` first, then falls back to `<config_dir>/quill`.
pub fn discover(start_dir: &Path) -> QuillPaths {
    let dir = walk_ancestors(start_dir).or_else(system_config_dir);

    match dir {
        Some(d) => {
            tracing::info!("using quill directory: {}", d.display());
            let config = d.join("config.toml");
            QuillPaths {
                config_path: config.is_file().then_some(config),
                quill_dir: Some(d),
            }
        },
        None => {
            tracing::debug!("no .quill directory found");
            QuillPaths {
                quill_dir: None,
                config_path: None,
            }
        },
    }
}

fn walk_ancestors(start_dir: &Path) -> Option<PathBuf> {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(".quill");
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}

fn system_config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("quill");
    if dir.is_dir() {
        Some(dir)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn finds_config_in_ancestor() {
        let tmp_dir = tempdir().unwrap();
        let quill_dir = tmp_dir.path().join(".quill");
        std::fs::create_dir(&quill_dir).unwrap();
        std::fs::write(quill_dir.join("config.toml"), "").unwrap();
        let nested = tmp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let paths = discover(&nested);
        assert_eq!(paths.quill_dir.as_deref(), Some(quill_dir.as_path()));
        assert_eq!(
            paths.config_path.as_deref(),
            Some(quill_dir.join("config.toml").as_path())
        );
    }

    #[test]
    fn quill_dir_without_config_file() {
        let tmp_dir = tempdir().unwrap();
        let quill_dir = tmp_dir.path().join(".quill");
        std::fs::create_dir(&quill_dir).unwrap();

        let paths = discover(tmp_dir.path());
        assert_eq!(paths.quill_dir.as_deref(), Some(quill_dir.as_path()));
        assert!(paths.config_path.is_none());
    }
}
