use std::path::{Path, PathBuf};

use crate::utils::errors::{ResultTrait, ResultWithError};

pub const CONFIG_FILE_NAME: &str = "provisioner.yaml";

pub struct DirUtils;

impl DirUtils {
    pub fn curr_dir() -> ResultWithError<PathBuf> {
        std::env::current_dir().auto_err("Could not read current directory")
    }

    /// Build file location: the explicit path if given, else `provisioner.yaml` in the current directory.
    pub fn config_path(explicit: Option<&Path>) -> ResultWithError<PathBuf> {
        match explicit {
            Some(path) if path.is_absolute() => Ok(path.to_path_buf()),
            Some(path) => Ok(Self::curr_dir()?.join(path)),
            None => Ok(Self::curr_dir()?.join(CONFIG_FILE_NAME)),
        }
    }

    /// Resolves `path` against `base`, expanding a leading `~/` to the home directory.
    pub fn resolve(base: &Path, path: &Path) -> ResultWithError<PathBuf> {
        if let Ok(rest) = path.strip_prefix("~") {
            let home = dirs::home_dir().ok_or("Could not determine home directory")?;
            return Ok(home.join(rest));
        }

        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(base.join(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_against_base() {
        let base = Path::new("/work/plugin");
        assert_eq!(
            DirUtils::resolve(base, Path::new("libs")).unwrap(),
            PathBuf::from("/work/plugin/libs")
        );
        assert_eq!(
            DirUtils::resolve(base, Path::new("/opt/libs")).unwrap(),
            PathBuf::from("/opt/libs")
        );
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            DirUtils::resolve(Path::new("/work"), Path::new("~/cache/libs")).unwrap(),
            home.join("cache/libs")
        );
    }

    #[test]
    fn default_config_lives_in_current_dir() {
        let path = DirUtils::config_path(None).unwrap();
        assert_eq!(path, DirUtils::curr_dir().unwrap().join(CONFIG_FILE_NAME));
    }
}
