//! Path handling for the Zellij sandbox.
//!
//! Inside the sandbox the host's home directory is reachable as `/host`, so
//! configured paths such as `~/relief.json` must be rewritten before the
//! worker can open them.

use std::path::{Path, PathBuf};

/// Returns the plugin's data directory.
///
/// Resolves to `/host/.local/share/zellij/reliefboard`, i.e.
/// `~/.local/share/zellij/reliefboard` on the host when Zellij was started
/// from the home directory. Span logs and relative dataset paths live here.
///
/// # Examples
///
/// ```
/// use reliefboard::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/reliefboard");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("reliefboard")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// # Examples
///
/// ```
/// use reliefboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/relief.json"), "/host/relief.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Resolves the configured `data_file` to a sandbox path.
///
/// Tilde paths map under `/host`; other relative paths are taken relative to
/// [`get_data_dir`].
///
/// # Parameters
///
/// * `file` - The `data_file` option as written; surrounding whitespace is
///   ignored
///
/// # Returns
///
/// An absolute path inside the sandbox
///
/// # Examples
///
/// ```
/// use reliefboard::infrastructure::resolve_data_file;
/// use std::path::PathBuf;
///
/// assert_eq!(resolve_data_file("~/relief.json"), PathBuf::from("/host/relief.json"));
/// assert_eq!(
///     resolve_data_file("flood.json"),
///     PathBuf::from("/host/.local/share/zellij/reliefboard/flood.json")
/// );
/// ```
#[must_use]
pub fn resolve_data_file(file: &str) -> PathBuf {
    let expanded = expand_tilde(file.trim());
    if Path::new(&expanded).is_absolute() {
        PathBuf::from(expanded)
    } else {
        get_data_dir().join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_data_file_is_kept() {
        assert_eq!(
            resolve_data_file(" /tmp/relief.json "),
            PathBuf::from("/tmp/relief.json")
        );
    }

    #[test]
    fn test_tilde_without_slash_is_relative() {
        assert_eq!(expand_tilde("~user/data"), "~user/data");
        assert_eq!(
            resolve_data_file("~user/data"),
            get_data_dir().join("~user/data")
        );
    }
}
