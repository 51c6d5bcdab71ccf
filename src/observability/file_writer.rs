//! Append-only JSON Lines writer with size-based rotation.
//!
//! Span records accumulate in one file; once it grows past the size limit it
//! is renamed to `<name>.jsonl.<unix-nanos>` and a fresh file is started.
//! Only the newest backups are kept so the data directory stays bounded.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size at which the active file is rotated (5 MB).
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Default number of rotated files kept.
pub const DEFAULT_MAX_BACKUPS: usize = 3;

/// Thread-safe rotating line writer.
///
/// The file is opened lazily on the first write, so constructing a writer
/// for a directory that cannot be written to still succeeds.
pub struct FileWriter {
    /// Active log file.
    file_path: PathBuf,
    /// Size past which the next write rotates.
    max_bytes: u64,
    /// Rotated files kept after pruning.
    max_backups: usize,
    /// Open handle, `None` until the first write and after a rotation.
    file: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default rotation limits.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Path of the active log; its directory must exist by
    ///   the first write
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS)
    }

    /// Creates a writer with explicit rotation limits.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Path of the active log
    /// * `max_bytes` - Size past which the file is rotated before a write
    /// * `max_backups` - Number of rotated files to keep
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Parameters
    ///
    /// * `line` - One serialized record, without a trailing newline
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned or if rotating, opening or
    /// writing the file fails.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *guard = Some(file);
        }
        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "span log not open"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|meta| meta.len() > self.max_bytes)
    }

    /// Moves the active file aside under a timestamped name, then prunes.
    fn rotate(&self) -> io::Result<()> {
        let stamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let backup = self.file_path.with_extension(format!("jsonl.{stamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, backup)?;
        }

        self.prune_backups()
    }

    /// Deletes the oldest backups beyond the retention limit. Failing to
    /// delete one backup does not stop the others.
    fn prune_backups(&self) -> io::Result<()> {
        let Some(dir) = self.file_path.parent() else {
            return Ok(());
        };
        let Some(prefix) = self
            .file_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| format!("{name}."))
        else {
            return Ok(());
        };

        let mut backups: Vec<(i64, PathBuf)> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                let stamp = backup_stamp(&path, &prefix)?;
                Some((stamp, path))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, old) in backups.iter().skip(self.max_backups) {
            if let Err(e) = fs::remove_file(old) {
                tracing::debug!(path = %old.display(), error = %e, "failed to remove old span log");
            }
        }

        Ok(())
    }
}

/// Timestamp suffix of a backup file name such as `spans.jsonl.1729260000`.
fn backup_stamp(path: &Path, prefix: &str) -> Option<i64> {
    path.file_name()?
        .to_str()?
        .strip_prefix(prefix)?
        .parse()
        .ok()
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backup_count(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().contains(".jsonl."))
            .count()
    }

    #[test]
    fn test_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"a\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"a\":2}\n");
    }

    #[test]
    fn test_rotation_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let writer = FileWriter::with_limits(path.clone(), 8, 2);

        for i in 0..6 {
            writer.write_line(&format!("{{\"line\":{i}}}")).unwrap();
        }

        assert!(backup_count(dir.path()) <= 2);
        assert_eq!(fs::read_to_string(path).unwrap(), "{\"line\":5}\n");
    }

    #[test]
    fn test_backup_stamp_parsing() {
        let prefix = "spans.jsonl.";
        assert_eq!(
            backup_stamp(Path::new("/tmp/spans.jsonl.42"), prefix),
            Some(42)
        );
        assert_eq!(backup_stamp(Path::new("/tmp/spans.jsonl"), prefix), None);
        assert_eq!(backup_stamp(Path::new("/tmp/other.jsonl.42"), prefix), None);
    }
}
