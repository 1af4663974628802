use std::fs;
use std::io;
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::constants::position::{DEFAULT_FILE, FIELD_SEPARATOR};
use crate::types::NormalizedPosition;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access position file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("position file {path} does not contain two tab-separated fields")]
    Malformed { path: PathBuf },
    #[error("position file {path} has a non-numeric {axis} field: {value:?}")]
    InvalidNumber {
        path: PathBuf,
        axis: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("position file {path} holds ({x}, {y}), outside of [0, 1]")]
    OutOfRange { path: PathBuf, x: f64, y: f64 },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Why startup fell back to the centered position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No position has been saved yet
    Missing,
    /// The file exists but its content is not a valid position
    Malformed,
    /// The file exists but could not be read
    Unreadable,
}

/// Result of the startup load: always yields a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupPosition {
    pub position: NormalizedPosition,
    pub fallback: Option<FallbackReason>,
}

/// Tab-delimited two-field text file holding a NormalizedPosition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionStore {
    path: PathBuf,
}

impl Default for PositionStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}

impl PositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with `"{x}\t{y}"`
    pub fn save(&self, position: NormalizedPosition) -> Result<(), StoreError> {
        fs::write(&self.path, format_position(position)).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), x = position.x, y = position.y, "Saved position");
        Ok(())
    }

    pub fn load(&self) -> Result<NormalizedPosition, StoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let position = parse_position(&self.path, &contents)?;
        debug!(path = %self.path.display(), x = position.x, y = position.y, "Loaded position");
        Ok(position)
    }

    /// Startup load: falls back to the screen center instead of failing
    ///
    /// Each fallback reason is logged at its own level so that an unreadable
    /// file is not confused with a first run.
    pub fn load_or_center(&self) -> StartupPosition {
        match self.load() {
            Ok(position) => StartupPosition { position, fallback: None },
            Err(err) => {
                let reason = if err.is_not_found() {
                    info!(path = %self.path.display(), "No saved position, centering crosshair");
                    FallbackReason::Missing
                } else if matches!(err, StoreError::Io { .. }) {
                    error!(error = ?err, "Could not read saved position, centering crosshair");
                    FallbackReason::Unreadable
                } else {
                    warn!(error = %err, "Ignoring invalid saved position, centering crosshair");
                    FallbackReason::Malformed
                };
                StartupPosition {
                    position: NormalizedPosition::center(),
                    fallback: Some(reason),
                }
            }
        }
    }
}

pub fn format_position(position: NormalizedPosition) -> String {
    format!("{}{}{}", position.x, FIELD_SEPARATOR, position.y)
}

/// Parse the first two tab-separated fields; any further fields are ignored
fn parse_position(path: &Path, contents: &str) -> Result<NormalizedPosition, StoreError> {
    let mut fields = contents.trim().split(FIELD_SEPARATOR);
    let (Some(x), Some(y)) = (fields.next(), fields.next()) else {
        return Err(StoreError::Malformed { path: path.to_path_buf() });
    };

    let parse = |axis: &'static str, value: &str| {
        value.trim().parse::<f64>().map_err(|source| StoreError::InvalidNumber {
            path: path.to_path_buf(),
            axis,
            value: value.to_string(),
            source,
        })
    };
    let position = NormalizedPosition::new(parse("x", x)?, parse("y", y)?);

    // NaN fails the range check as well
    if !position.is_valid() {
        return Err(StoreError::OutOfRange {
            path: path.to_path_buf(),
            x: position.x,
            y: position.y,
        });
    }
    Ok(position)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Unique scratch path; removed on drop
    pub(crate) struct ScratchFile(pub PathBuf);

    impl ScratchFile {
        pub(crate) fn new(tag: &str) -> Self {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir()
                .join(format!("screen-dot-{}-{tag}-{n}.txt", std::process::id()));
            let _ = fs::remove_file(&path);
            Self(path)
        }

        pub(crate) fn with_contents(tag: &str, contents: &str) -> Self {
            let file = Self::new(tag);
            fs::write(&file.0, contents).unwrap();
            file
        }
    }

    impl Drop for ScratchFile {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    #[test]
    fn test_save_writes_tab_separated() {
        let file = ScratchFile::new("save");
        let store = PositionStore::new(&file.0);
        store.save(NormalizedPosition::new(0.25, 0.75)).unwrap();
        assert_eq!(fs::read_to_string(&file.0).unwrap(), "0.25\t0.75");
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let file = ScratchFile::new("roundtrip");
        let store = PositionStore::new(&file.0);
        for position in [
            NormalizedPosition::new(0.0, 1.0),
            NormalizedPosition::new(1.0 / 3.0, 2.0 / 3.0),
            NormalizedPosition::new(0.123456789012345, 0.987654321098765),
        ] {
            store.save(position).unwrap();
            assert_eq!(store.load().unwrap(), position);
        }
    }

    #[test]
    fn test_save_overwrites_existing_content() {
        let file = ScratchFile::with_contents("overwrite", "0.1\t0.2\tlonger trailing garbage");
        let store = PositionStore::new(&file.0);
        store.save(NormalizedPosition::new(0.5, 0.5)).unwrap();
        assert_eq!(fs::read_to_string(&file.0).unwrap(), "0.5\t0.5");
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let file = ScratchFile::new("missing-dir");
        let store = PositionStore::new(file.0.join("nested").join("pos.txt"));
        let err = store.save(NormalizedPosition::center()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_load_existing_file() {
        let file = ScratchFile::with_contents("existing", "0.25\t0.75");
        let position = PositionStore::new(&file.0).load().unwrap();
        assert_eq!(position, NormalizedPosition::new(0.25, 0.75));
    }

    #[test]
    fn test_load_tolerates_trailing_newline_and_extra_fields() {
        let file = ScratchFile::with_contents("extra", "0.1\t0.9\t42\n");
        let position = PositionStore::new(&file.0).load().unwrap();
        assert_eq!(position, NormalizedPosition::new(0.1, 0.9));
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let file = ScratchFile::new("absent");
        let err = PositionStore::new(&file.0).load().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_single_field_is_malformed() {
        let file = ScratchFile::with_contents("single", "0.5");
        let err = PositionStore::new(&file.0).load().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_load_non_numeric_field() {
        let file = ScratchFile::with_contents("nonnumeric", "0.5\tabc");
        let err = PositionStore::new(&file.0).load().unwrap_err();
        assert!(matches!(err, StoreError::InvalidNumber { axis: "y", .. }));
    }

    #[test]
    fn test_load_out_of_range_and_nan_rejected() {
        let file = ScratchFile::with_contents("range", "1.5\t0.5");
        let store = PositionStore::new(&file.0);
        assert!(matches!(store.load().unwrap_err(), StoreError::OutOfRange { .. }));

        fs::write(&file.0, "NaN\t0.5").unwrap();
        assert!(matches!(store.load().unwrap_err(), StoreError::OutOfRange { .. }));
    }

    #[test]
    fn test_load_or_center_missing() {
        let file = ScratchFile::new("startup-missing");
        let startup = PositionStore::new(&file.0).load_or_center();
        assert_eq!(startup.position, NormalizedPosition::center());
        assert_eq!(startup.fallback, Some(FallbackReason::Missing));
    }

    #[test]
    fn test_load_or_center_malformed() {
        let file = ScratchFile::with_contents("startup-malformed", "garbage");
        let startup = PositionStore::new(&file.0).load_or_center();
        assert_eq!(startup.position, NormalizedPosition::center());
        assert_eq!(startup.fallback, Some(FallbackReason::Malformed));
    }

    #[test]
    fn test_load_or_center_unreadable() {
        // A directory exists but cannot be read as a file
        let dir = std::env::temp_dir();
        let startup = PositionStore::new(&dir).load_or_center();
        assert_eq!(startup.position, NormalizedPosition::center());
        assert_eq!(startup.fallback, Some(FallbackReason::Unreadable));
    }

    #[test]
    fn test_load_or_center_valid() {
        let file = ScratchFile::with_contents("startup-valid", "0.25\t0.75");
        let startup = PositionStore::new(&file.0).load_or_center();
        assert_eq!(startup.position, NormalizedPosition::new(0.25, 0.75));
        assert_eq!(startup.fallback, None);
    }
}
