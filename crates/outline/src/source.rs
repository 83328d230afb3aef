use crate::error::{OutlineError, Result};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// In-memory contents of unsaved editor buffers, keyed by file path
///
/// The archive arrives on standard input as a sequence of records, each a
/// path line, a decimal content length line, and exactly that many content
/// bytes. The next record starts immediately after the content.
#[derive(Debug, Clone, Default)]
pub struct OverlayArchive {
    entries: HashMap<String, Vec<u8>>,
}

impl OverlayArchive {
    /// Parse a complete archive from a reader
    ///
    /// Input may end cleanly only where a path line would start; anything
    /// else (a path without a length, a non-decimal length, fewer content
    /// bytes than declared) is a corrupt archive. A repeated path keeps its
    /// last contents.
    pub fn parse(mut reader: impl BufRead) -> Result<Self> {
        let mut entries = HashMap::new();

        loop {
            let mut path_line = String::new();
            let read = reader
                .read_line(&mut path_line)
                .map_err(|e| OutlineError::overlay_corrupt(format!("reading file name: {e}")))?;
            if read == 0 {
                break;
            }
            let path = path_line.trim().to_string();

            let mut size_line = String::new();
            let read = reader.read_line(&mut size_line).map_err(|e| {
                OutlineError::overlay_corrupt(format!("reading size of {path}: {e}"))
            })?;
            if read == 0 {
                return Err(OutlineError::overlay_corrupt(format!(
                    "missing size for {path}"
                )));
            }
            let size: usize = size_line.trim().parse().map_err(|_| {
                OutlineError::overlay_corrupt(format!(
                    "invalid size {:?} for {path}",
                    size_line.trim()
                ))
            })?;

            let mut content = vec![0_u8; size];
            reader.read_exact(&mut content).map_err(|e| {
                OutlineError::overlay_corrupt(format!("reading {size} bytes of {path}: {e}"))
            })?;
            entries.insert(path, content);
        }

        log::debug!("parsed overlay archive with {} file(s)", entries.len());
        Ok(Self { entries })
    }

    /// Get the contents stored for a path, matched as an exact string
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries.get(path).map(|content| content.as_slice())
    }

    /// Number of files in the archive
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the archive holds no files
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Produce the source bytes for a file
///
/// With an overlay, the path is looked up in the archive and a miss is an
/// error; the filesystem is never consulted as a fallback. Without one, the
/// path is read from disk.
pub fn resolve(path: &Path, overlay: Option<&OverlayArchive>) -> Result<Vec<u8>> {
    match overlay {
        Some(archive) => {
            let key = path.to_string_lossy();
            log::debug!("resolving {key} from overlay archive");
            archive
                .get(key.as_ref())
                .map(|content| content.to_vec())
                .ok_or_else(|| OutlineError::overlay_miss(key))
        }
        None => {
            log::debug!("resolving {} from disk", path.display());
            std::fs::read(path)
                .map_err(|e| OutlineError::source_unavailable(path.to_string_lossy(), e))
        }
    }
}
