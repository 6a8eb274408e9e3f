//! Framed binary encoding and atomic file I/O for snapshots.
//!
//! On-disk format:
//! ```text
//! [8 bytes: magic "cairnsnp"]
//! [4 bytes: format version (little-endian u32)]
//! [4 bytes: CRC32 of payload (little-endian u32)]
//! [N bytes: payload (bincode-serialized RepositorySnapshot)]
//! ```
//!
//! Writes go to a temporary file in the destination directory and are
//! atomically renamed into place, so a crash mid-save leaves either the old
//! snapshot or the new one on disk, never a torn file that a later load
//! could mistake for valid.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{SnapshotError, SnapshotResult};
use crate::record::RepositorySnapshot;

/// File magic: identifies a Cairn snapshot.
const MAGIC: &[u8; 8] = b"cairnsnp";

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Header size: 8 bytes magic + 4 bytes version + 4 bytes CRC.
const HEADER_SIZE: usize = 16;

/// Encode a snapshot into a framed byte buffer.
pub fn encode(snapshot: &RepositorySnapshot) -> SnapshotResult<Vec<u8>> {
    let payload = bincode::serialize(snapshot)
        .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    buf.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    buf.extend_from_slice(&payload);
    Ok(buf)
}

/// Decode a framed byte buffer back into a snapshot.
///
/// Rejects short buffers, wrong magic, unknown versions, and checksum
/// mismatches before attempting payload deserialization.
pub fn decode(bytes: &[u8]) -> SnapshotResult<RepositorySnapshot> {
    if bytes.len() < HEADER_SIZE {
        return Err(SnapshotError::Corrupt {
            reason: format!("file shorter than header ({} bytes)", bytes.len()),
        });
    }
    let (header, payload) = bytes.split_at(HEADER_SIZE);
    if &header[..8] != MAGIC {
        return Err(SnapshotError::Corrupt {
            reason: "bad magic".into(),
        });
    }
    let version = u32::from_le_bytes(header[8..12].try_into().expect("fixed-width slice"));
    if version != FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion { found: version });
    }
    let expected_crc = u32::from_le_bytes(header[12..16].try_into().expect("fixed-width slice"));
    if crc32fast::hash(payload) != expected_crc {
        return Err(SnapshotError::Corrupt {
            reason: "checksum mismatch".into(),
        });
    }
    bincode::deserialize(payload).map_err(|e| SnapshotError::Deserialization(e.to_string()))
}

impl RepositorySnapshot {
    /// Write the snapshot to `path`, overwriting any existing file.
    ///
    /// The bytes are written to a temporary file in the same directory,
    /// fsynced, and atomically renamed into place.
    pub fn write_to(&self, path: &Path) -> SnapshotResult<()> {
        let bytes = encode(self)?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)?;
                parent
            }
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| SnapshotError::Io(e.error))?;
        debug!(path = %path.display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }

    /// Read a snapshot from `path`.
    ///
    /// An absent file is a valid initial state and yields `Ok(None)`; a
    /// file that exists but cannot be decoded is an error.
    pub fn read_from(path: &Path) -> SnapshotResult<Option<Self>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no snapshot file");
                return Ok(None);
            }
            Err(e) => return Err(SnapshotError::Io(e)),
        };
        decode(&bytes).map(Some)
    }
}
