use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use log::info;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Document;
use crate::index::inverted::InvertedIndex;

// Layout: magic, format version, payload length, crc32 of the payload,
// bincode-encoded documents sorted by id (stable bytes for stable ids).
const MAGIC: &[u8; 4] = b"PRCH";
const VERSION: u32 = 1;

// Declared payload lengths beyond this are treated as corruption rather
// than honored with an allocation
const MAX_PAYLOAD_BYTES: u64 = 4 * 1024 * 1024 * 1024;

/// Persist the live documents. A reload reindexes them through the same
/// deterministic analysis pipeline, reproducing identical query results.
pub fn save(path: &Path, index: &InvertedIndex) -> Result<()> {
    let mut documents: Vec<Document> = index.documents().cloned().collect();
    documents.sort_by_key(|doc| doc.id);

    let payload = bincode::serialize(&documents)?;
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&payload);
    let checksum = hasher.finalize();

    let mut file = File::create(path)?;
    file.write_all(MAGIC)?;
    file.write_all(&VERSION.to_le_bytes())?;
    file.write_all(&(payload.len() as u64).to_le_bytes())?;
    file.write_all(&checksum.to_le_bytes())?;
    file.write_all(&payload)?;
    file.sync_all()?;

    info!("snapshot saved: {} documents to {}", documents.len(), path.display());
    Ok(())
}

/// Read a snapshot back. Corruption (bad magic, truncation, checksum
/// mismatch) surfaces as `IndexIntegrity`; rebuilding from the source
/// corpus is the recovery path, not in-place repair.
pub fn load(path: &Path) -> Result<Vec<Document>> {
    let mut file = File::open(path)?;

    let mut magic = [0u8; 4];
    read_header(&mut file, &mut magic)?;
    if &magic != MAGIC {
        return Err(Error::new(
            ErrorKind::IndexIntegrity,
            "Snapshot magic mismatch".to_string(),
        ));
    }

    let mut version = [0u8; 4];
    read_header(&mut file, &mut version)?;
    let version = u32::from_le_bytes(version);
    if version > VERSION {
        return Err(Error::new(
            ErrorKind::Parse,
            format!("Unsupported snapshot version {}", version),
        ));
    }

    let mut length = [0u8; 8];
    read_header(&mut file, &mut length)?;
    let length = u64::from_le_bytes(length);
    if length > MAX_PAYLOAD_BYTES {
        return Err(Error::new(
            ErrorKind::IndexIntegrity,
            format!("Snapshot declares implausible payload length {}", length),
        ));
    }
    let length = length as usize;

    let mut checksum = [0u8; 4];
    read_header(&mut file, &mut checksum)?;
    let expected = u32::from_le_bytes(checksum);

    let mut payload = vec![0u8; length];
    if let Err(err) = file.read_exact(&mut payload) {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            return Err(Error::new(
                ErrorKind::IndexIntegrity,
                "Snapshot truncated (partial write)".to_string(),
            ));
        }
        return Err(err.into());
    }

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&payload);
    if hasher.finalize() != expected {
        return Err(Error::new(
            ErrorKind::IndexIntegrity,
            "Snapshot checksum mismatch".to_string(),
        ));
    }

    let documents: Vec<Document> = bincode::deserialize(&payload)?;
    info!("snapshot loaded: {} documents from {}", documents.len(), path.display());
    Ok(documents)
}

fn read_header(file: &mut File, buf: &mut [u8]) -> Result<()> {
    file.read_exact(buf).map_err(|err| {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::new(
                ErrorKind::IndexIntegrity,
                "Snapshot header truncated".to_string(),
            )
        } else {
            err.into()
        }
    })
}
