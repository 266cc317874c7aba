//! Binary and text loaders for `ConnectionMatrix`.
//!
//! Binary layout (little-endian): magic "YSCM", version u8, num_ids u16,
//! then num_ids^2 i16 costs in row-major (rid-major) order. The binary file
//! can be memory-mapped, in which case cost reads go straight to the map.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use memmap2::Mmap;

use super::connection::{ConnectionMatrix, CostStorage, HEADER_SIZE, MAGIC, VERSION};

#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected YSCM)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("matrix size mismatch: header says {expected} costs, file has {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("parse error: {0}")]
    Parse(String),
}

fn validate_header(bytes: &[u8]) -> Result<u16, MatrixError> {
    if bytes.len() < HEADER_SIZE {
        return Err(MatrixError::InvalidHeader);
    }
    if &bytes[0..4] != MAGIC {
        return Err(MatrixError::InvalidMagic);
    }
    if bytes[4] != VERSION {
        return Err(MatrixError::UnsupportedVersion(bytes[4]));
    }
    Ok(u16::from_le_bytes([bytes[5], bytes[6]]))
}

impl ConnectionMatrix {
    /// Memory-map a binary matrix file. Cost lookups read the map directly.
    pub fn load_mmap(path: &Path) -> Result<Self, MatrixError> {
        let file = File::open(path)?;
        // Read-only map of an immutable data file.
        let mmap = unsafe { Mmap::map(&file)? };
        let num_ids = validate_header(&mmap)?;
        let expected = num_ids as usize * num_ids as usize;
        let actual = (mmap.len() - HEADER_SIZE) / 2;
        if actual < expected {
            return Err(MatrixError::SizeMismatch { expected, actual });
        }
        Ok(ConnectionMatrix {
            num_ids,
            storage: CostStorage::Mapped(mmap),
        })
    }

    /// Read a binary matrix file into owned memory.
    pub fn load_owned(path: &Path) -> Result<Self, MatrixError> {
        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;
        let num_ids = validate_header(&bytes)?;
        let expected = num_ids as usize * num_ids as usize;
        let payload = &bytes[HEADER_SIZE..];
        if payload.len() / 2 < expected {
            return Err(MatrixError::SizeMismatch {
                expected,
                actual: payload.len() / 2,
            });
        }
        let costs = payload
            .chunks_exact(2)
            .take(expected)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        Ok(ConnectionMatrix::new_owned(num_ids, costs))
    }

    /// Write the binary format.
    pub fn save(&self, path: &Path) -> Result<(), MatrixError> {
        let mut file = File::create(path)?;
        file.write_all(MAGIC)?;
        file.write_all(&[VERSION])?;
        file.write_all(&self.num_ids.to_le_bytes())?;
        let total = self.num_ids as usize * self.num_ids as usize;
        let mut buf = Vec::with_capacity(total * 2);
        for rid in 0..self.num_ids {
            for lid in 0..self.num_ids {
                buf.extend_from_slice(&self.cost(rid, lid).to_le_bytes());
            }
        }
        file.write_all(&buf)?;
        Ok(())
    }

    /// Parse the mecab-style text format: "num num" on the first line, then
    /// one cost per line in rid-major order. Used by tests and tooling.
    pub fn from_text(text: &str) -> Result<Self, MatrixError> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let header = lines.next().ok_or(MatrixError::InvalidHeader)?;
        let mut dims = header.split_whitespace();
        let rows: u16 = dims
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| MatrixError::Parse("bad dimension line".to_string()))?;
        let cols: u16 = dims
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| MatrixError::Parse("bad dimension line".to_string()))?;
        if rows != cols {
            return Err(MatrixError::Parse(format!(
                "matrix must be square, got {rows}x{cols}"
            )));
        }
        let expected = rows as usize * cols as usize;
        let mut costs = Vec::with_capacity(expected);
        for line in lines {
            let cost: i16 = line
                .trim()
                .parse()
                .map_err(|_| MatrixError::Parse(format!("bad cost line: {line:?}")))?;
            costs.push(cost);
        }
        if costs.len() != expected {
            return Err(MatrixError::SizeMismatch {
                expected,
                actual: costs.len(),
            });
        }
        Ok(ConnectionMatrix::new_owned(rows, costs))
    }
}
