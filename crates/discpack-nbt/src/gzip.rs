//! Gzip framing for NBT files (structure files are always gzipped).

use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::NbtError;
use crate::tag::NbtRoot;

/// Encode `root` and gzip the result in memory.
pub fn to_gzip_bytes(root: &NbtRoot) -> Result<Vec<u8>, NbtError> {
    let mut raw = Vec::new();
    crate::write_nbt(&mut raw, root)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;
    Ok(encoder.finish()?)
}

/// Inflate gzipped bytes and decode the NBT root inside.
pub fn from_gzip_bytes(data: &[u8]) -> Result<NbtRoot, NbtError> {
    let mut decoder = GzDecoder::new(data);
    let mut raw = Vec::new();
    decoder.read_to_end(&mut raw)?;
    crate::read_nbt(&mut raw.as_slice())
}

/// Read a gzipped NBT file.
pub fn read_gzip_file(path: impl AsRef<Path>) -> Result<NbtRoot, NbtError> {
    let data = std::fs::read(path)?;
    from_gzip_bytes(&data)
}
