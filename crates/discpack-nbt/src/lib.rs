//! NBT (Named Binary Tag) implementation for Minecraft Java Edition files.
//!
//! Encodes big-endian NBT as used by structure templates, with gzip helpers
//! for reading and writing whole files.

pub mod error;
mod gzip;
mod io;
mod mutf8;
pub mod tag;

pub use error::NbtError;
pub use gzip::{from_gzip_bytes, read_gzip_file, to_gzip_bytes};
pub use tag::{NbtCompound, NbtRoot, NbtTag};

use bytes::{Buf, BufMut};

/// Read big-endian NBT from a buffer.
pub fn read_nbt(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    io::read_nbt(buf)
}

/// Write big-endian NBT to a buffer.
pub fn write_nbt(buf: &mut impl BufMut, root: &NbtRoot) -> Result<(), NbtError> {
    io::write_nbt(buf, root)
}
