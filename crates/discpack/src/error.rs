//! Errors surfaced to the command line.

use std::path::PathBuf;

use discpack_nbt::NbtError;
use discpack_structure::StructureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to read '{}': {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to load config '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("failed to encode structure: {0}")]
    Encode(#[from] NbtError),

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
