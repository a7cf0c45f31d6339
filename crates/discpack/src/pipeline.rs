//! Input file to structure file.

use std::fs;
use std::path::{Path, PathBuf};

use discpack_structure::{LayoutConfig, StructureStats};
use tracing::{debug, info};

use crate::error::CliError;

/// What a successful conversion produced.
#[derive(Debug)]
pub struct Conversion {
    pub output: PathBuf,
    pub stats: StructureStats,
}

/// `<input stem>.nbt`, relative to the working directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "structure".into());
    PathBuf::from(format!("{stem}.nbt"))
}

/// Read `input`, build the structure and write it gzipped to `output`.
///
/// Nothing is written unless the whole document was built and encoded.
pub fn convert(input: &Path, output: &Path, layout: &LayoutConfig) -> Result<Conversion, CliError> {
    if !input.exists() {
        return Err(CliError::InputNotFound(input.to_path_buf()));
    }

    let text = fs::read_to_string(input).map_err(|source| CliError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    let document = discpack_structure::build_from_text(&text, layout)?;
    let bytes = discpack_nbt::to_gzip_bytes(&document.to_nbt())?;
    debug!(bytes = bytes.len(), "encoded structure");

    write_atomic(output, &bytes)?;
    info!("Structure saved to {}", output.display());

    Ok(Conversion {
        output: output.to_path_buf(),
        stats: document.stats,
    })
}

/// Write through a sibling temp file and rename it into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    let write_error = |source: std::io::Error| CliError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, bytes).map_err(write_error)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_error(e));
    }
    Ok(())
}
