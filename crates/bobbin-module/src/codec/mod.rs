//! The module reader/writer boundary.
//!
//! [`ModuleCodec`] is the seam between the orchestration pipeline and
//! whatever binary format the host actually weaves. The pipeline only ever
//! drives this trait: read with the selected symbol format, mutate the
//! image, write with the normalized format. [`JsonFileCodec`] is the
//! reference implementation backing the workspace's own tests; real
//! bytecode readers plug in from host crates.

use std::fs;
use std::path::Path;

use crate::error::ModuleError;
use crate::image::{ModuleImage, SymbolData};
use crate::symbols::SymbolFormat;

/// Reads and writes module images, including paired symbol files.
pub trait ModuleCodec {
    /// Reads the module at `binary` into an image.
    ///
    /// When `symbols` is not [`SymbolFormat::None`], the codec also reads
    /// the symbol file at that format's path and attaches its payload to
    /// the image.
    ///
    /// # Errors
    ///
    /// Returns a [`ModuleError`] when the binary or symbol file cannot be
    /// read or does not decode.
    fn read(&self, binary: &Path, symbols: SymbolFormat) -> Result<ModuleImage, ModuleError>;

    /// Writes the image back to `binary`, overwriting in place.
    ///
    /// When `symbols` is not [`SymbolFormat::None`] and the image carries a
    /// symbol payload, the codec also writes the paired symbol file at that
    /// format's path. The binary write is the commit point for the module:
    /// a failed symbol write must leave the binary untouched so a retry can
    /// reprocess the module.
    ///
    /// # Errors
    ///
    /// Returns a [`ModuleError`] when encoding fails or either file cannot
    /// be written. Write failures must propagate; the pipeline treats them
    /// as the module's fatal outcome.
    fn write(
        &self,
        image: &ModuleImage,
        binary: &Path,
        symbols: SymbolFormat,
    ) -> Result<(), ModuleError>;
}

/// Reference codec storing module images as JSON documents on disk.
///
/// Symbol files hold the raw symbol payload. The image's JSON form never
/// embeds the payload, so a woven binary stays byte-stable regardless of
/// which symbol variant sat next to it.
///
/// # Example
///
/// ```no_run
/// use bobbin_module::{JsonFileCodec, ModuleCodec, SymbolFormat};
/// use std::path::Path;
///
/// let codec = JsonFileCodec;
/// let image = codec
///     .read(Path::new("/out/App.Core.dll"), SymbolFormat::Pdb)
///     .expect("readable module");
/// assert!(image.symbols().is_some());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileCodec;

impl ModuleCodec for JsonFileCodec {
    fn read(&self, binary: &Path, symbols: SymbolFormat) -> Result<ModuleImage, ModuleError> {
        let text = fs::read_to_string(binary).map_err(|e| ModuleError::read(binary, e))?;
        let mut image: ModuleImage =
            serde_json::from_str(&text).map_err(|e| ModuleError::Decode {
                path: binary.to_path_buf(),
                message: e.to_string(),
            })?;
        if let Some(symbol_path) = symbols.symbol_path(binary) {
            let payload =
                fs::read(&symbol_path).map_err(|e| ModuleError::read(&symbol_path, e))?;
            image.set_symbols(Some(SymbolData::new(payload)));
        }
        Ok(image)
    }

    fn write(
        &self,
        image: &ModuleImage,
        binary: &Path,
        symbols: SymbolFormat,
    ) -> Result<(), ModuleError> {
        // The serialized form excludes the symbol payload so the binary's
        // bytes do not depend on which symbol variant was read.
        let mut stripped = image.clone();
        stripped.set_symbols(None);
        let mut text = serde_json::to_string_pretty(&stripped).map_err(|e| ModuleError::Encode {
            path: binary.to_path_buf(),
            message: e.to_string(),
        })?;
        text.push('\n');

        // The symbol file goes first: the binary write is what commits the
        // module (it carries the idempotency marker), so a failed symbol
        // write must leave the binary untouched for the retry to reprocess.
        if let Some(symbol_path) = symbols.symbol_path(binary)
            && let Some(data) = image.symbols()
        {
            fs::write(&symbol_path, data.payload())
                .map_err(|e| ModuleError::write(&symbol_path, e))?;
        }
        fs::write(binary, text).map_err(|e| ModuleError::write(binary, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
