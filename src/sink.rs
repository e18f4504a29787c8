//! Consumers of the finished height field.
//!
//! Every sink sees the same field and none depends on another, so the caller
//! is free to run them in any order. The file writer goes through a temporary
//! file that is renamed into place once fully flushed, so an interrupted run
//! never leaves a truncated PNG at the output path.

use crate::error::{HeightmapError, Result};
use crate::utils::{encode_u16, to_gray16, Field, Gray16Image};
use image::ImageFormat;
use log::info;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub trait HeightSink {
    fn name(&self) -> &str;

    fn consume(&mut self, field: &Field) -> Result<()>;
}

/// Writes the field as a 16-bit grayscale PNG.
pub struct PngWriter {
    path: PathBuf,
}

impl PngWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HeightSink for PngWriter {
    fn name(&self) -> &str {
        "png"
    }

    fn consume(&mut self, field: &Field) -> Result<()> {
        let image = encode_field(field)?;
        write_png_atomic(&self.path, &image)?;
        info!(
            "Wrote {}x{} heightmap to {}",
            image.width(),
            image.height(),
            self.path.display()
        );
        Ok(())
    }
}

/// Accepts the field and does nothing with it.
#[derive(Debug, Default)]
pub struct Discard;

impl HeightSink for Discard {
    fn name(&self) -> &str {
        "discard"
    }

    fn consume(&mut self, _field: &Field) -> Result<()> {
        Ok(())
    }
}

/// Quantizes a [0, 1] field into a 16-bit image, `cols` wide and `rows` tall.
pub fn encode_field(field: &Field) -> Result<Gray16Image> {
    if field.is_empty() {
        return Err(HeightmapError::Config(format!(
            "cannot encode empty field of shape {:?}",
            field.dim()
        )));
    }
    to_gray16(&field.mapv(encode_u16))
}

/// `{path}.tmp`, next to the final file so the rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Encodes `image` as PNG and moves it onto `path`, replacing any existing file.
///
/// Missing parent directories are not created.
pub fn write_png_atomic(path: &Path, image: &Gray16Image) -> Result<()> {
    let tmp_path = temp_path(path);

    let write = || -> Result<()> {
        image.save_with_format(&tmp_path, ImageFormat::Png)?;
        OpenOptions::new().write(true).open(&tmp_path)?.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    };
    if let Err(err) = write() {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    Ok(())
}
