use crate::error::{HeightmapError, Result};
use image::{ImageBuffer, Luma};
use ndarray::Array2;

/// Row-major 2D field of heights, indexed `[[row, col]]`.
pub type Field = Array2<f64>;

/// Single channel 16-bit raster, `cols` wide and `rows` tall.
pub type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`
#[inline(always)]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Maps a normalized value in [0, 1] onto the full u16 range.
///
/// Values outside [0, 1] saturate. The scale is 65536 so that exact
/// binary fractions land on exact codes (0.125 -> 8192), with 1.0 pinned
/// to 65535.
#[inline(always)]
pub fn encode_u16(x: f64) -> u16 {
    (x.clamp(0.0, 1.0) * 65536.0).floor().min(65535.0) as u16
}

/// Inverse of [`encode_u16`] up to quantization, always in [0, 1].
#[inline(always)]
pub fn decode_u16(x: u16) -> f64 {
    x as f64 / 65535.0
}

/// Fails with a configuration error unless `field` has exactly `expected` shape.
pub fn ensure_shape(field: &Field, expected: (usize, usize), stage: &str) -> Result<()> {
    if field.dim() != expected {
        return Err(HeightmapError::Config(format!(
            "{stage}: expected shape {expected:?}, got {:?}",
            field.dim()
        )));
    }
    Ok(())
}

/// Packs an array of u16 codes into an image buffer (rows become image height).
pub fn to_gray16(codes: &Array2<u16>) -> Result<Gray16Image> {
    let (rows, cols) = codes.dim();
    let width = u32::try_from(cols)
        .map_err(|_| HeightmapError::Config(format!("width {cols} does not fit in u32")))?;
    let height = u32::try_from(rows)
        .map_err(|_| HeightmapError::Config(format!("height {rows} does not fit in u32")))?;

    ImageBuffer::from_raw(width, height, codes.iter().copied().collect()).ok_or_else(|| {
        HeightmapError::Config(format!("buffer too small for a {cols}x{rows} image"))
    })
}

pub fn from_gray16(image: &Gray16Image) -> Array2<u16> {
    let (width, height) = image.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
        image.get_pixel(c as u32, r as u32)[0]
    })
}

/// Smallest and largest value of a non-empty field.
pub fn value_range(field: &Field) -> (f64, f64) {
    field
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
