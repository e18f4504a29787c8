use crate::error::{HeightmapError, Result};
use crate::utils::{decode_u16, encode_u16, ensure_shape, from_gray16, to_gray16, Field};
use image::imageops::{self, FilterType};

/// Requantizes noise to 16 bits and resizes it to `target` (rows, cols).
///
/// Input in [-1, 1] is shifted to [0, 1] before encoding, so out of range
/// noise saturates instead of wrapping. The resize is bicubic. The result is
/// centered back on zero and lies in [-0.5, 0.5].
pub fn resample_noise(noise: &Field, target: (usize, usize)) -> Result<Field> {
    if noise.is_empty() {
        return Err(HeightmapError::Config(format!(
            "cannot resample empty noise of shape {:?}",
            noise.dim()
        )));
    }
    if target.0 == 0 || target.1 == 0 {
        return Err(HeightmapError::Config(format!(
            "resample target {target:?} must be non-empty"
        )));
    }
    let width = u32::try_from(target.1)
        .map_err(|_| HeightmapError::Config(format!("target width {} too large", target.1)))?;
    let height = u32::try_from(target.0)
        .map_err(|_| HeightmapError::Config(format!("target height {} too large", target.0)))?;

    let encoded = to_gray16(&noise.mapv(|v| encode_u16(v * 0.5 + 0.5)))?;
    let resized = imageops::resize(&encoded, width, height, FilterType::CatmullRom);
    let resampled = from_gray16(&resized).mapv(|x| decode_u16(x) - 0.5);

    ensure_shape(&resampled, target, "resampled noise")?;
    Ok(resampled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::perlin_noise_2d;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_resample_shape_and_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let noise = perlin_noise_2d((16, 16), (4, 4), (false, false), &mut rng).unwrap();
        let resampled = resample_noise(&noise, (17, 17)).unwrap();

        assert_eq!(resampled.dim(), (17, 17));
        assert!(resampled.iter().all(|&v| (-0.5..=0.5).contains(&v)));
    }

    #[test]
    fn test_resample_flat_noise_stays_flat() {
        let noise = Field::zeros((8, 8));
        let resampled = resample_noise(&noise, (9, 9)).unwrap();

        for &v in resampled.iter() {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_resample_saturates_out_of_range_noise() {
        let noise = Field::from_elem((4, 4), 3.0);
        let resampled = resample_noise(&noise, (5, 5)).unwrap();

        for &v in resampled.iter() {
            assert_abs_diff_eq!(v, 0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_resample_keeps_large_scale_structure() {
        // left half low, right half high
        let noise = Field::from_shape_fn((8, 8), |(_, c)| if c < 4 { -1.0 } else { 1.0 });
        let resampled = resample_noise(&noise, (9, 9)).unwrap();

        assert!(resampled[[4, 0]] < -0.45);
        assert!(resampled[[4, 8]] > 0.45);
    }

    #[test]
    fn test_resample_rejects_empty_shapes() {
        let err = resample_noise(&Field::zeros((0, 4)), (5, 5)).unwrap_err();
        assert!(matches!(err, HeightmapError::Config(_)));

        let err = resample_noise(&Field::zeros((4, 4)), (0, 5)).unwrap_err();
        assert!(matches!(err, HeightmapError::Config(_)));
    }
}
