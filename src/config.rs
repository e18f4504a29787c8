use crate::error::{HeightmapError, Result};
use crate::noise::check_fractal;
use std::path::PathBuf;

/// Fixed parameters of one heightmap run.
///
/// `Default` holds the production constants; smaller configurations are only
/// built by tests.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainConfig {
    /// Side of the square noise field. The height field is one pixel larger.
    pub width: usize,
    /// Lattice periods per axis of the base noise octave.
    pub periods: usize,
    pub seed: u64,
    /// Scale applied to the [-0.5, 0.5] noise before it is added to the ramp.
    pub noise_height: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: usize,
    pub tileable: (bool, bool),
    pub output: PathBuf,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 1024 * 4,
            periods: 16,
            seed: 0,
            noise_height: 0.05,
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2,
            tileable: (false, false),
            output: PathBuf::from("terrain_base.png"),
        }
    }
}

impl TerrainConfig {
    /// Shape of the raw noise field.
    pub fn noise_shape(&self) -> (usize, usize) {
        (self.width, self.width)
    }

    /// Shape of the resampled noise and of the final height field.
    ///
    /// Saturates for widths that `validate` rejects.
    pub fn field_shape(&self) -> (usize, usize) {
        let side = self.width.saturating_add(1);
        (side, side)
    }

    /// Rejects the whole configuration before any work is done.
    pub fn validate(&self) -> Result<()> {
        let side = self.width.checked_add(1).and_then(|side| u32::try_from(side).ok());
        if side.is_none() {
            return Err(HeightmapError::Config(format!(
                "width {} exceeds the image size limit",
                self.width
            )));
        }
        check_fractal(
            self.noise_shape(),
            (self.periods, self.periods),
            self.octaves,
            self.lacunarity,
        )?;
        if !self.noise_height.is_finite() || self.noise_height < 0.0 {
            return Err(HeightmapError::Config(format!(
                "noise height must be finite and non-negative, got {}",
                self.noise_height
            )));
        }
        if !self.persistence.is_finite() {
            return Err(HeightmapError::Config(format!(
                "persistence must be finite, got {}",
                self.persistence
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(HeightmapError::Config("output path is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = TerrainConfig::default();
        assert_eq!(config.noise_shape(), (4096, 4096));
        assert_eq!(config.field_shape(), (4097, 4097));
        assert_eq!(config.periods, 16);
        assert_eq!(config.seed, 0);
        assert_eq!(config.noise_height, 0.05);
        assert_eq!(config.output, PathBuf::from("terrain_base.png"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = TerrainConfig {
            width: 8,
            periods: 2,
            ..TerrainConfig::default()
        };
        assert!(base.validate().is_ok());

        let cases = [
            TerrainConfig { width: 10, periods: 4, ..base.clone() },
            TerrainConfig { periods: 0, ..base.clone() },
            TerrainConfig { octaves: 0, ..base.clone() },
            TerrainConfig { octaves: 4, ..base.clone() },
            TerrainConfig { noise_height: -0.1, ..base.clone() },
            TerrainConfig { noise_height: f64::NAN, ..base.clone() },
            TerrainConfig { persistence: f64::INFINITY, ..base.clone() },
            TerrainConfig { output: PathBuf::new(), ..base.clone() },
            TerrainConfig { width: usize::MAX, periods: 1, ..base.clone() },
            TerrainConfig { width: u32::MAX as usize, periods: 1, ..base.clone() },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(HeightmapError::Config(_))),
                "{config:?} should be rejected"
            );
        }
    }
}
