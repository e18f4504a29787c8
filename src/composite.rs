use crate::error::{HeightmapError, Result};
use crate::utils::Field;
use ndarray::{Array1, Zip};

/// Horizontal ramp: every row is `linspace(0, 1, cols)`.
pub fn linear_gradient(shape: (usize, usize)) -> Field {
    let (rows, cols) = shape;
    let ramp: Array1<f64> = Array1::linspace(0.0, 1.0, cols);

    let mut gradient = Field::zeros((rows, cols));
    for i in 0..rows {
        gradient.row_mut(i).assign(&ramp);
    }
    gradient
}

/// Adds `noise * noise_height` to a ramp of the same shape and clips to [0, 1].
pub fn composite(noise: &Field, noise_height: f64) -> Result<Field> {
    if noise.is_empty() {
        return Err(HeightmapError::Config(format!(
            "cannot composite empty noise of shape {:?}",
            noise.dim()
        )));
    }
    if !noise_height.is_finite() || noise_height < 0.0 {
        return Err(HeightmapError::Config(format!(
            "noise height must be finite and non-negative, got {noise_height}"
        )));
    }

    let mut field = linear_gradient(noise.dim());

    Zip::from(&mut field)
        .and(noise)
        .for_each(|h, &n| *h = (*h + n * noise_height).clamp(0.0, 1.0));
    Ok(field)
}
