//! Perlin gradient noise on a regular lattice of periods.
//!
//! The output is sampled at integer pixel positions, so every shape
//! dimension has to be an exact multiple of the number of periods along it.
//! Lattice gradients are drawn from the caller's RNG, which keeps the
//! generator free of global state: the same seeded RNG always yields the
//! same field.

use crate::error::{HeightmapError, Result};
use crate::utils::{fade, Field};
use ndarray::{Array2, Zip};
use rand::Rng;
use std::f64::consts::{PI, SQRT_2};

/// Checks that `periods` tile `shape` exactly.
pub fn check_periods(shape: (usize, usize), periods: (usize, usize)) -> Result<()> {
    if shape.0 == 0 || shape.1 == 0 {
        return Err(HeightmapError::Config(format!(
            "noise shape {shape:?} must be non-empty"
        )));
    }
    if periods.0 == 0 || periods.1 == 0 {
        return Err(HeightmapError::Config(format!(
            "noise periods {periods:?} must be non-zero"
        )));
    }
    if shape.0 % periods.0 != 0 || shape.1 % periods.1 != 0 {
        return Err(HeightmapError::Config(format!(
            "noise shape {shape:?} is not a multiple of periods {periods:?}"
        )));
    }
    Ok(())
}

/// Random unit gradients on a `(p0 + 1) x (p1 + 1)` lattice, drawn row by row.
fn lattice_gradients<R: Rng + ?Sized>(
    periods: (usize, usize),
    tileable: (bool, bool),
    rng: &mut R,
) -> Array2<(f64, f64)> {
    let mut angles = Array2::<f64>::zeros((periods.0 + 1, periods.1 + 1));
    angles.iter_mut().for_each(|a| *a = 2.0 * PI * rng.gen::<f64>());

    if tileable.0 {
        let first = angles.row(0).to_owned();
        angles.row_mut(periods.0).assign(&first);
    }
    if tileable.1 {
        let first = angles.column(0).to_owned();
        angles.column_mut(periods.1).assign(&first);
    }

    angles.mapv(|a| (a.cos(), a.sin()))
}

/// Perlin value at offset `(x, y)` in [0, 1]^2 inside lattice cell `(ci, cj)`.
#[inline(always)]
fn cell_noise(
    gradients: &Array2<(f64, f64)>,
    (ci, cj): (usize, usize),
    x: f64,
    y: f64,
) -> f64 {
    let g00 = gradients[[ci, cj]];
    let g10 = gradients[[ci + 1, cj]];
    let g01 = gradients[[ci, cj + 1]];
    let g11 = gradients[[ci + 1, cj + 1]];

    let n00 = x * g00.0 + y * g00.1;
    let n10 = (x - 1.0) * g10.0 + y * g10.1;
    let n01 = x * g01.0 + (y - 1.0) * g01.1;
    let n11 = (x - 1.0) * g11.0 + (y - 1.0) * g11.1;

    let (tx, ty) = (fade(x), fade(y));
    let n0 = n00 * (1.0 - tx) + tx * n10;
    let n1 = n01 * (1.0 - tx) + tx * n11;
    SQRT_2 * ((1.0 - ty) * n0 + ty * n1)
}

/// 2D Perlin noise of `shape` with `periods` lattice cells per axis.
///
/// Values lie in [-1, 1] and are exactly zero on lattice points. A
/// tileable axis wraps seamlessly: its last lattice line copies the first.
pub fn perlin_noise_2d<R: Rng + ?Sized>(
    shape: (usize, usize),
    periods: (usize, usize),
    tileable: (bool, bool),
    rng: &mut R,
) -> Result<Field> {
    check_periods(shape, periods)?;

    let gradients = lattice_gradients(periods, tileable, rng);
    let cell = (shape.0 / periods.0, shape.1 / periods.1);

    let mut noise = Field::zeros(shape);
    Zip::indexed(&mut noise).par_for_each(|(i, j), value| {
        let x = (i % cell.0) as f64 / cell.0 as f64;
        let y = (j % cell.1) as f64 / cell.1 as f64;
        *value = cell_noise(&gradients, (i / cell.0, j / cell.1), x, y);
    });

    Ok(noise)
}

/// Lattice periods of octave `octave`, or `None` on overflow.
fn octave_periods(
    periods: (usize, usize),
    lacunarity: usize,
    octave: u32,
) -> Option<(usize, usize)> {
    let factor = lacunarity.checked_pow(octave)?;
    Some((periods.0.checked_mul(factor)?, periods.1.checked_mul(factor)?))
}

/// Checks every octave of a fractal sum against `shape`.
pub fn check_fractal(
    shape: (usize, usize),
    periods: (usize, usize),
    octaves: u32,
    lacunarity: usize,
) -> Result<()> {
    if octaves == 0 {
        return Err(HeightmapError::Config("at least one octave is required".into()));
    }
    if lacunarity == 0 {
        return Err(HeightmapError::Config("lacunarity must be non-zero".into()));
    }
    for octave in 0..octaves {
        let layer = octave_periods(periods, lacunarity, octave).ok_or_else(|| {
            HeightmapError::Config(format!("octave {octave} periods overflow"))
        })?;
        check_periods(shape, layer)?;
    }
    Ok(())
}

/// Sum of `octaves` Perlin layers.
///
/// Octave `k` has `periods * lacunarity^k` cells per axis and amplitude
/// `persistence^k`. A single octave is plain [`perlin_noise_2d`].
pub fn fractal_noise_2d<R: Rng + ?Sized>(
    shape: (usize, usize),
    periods: (usize, usize),
    octaves: u32,
    persistence: f64,
    lacunarity: usize,
    tileable: (bool, bool),
    rng: &mut R,
) -> Result<Field> {
    check_fractal(shape, periods, octaves, lacunarity)?;

    let mut noise = Field::zeros(shape);
    let mut amplitude = 1.0;
    for octave in 0..octaves {
        let layer_periods = octave_periods(periods, lacunarity, octave).ok_or_else(|| {
            HeightmapError::Config(format!("octave {octave} periods overflow"))
        })?;
        let layer = perlin_noise_2d(shape, layer_periods, tileable, rng)?;
        noise.scaled_add(amplitude, &layer);
        amplitude *= persistence;
    }

    Ok(noise)
}
