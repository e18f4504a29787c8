// src/pattern.rs
use crate::composite::composite;
use crate::config::TerrainConfig;
use crate::error::Result;
use crate::noise::fractal_noise_2d;
use crate::resample::resample_noise;
use crate::sink::HeightSink;
use crate::utils::{ensure_shape, value_range, Field};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Noise, resample, and blend with the ramp. Nothing is written.
pub fn generate_terrain_base(config: &TerrainConfig) -> Result<Field> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let started = Instant::now();
    let noise = fractal_noise_2d(
        config.noise_shape(),
        (config.periods, config.periods),
        config.octaves,
        config.persistence,
        config.lacunarity,
        config.tileable,
        &mut rng,
    )?;
    ensure_shape(&noise, config.noise_shape(), "noise")?;
    info!(
        "Generated {:?} noise with {} periods in {:.2?}",
        noise.dim(),
        config.periods,
        started.elapsed()
    );
    debug!("Noise range {:?}", value_range(&noise));

    let started = Instant::now();
    let noise = resample_noise(&noise, config.field_shape())?;
    info!("Resampled noise to {:?} in {:.2?}", noise.dim(), started.elapsed());
    debug!("Resampled range {:?}", value_range(&noise));

    let started = Instant::now();
    let field = composite(&noise, config.noise_height)?;
    ensure_shape(&field, config.field_shape(), "height field")?;
    info!(
        "Blended noise into the gradient at height {} in {:.2?}",
        config.noise_height,
        started.elapsed()
    );
    debug!("Height range {:?}", value_range(&field));

    Ok(field)
}

/// Generates the height field and hands it to every sink in order.
pub fn run(config: &TerrainConfig, sinks: &mut [Box<dyn HeightSink>]) -> Result<Field> {
    let field = generate_terrain_base(config)?;
    for sink in sinks.iter_mut() {
        info!("Running {} sink", sink.name());
        sink.consume(&field)?;
    }
    Ok(field)
}
