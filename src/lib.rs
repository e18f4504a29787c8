//! Terrain base heightmap: Perlin noise blended into a left to right ramp,
//! written as a 16-bit grayscale PNG.

pub mod composite;
pub mod config;
pub mod error;
pub mod noise;
pub mod pattern;
#[cfg(feature = "preview")]
pub mod preview;
pub mod resample;
pub mod sink;
pub mod utils;

pub use config::TerrainConfig;
pub use error::{HeightmapError, Result};
pub use pattern::{generate_terrain_base, run};
pub use utils::Field;
