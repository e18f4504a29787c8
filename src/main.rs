use log::info;
use terrain_base::sink::{HeightSink, PngWriter};
use terrain_base::{run, HeightmapError, TerrainConfig};

fn main() -> Result<(), HeightmapError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TerrainConfig::default();
    info!("Generating terrain base...");

    let mut sinks: Vec<Box<dyn HeightSink>> = vec![Box::new(PngWriter::new(&config.output))];
    #[cfg(feature = "preview")]
    sinks.push(Box::new(terrain_base::preview::Previewer::new(
        config.output.display().to_string(),
    )));

    run(&config, &mut sinks)?;
    info!("Done");
    Ok(())
}
