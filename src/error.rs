use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeightmapError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Preview error: {0}")]
    Preview(String),
}

pub type Result<T> = std::result::Result<T, HeightmapError>;
