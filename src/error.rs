//! Error type for loading models, scenes, textures and config
//!
//! The rasterizer itself never fails; only the I/O around it does.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("serialize error: {0}")]
    RonSerialize(#[from] ron::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unknown vertex attribute {0:?}")]
    UnknownAttribute(String),

    #[error("model has no triangles")]
    EmptyModel,

    #[error("pixel buffer does not match target size")]
    BufferSize,
}
