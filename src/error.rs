use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal pipeline errors. Recoverable conditions (background fetch,
/// font loading) are handled where they occur and never reach this enum.
#[derive(Debug, Error)]
pub enum Error {
    #[error("metrics collection failed: {0}")]
    Collection(#[from] CollectError),

    #[error("image encoding failed: {0}")]
    Encoding(#[from] image::ImageError),

    #[error("staging storage failed: {0}")]
    Staging(#[from] std::io::Error),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Raised only when the OS metrics interface is entirely unavailable.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("no logical CPUs reported")]
    CpuUnavailable,

    #[error("total memory reported as zero")]
    MemoryUnavailable,

    #[error("current process not resolvable")]
    ProcessUnavailable,
}
