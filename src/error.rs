use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    /// An I/O error occurred while writing the artifact
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to decode the logo graphic
    Image(#[from] image::ImageError),

    /// The font-metrics collaborator returned a non-finite or negative
    /// dimension. This is a broken collaborator, not a usage error, and the
    /// render is abandoned rather than retried.
    #[error("font metrics produced an invalid dimension while measuring {0:?}")]
    InvalidMetrics(String),

    /// A page id in the document's page order has no backing page
    #[error("page missing from document")]
    PageMissing,
}
