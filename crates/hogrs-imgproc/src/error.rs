use hogrs_image::ImageError;

use crate::parallel::ParallelError;

/// Errors that can occur while computing a descriptor.
///
/// Shape and parameter errors are detected before any computation starts, so no partial
/// result is ever returned.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum HogError {
    /// The pixel array has the wrong rank or a zero-length dimension, or two maps that must
    /// share a shape do not.
    #[error("Invalid shape {0:?}")]
    InvalidShape(Vec<usize>),

    /// A size parameter is zero.
    #[error("Invalid parameter `{name}`: must be > 0, got {value}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: usize,
    },

    /// Error from the image module.
    #[error("Image error: {0}")]
    Image(ImageError),

    /// Error while scheduling parallel work.
    #[error("Parallel execution error: {0}")]
    Parallel(#[from] ParallelError),
}

impl From<ImageError> for HogError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::InvalidShape(shape) => HogError::InvalidShape(shape),
            other => HogError::Image(other),
        }
    }
}
