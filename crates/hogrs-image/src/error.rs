use hogrs_tensor::TensorError;

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// The pixel array has a rank other than 2 or 3, or a zero-length dimension.
    #[error("Invalid pixel array shape {0:?}: expected (H, W) or (H, W, C) with non-zero dimensions")]
    InvalidShape(Vec<usize>),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds for an image with {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error from the underlying tensor.
    #[error("Tensor error: {0}")]
    TensorError(#[from] TensorError),
}
