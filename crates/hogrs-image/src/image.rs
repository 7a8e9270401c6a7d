use std::ops;

use hogrs_tensor::Tensor3;

use crate::error::ImageError;

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use hogrs_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

/// A dense pixel array.
///
/// The pixels are stored row-major as a 3D tensor with shape (H, W, C). A two dimensional
/// array (H, W) is stored with a single channel. Every dimension is non-zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T>(Tensor3<T>);

/// helper to deference the inner tensor
impl<T> ops::Deref for Image<T> {
    type Target = Tensor3<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of channels per pixel.
    /// * `data` - The pixel data of the image in (H, W, C) order.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidShape`] if any dimension is zero and
    /// [`ImageError::InvalidChannelShape`] if the data length does not match the size.
    ///
    /// # Examples
    ///
    /// ```
    /// use hogrs_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, channels: usize, data: Vec<T>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 || channels == 0 {
            return Err(ImageError::InvalidShape(vec![
                size.height,
                size.width,
                channels,
            ]));
        }

        let expected = size.width * size.height * channels;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self(Tensor3::from_shape_vec(
            [size.height, size.width, channels],
            data,
        )?))
    }

    /// Create a new image from a dynamic shape, as produced by array libraries.
    ///
    /// The shape must be `[H, W]` or `[H, W, C]`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidShape`] for any other rank or for a zero-length dimension.
    ///
    /// # Examples
    ///
    /// ```
    /// use hogrs_image::{Image, ImageError};
    ///
    /// let gray = Image::from_shape_vec(&[2, 3], vec![0u8; 6]).unwrap();
    /// assert_eq!(gray.num_channels(), 1);
    ///
    /// let flat = Image::from_shape_vec(&[6], vec![0u8; 6]);
    /// assert_eq!(flat, Err(ImageError::InvalidShape(vec![6])));
    /// ```
    pub fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self, ImageError> {
        let (height, width, channels) = match *shape {
            [height, width] => (height, width, 1),
            [height, width, channels] => (height, width, channels),
            _ => return Err(ImageError::InvalidShape(shape.to_vec())),
        };

        if shape.contains(&0) {
            return Err(ImageError::InvalidShape(shape.to_vec()));
        }

        Self::new(ImageSize { width, height }, channels, data)
    }

    /// Get a single channel of the image.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn channel(&self, channel: usize) -> Result<Image<T>, ImageError>
    where
        T: Clone,
    {
        let channels = self.num_channels();
        if channel >= channels {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, channels));
        }

        let channel_data = self
            .as_slice()
            .iter()
            .skip(channel)
            .step_by(channels)
            .cloned()
            .collect();

        Image::new(self.size(), 1, channel_data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.shape[1],
            height: self.shape[0],
        }
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.shape[1]
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.shape[0]
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.shape[2]
    }
}
