use hogrs_image::Image;
use hogrs_tensor::Tensor2;
use num_traits::AsPrimitive;

use crate::{
    error::HogError,
    parallel::{par_iter_rows_mut_two, ExecutionStrategy},
};

/// Per-pixel gradient magnitude and orientation of an image.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientMap {
    /// Gradient magnitude with shape (H, W). Always non-negative.
    pub magnitude: Tensor2<f32>,
    /// Undirected gradient orientation in degrees with shape (H, W), in `[0, 180)`.
    pub orientation: Tensor2<f32>,
}

impl GradientMap {
    /// The (H, W) shape shared by both maps.
    pub fn shape(&self) -> [usize; 2] {
        self.magnitude.shape
    }
}

/// Fold an angle in degrees into `[0, 180)`.
///
/// Opposite gradient directions map to the same orientation. Values already in `[0, 180)`
/// are returned unchanged.
///
/// # Example
///
/// ```
/// use hogrs_imgproc::gradient::fold_orientation;
///
/// assert_eq!(fold_orientation(-45.0), 135.0);
/// assert_eq!(fold_orientation(180.0), 0.0);
/// assert_eq!(fold_orientation(30.0), 30.0);
/// ```
pub fn fold_orientation(degrees: f32) -> f32 {
    let folded = degrees.rem_euclid(180.0);
    // rem_euclid may round up to the modulus for tiny negative inputs
    if folded >= 180.0 {
        0.0
    } else {
        folded
    }
}

/// Finite difference of a sampled signal at `i`.
///
/// Central difference in the interior, one-sided at the borders, zero for a single sample.
#[inline]
fn axis_difference(i: usize, len: usize, f: impl Fn(usize) -> f32) -> f32 {
    if len < 2 {
        0.0
    } else if i == 0 {
        f(1) - f(0)
    } else if i == len - 1 {
        f(len - 1) - f(len - 2)
    } else {
        (f(i + 1) - f(i - 1)) / 2.0
    }
}

/// Compute the gradient magnitude and orientation of an image.
///
/// The gradient is estimated per channel with central differences along rows (dy) and
/// columns (dx). For multi-channel images each pixel takes the magnitude and orientation
/// of the channel with the largest magnitude; the first channel wins ties.
///
/// Pixels are converted to `f32` before differencing, so `f64` and wide integer inputs
/// keep single precision only.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `strategy` - How rows are scheduled across threads.
///
/// # Returns
///
/// The gradient maps with shape (H, W).
///
/// # Example
///
/// ```
/// use hogrs_image::Image;
/// use hogrs_imgproc::{gradient::compute_gradient, ExecutionStrategy};
///
/// // intensity grows by one per column
/// let image = Image::from_shape_vec(&[2, 3], vec![0u8, 1, 2, 0, 1, 2]).unwrap();
/// let grad = compute_gradient(&image, ExecutionStrategy::Serial).unwrap();
///
/// assert_eq!(grad.magnitude.as_slice(), &[1.0; 6]);
/// assert_eq!(grad.orientation.as_slice(), &[0.0; 6]);
/// ```
pub fn compute_gradient<T>(
    src: &Image<T>,
    strategy: ExecutionStrategy,
) -> Result<GradientMap, HogError>
where
    T: AsPrimitive<f32> + Send + Sync,
{
    let (rows, cols, channels) = (src.rows(), src.cols(), src.num_channels());
    if rows == 0 || cols == 0 || channels == 0 {
        return Err(HogError::InvalidShape(src.shape.to_vec()));
    }

    let mut magnitude = Tensor2::<f32>::zeros([rows, cols]);
    let mut orientation = Tensor2::<f32>::zeros([rows, cols]);

    let data = src.as_slice();
    let pixel = |r: usize, c: usize, ch: usize| -> f32 { data[(r * cols + c) * channels + ch].as_() };

    par_iter_rows_mut_two(
        strategy,
        magnitude.as_slice_mut(),
        orientation.as_slice_mut(),
        cols,
        |r, mag_row, ori_row| {
            for (c, (mag, ori)) in mag_row.iter_mut().zip(ori_row.iter_mut()).enumerate() {
                for ch in 0..channels {
                    let dy = axis_difference(r, rows, |i| pixel(i, c, ch));
                    let dx = axis_difference(c, cols, |j| pixel(r, j, ch));
                    let ch_mag = dy.hypot(dx);
                    if ch == 0 || ch_mag > *mag {
                        *mag = ch_mag;
                        *ori = fold_orientation(dy.atan2(dx).to_degrees());
                    }
                }
            }
        },
    )?;

    Ok(GradientMap {
        magnitude,
        orientation,
    })
}
