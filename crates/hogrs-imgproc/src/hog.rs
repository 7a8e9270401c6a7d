use hogrs_image::Image;
use num_traits::AsPrimitive;

use crate::{
    block::{normalize_blocks, CELLS_PER_BLOCK},
    cells::{cell_grid_shape, compute_cell_histograms},
    descriptor::assemble_descriptor,
    error::HogError,
    gradient::compute_gradient,
    parallel::{ExecutionStrategy, ParallelError},
};

/// Quantity each pixel votes with into its cell histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HistogramWeight {
    /// Vote with the orientation angle itself.
    ///
    /// NOTE: this reproduces the reference weighting. Classic HOG votes with the gradient
    /// magnitude instead, see [`HistogramWeight::Magnitude`]. All stages compute in `f32`
    /// where the reference uses `f64`, so `f64` and wide integer inputs match it only to
    /// single precision.
    #[default]
    Orientation,

    /// Vote with the gradient magnitude.
    Magnitude,
}

/// Configuration of the descriptor pipeline.
///
/// # Example
///
/// ```
/// use hogrs_imgproc::{HistogramWeight, HogConfig};
///
/// let config = HogConfig::new()
///     .with_bins(9)
///     .with_cell_size(8)
///     .with_weight(HistogramWeight::Magnitude);
///
/// assert_eq!(config.descriptor_len(64, 128), 7 * 15 * 4 * 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HogConfig {
    /// Number of orientation bins spanning `[0, 180)` degrees.
    pub bins: usize,
    /// Side of a square cell in pixels.
    pub cell_size: usize,
    /// Quantity each pixel votes with.
    pub weight: HistogramWeight,
    /// How per-row work is scheduled.
    pub strategy: ExecutionStrategy,
}

impl Default for HogConfig {
    fn default() -> Self {
        Self {
            bins: 20,
            cell_size: 32,
            weight: HistogramWeight::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl HogConfig {
    /// Create a configuration with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of orientation bins.
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Set the cell side in pixels.
    pub fn with_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the histogram vote weighting.
    pub fn with_weight(mut self, weight: HistogramWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check that every size parameter and the thread count of a fixed pool are positive.
    pub fn validate(&self) -> Result<(), HogError> {
        if self.bins == 0 {
            return Err(HogError::InvalidParameter {
                name: "bins",
                value: self.bins,
            });
        }
        if self.cell_size == 0 {
            return Err(HogError::InvalidParameter {
                name: "cell_size",
                value: self.cell_size,
            });
        }
        if let ExecutionStrategy::Fixed(0) = self.strategy {
            return Err(ParallelError::InvalidThreadCount(0).into());
        }
        Ok(())
    }

    /// Shape of the cell grid for an image of `height` x `width` pixels.
    pub fn cell_grid_shape(&self, height: usize, width: usize) -> [usize; 3] {
        cell_grid_shape(height, width, self.cell_size, self.bins)
    }

    /// Length of the descriptor for an image of `height` x `width` pixels.
    pub fn descriptor_len(&self, height: usize, width: usize) -> usize {
        let [rows, cols, bins] = self.cell_grid_shape(height, width);
        rows.saturating_sub(1) * cols.saturating_sub(1) * CELLS_PER_BLOCK * bins
    }
}

/// Compute the histogram of oriented gradients descriptor of an image.
///
/// The stages run strictly in sequence: gradient estimation, per-cell histograms, block
/// normalization and flattening. Each stage finishes before the next one starts.
///
/// # Arguments
///
/// * `src` - The pixel array with shape (H, W, C).
/// * `config` - The pipeline configuration.
///
/// # Returns
///
/// The descriptor, of length `config.descriptor_len(H, W)`.
///
/// # Errors
///
/// Returns [`HogError::InvalidParameter`] if `bins` or `cell_size` is zero. The check
/// happens before any computation.
///
/// # Example
///
/// ```
/// use hogrs_image::Image;
/// use hogrs_imgproc::{hog, HogConfig};
///
/// let image = Image::from_shape_vec(&[64, 64], vec![0u8; 64 * 64]).unwrap();
/// let descriptor = hog(&image, &HogConfig::default()).unwrap();
///
/// assert_eq!(descriptor.len(), 80);
/// assert!(descriptor.iter().all(|&v| v == 0.0));
/// ```
pub fn hog<T>(src: &Image<T>, config: &HogConfig) -> Result<Vec<f32>, HogError>
where
    T: AsPrimitive<f32> + Send + Sync,
{
    config.validate()?;

    let gradients = compute_gradient(src, config.strategy)?;
    let cells = compute_cell_histograms(
        &gradients,
        config.cell_size,
        config.bins,
        config.weight,
        config.strategy,
    )?;
    log::debug!("hog: image {:?} -> cell grid {:?}", src.shape, cells.shape);

    let blocks = normalize_blocks(&cells, config.strategy)?;
    log::debug!("hog: {} blocks of length {}", blocks.shape[0], blocks.shape[1]);

    Ok(assemble_descriptor(blocks))
}

#[cfg(test)]
mod tests {
    use hogrs_image::Image;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = HogConfig::new();
        assert_eq!(config.bins, 20);
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.weight, HistogramWeight::Orientation);
        assert_eq!(config.strategy, ExecutionStrategy::ParallelRows);
    }

    #[test]
    fn test_descriptor_len() {
        let config = HogConfig::default();
        assert_eq!(config.cell_grid_shape(64, 64), [2, 2, 20]);
        assert_eq!(config.descriptor_len(64, 64), 80);
        assert_eq!(config.descriptor_len(65, 64), 2 * 4 * 20);
        assert_eq!(config.descriptor_len(32, 512), 0);
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            HogConfig::new().with_bins(0).validate(),
            Err(HogError::InvalidParameter {
                name: "bins",
                value: 0
            })
        );
        assert_eq!(
            HogConfig::new().with_cell_size(0).validate(),
            Err(HogError::InvalidParameter {
                name: "cell_size",
                value: 0
            })
        );
        assert_eq!(
            HogConfig::new()
                .with_strategy(ExecutionStrategy::Fixed(0))
                .validate(),
            Err(HogError::Parallel(ParallelError::InvalidThreadCount(0)))
        );
        assert_eq!(
            HogConfig::new()
                .with_strategy(ExecutionStrategy::Fixed(2))
                .validate(),
            Ok(())
        );
        assert_eq!(HogConfig::new().validate(), Ok(()));
    }

    #[test]
    fn test_hog_rejects_parameters_first() -> Result<(), HogError> {
        let image = Image::from_shape_vec(&[4, 4], vec![1.0f32; 16])?;
        let res = hog(&image, &HogConfig::new().with_cell_size(0));
        assert_eq!(
            res,
            Err(HogError::InvalidParameter {
                name: "cell_size",
                value: 0
            })
        );
        Ok(())
    }

    #[test]
    fn test_hog_small_image_is_empty() -> Result<(), HogError> {
        let image = Image::from_shape_vec(&[10, 10], vec![3u16; 100])?;
        let descriptor = hog(&image, &HogConfig::default())?;
        assert!(descriptor.is_empty());
        Ok(())
    }
}
