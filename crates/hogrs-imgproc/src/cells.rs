use hogrs_tensor::Tensor3;

use crate::{
    error::HogError,
    gradient::GradientMap,
    hog::HistogramWeight,
    parallel::{par_iter_rows_mut, ExecutionStrategy},
};

/// Shape of the cell grid covering an image of `rows` x `cols` pixels.
///
/// The last row and column of cells may be partial.
///
/// # Example
///
/// ```
/// use hogrs_imgproc::cells::cell_grid_shape;
///
/// assert_eq!(cell_grid_shape(64, 64, 32, 20), [2, 2, 20]);
/// assert_eq!(cell_grid_shape(65, 40, 32, 9), [3, 2, 9]);
/// ```
pub fn cell_grid_shape(rows: usize, cols: usize, cell_size: usize, bins: usize) -> [usize; 3] {
    [rows.div_ceil(cell_size), cols.div_ceil(cell_size), bins]
}

/// Vote one pixel into an orientation histogram.
///
/// The vote is split between the bin containing `orientation` and the next bin (wrapping
/// around at 180 degrees). The containing bin receives the fraction of the bin width already
/// covered by the orientation and the next bin the remainder.
///
/// # Arguments
///
/// * `hist` - The histogram to update; its length is the number of bins.
/// * `orientation` - The orientation in degrees, in `[0, 180)`.
/// * `magnitude` - The gradient magnitude.
/// * `weight` - Which quantity the vote is weighted by.
pub fn accumulate_orientation(
    hist: &mut [f32],
    orientation: f32,
    magnitude: f32,
    weight: HistogramWeight,
) {
    let bins = hist.len();
    let bin_width = 180.0 / bins as f32;

    let bin1 = ((orientation / bin_width).floor() as usize).min(bins - 1);
    let bin2 = (bin1 + 1) % bins;
    let frac1 = (orientation - bin1 as f32 * bin_width) / bin_width;
    let frac2 = 1.0 - frac1;

    let vote = match weight {
        HistogramWeight::Orientation => orientation,
        HistogramWeight::Magnitude => magnitude,
    };

    hist[bin1] += frac1 * vote;
    hist[bin2] += frac2 * vote;
}

/// Compute one orientation histogram per square cell of the gradient maps.
///
/// # Arguments
///
/// * `gradients` - The gradient maps with shape (H, W).
/// * `cell_size` - The side of a cell in pixels.
/// * `bins` - The number of orientation bins spanning `[0, 180)`.
/// * `weight` - Which quantity each pixel votes with.
/// * `strategy` - How rows of cells are scheduled across threads.
///
/// # Returns
///
/// The cell grid with shape (ceil(H / cell_size), ceil(W / cell_size), bins).
///
/// # Errors
///
/// Returns [`HogError::InvalidParameter`] if `cell_size` or `bins` is zero and
/// [`HogError::InvalidShape`] if the two gradient maps differ in shape.
pub fn compute_cell_histograms(
    gradients: &GradientMap,
    cell_size: usize,
    bins: usize,
    weight: HistogramWeight,
    strategy: ExecutionStrategy,
) -> Result<Tensor3<f32>, HogError> {
    if cell_size == 0 {
        return Err(HogError::InvalidParameter {
            name: "cell_size",
            value: cell_size,
        });
    }
    if bins == 0 {
        return Err(HogError::InvalidParameter {
            name: "bins",
            value: bins,
        });
    }

    let [rows, cols] = gradients.magnitude.shape;
    if gradients.orientation.shape != [rows, cols] {
        return Err(HogError::InvalidShape(gradients.orientation.shape.to_vec()));
    }

    let shape = cell_grid_shape(rows, cols, cell_size, bins);
    let mut grid = Tensor3::<f32>::zeros(shape);

    let magnitude = gradients.magnitude.as_slice();
    let orientation = gradients.orientation.as_slice();

    // one row of cells per task
    par_iter_rows_mut(strategy, grid.as_slice_mut(), shape[1] * bins, |cell_row, hists| {
        let y0 = cell_row * cell_size;
        let y1 = (y0 + cell_size).min(rows);
        for (cell_col, hist) in hists.chunks_exact_mut(bins).enumerate() {
            let x0 = cell_col * cell_size;
            let x1 = (x0 + cell_size).min(cols);
            for y in y0..y1 {
                let offset = y * cols;
                for x in x0..x1 {
                    accumulate_orientation(
                        hist,
                        orientation[offset + x],
                        magnitude[offset + x],
                        weight,
                    );
                }
            }
        }
    })?;

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use hogrs_tensor::Tensor2;

    use super::*;

    fn uniform_gradients(rows: usize, cols: usize, mag: f32, ori: f32) -> GradientMap {
        GradientMap {
            magnitude: Tensor2::from_shape_val([rows, cols], mag),
            orientation: Tensor2::from_shape_val([rows, cols], ori),
        }
    }

    #[test]
    fn test_accumulate_on_bin_edge() {
        let mut hist = vec![0.0; 20];
        accumulate_orientation(&mut hist, 45.0, 1.0, HistogramWeight::Orientation);
        // 45 is the lower edge of bin 5: everything goes to the next bin
        assert_eq!(hist[5], 0.0);
        assert_eq!(hist[6], 45.0);
        assert_relative_eq!(hist.iter().sum::<f32>(), 45.0);
    }

    #[test]
    fn test_accumulate_split() {
        let mut hist = vec![0.0; 20];
        accumulate_orientation(&mut hist, 49.5, 2.0, HistogramWeight::Orientation);
        assert_relative_eq!(hist[5], 0.5 * 49.5, epsilon = 1e-4);
        assert_relative_eq!(hist[6], 0.5 * 49.5, epsilon = 1e-4);
    }

    #[test]
    fn test_accumulate_wraps_last_bin() {
        let mut hist = vec![0.0; 20];
        accumulate_orientation(&mut hist, 175.0, 4.0, HistogramWeight::Magnitude);
        let frac1 = (175.0 - 171.0) / 9.0;
        assert_relative_eq!(hist[19], frac1 * 4.0, epsilon = 1e-5);
        assert_relative_eq!(hist[0], (1.0 - frac1) * 4.0, epsilon = 1e-5);
        assert_eq!(hist[1..19].iter().sum::<f32>(), 0.0);
    }

    #[test]
    fn test_accumulate_non_divisor_bins() {
        let mut hist = vec![0.0; 7];
        accumulate_orientation(&mut hist, 179.99, 1.0, HistogramWeight::Magnitude);
        assert!(hist.iter().all(|&v| v >= 0.0));
        assert_relative_eq!(hist.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_cell_grid_shape_partial() {
        assert_eq!(cell_grid_shape(10, 7, 4, 3), [3, 2, 3]);
        assert_eq!(cell_grid_shape(8, 8, 8, 9), [1, 1, 9]);
    }

    #[test]
    fn test_cells_orientation_weight() -> Result<(), HogError> {
        let grads = uniform_gradients(4, 6, 1.0, 90.0);
        let grid = compute_cell_histograms(
            &grads,
            4,
            20,
            HistogramWeight::Orientation,
            ExecutionStrategy::Serial,
        )?;
        assert_eq!(grid.shape, [1, 2, 20]);
        // full 4x4 cell then a partial 4x2 cell
        assert_relative_eq!(*grid.get_unchecked([0, 0, 11]), 16.0 * 90.0);
        assert_relative_eq!(*grid.get_unchecked([0, 1, 11]), 8.0 * 90.0);
        assert_eq!(*grid.get_unchecked([0, 0, 10]), 0.0);
        Ok(())
    }

    #[test]
    fn test_cells_magnitude_weight() -> Result<(), HogError> {
        let grads = uniform_gradients(5, 5, 2.0, 0.0);
        let grid = compute_cell_histograms(
            &grads,
            2,
            4,
            HistogramWeight::Magnitude,
            ExecutionStrategy::ParallelRows,
        )?;
        assert_eq!(grid.shape, [3, 3, 4]);
        assert_eq!(grid.get([0, 0, 1]), Some(&8.0));
        assert_eq!(grid.get([2, 2, 1]), Some(&2.0));
        assert_eq!(grid.get([1, 2, 1]), Some(&4.0));
        Ok(())
    }

    #[test]
    fn test_cells_invalid_parameters() {
        let grads = uniform_gradients(2, 2, 0.0, 0.0);
        let weight = HistogramWeight::Orientation;
        let strategy = ExecutionStrategy::Serial;
        assert_eq!(
            compute_cell_histograms(&grads, 0, 4, weight, strategy),
            Err(HogError::InvalidParameter {
                name: "cell_size",
                value: 0
            })
        );
        assert_eq!(
            compute_cell_histograms(&grads, 2, 0, weight, strategy),
            Err(HogError::InvalidParameter {
                name: "bins",
                value: 0
            })
        );
    }

    #[test]
    fn test_cells_mismatched_maps() {
        let grads = GradientMap {
            magnitude: Tensor2::zeros([2, 2]),
            orientation: Tensor2::zeros([2, 3]),
        };
        let res = compute_cell_histograms(
            &grads,
            2,
            4,
            HistogramWeight::Orientation,
            ExecutionStrategy::Serial,
        );
        assert_eq!(res, Err(HogError::InvalidShape(vec![2, 3])));
    }
}
