use hogrs_tensor::{Tensor2, Tensor3};

use crate::{
    error::HogError,
    parallel::{par_iter_rows_mut, ExecutionStrategy},
};

/// Number of cells concatenated into one block.
pub const CELLS_PER_BLOCK: usize = 4;

/// Group the cell grid into overlapping 2x2 blocks and L2-normalize each block.
///
/// Blocks are produced in row-major order. The block at `(i, j)` concatenates the cells
/// `(i, j)`, `(i + 1, j)`, `(i, j + 1)` and `(i + 1, j + 1)`, in that order. A block whose
/// norm is zero is left as zeros.
///
/// # Arguments
///
/// * `cells` - The cell grid with shape (R, C, bins).
/// * `strategy` - How blocks are scheduled across threads.
///
/// # Returns
///
/// The block vectors with shape ((R - 1) * (C - 1), 4 * bins). The tensor is empty when
/// R < 2 or C < 2.
pub fn normalize_blocks(
    cells: &Tensor3<f32>,
    strategy: ExecutionStrategy,
) -> Result<Tensor2<f32>, HogError> {
    let [rows, cols, bins] = cells.shape;
    if bins == 0 {
        return Err(HogError::InvalidParameter {
            name: "bins",
            value: bins,
        });
    }

    let block_rows = rows.saturating_sub(1);
    let block_cols = cols.saturating_sub(1);
    let block_len = CELLS_PER_BLOCK * bins;

    let mut blocks = Tensor2::<f32>::zeros([block_rows * block_cols, block_len]);
    if blocks.numel() == 0 {
        return Ok(blocks);
    }

    par_iter_rows_mut(strategy, blocks.as_slice_mut(), block_len, |idx, block| {
        let (i, j) = (idx / block_cols, idx % block_cols);
        let sources = [[i, j], [i + 1, j], [i, j + 1], [i + 1, j + 1]];
        for ([r, c], dst) in sources.into_iter().zip(block.chunks_exact_mut(bins)) {
            let offset = cells.get_iter_offset_unchecked([r, c, 0]);
            dst.copy_from_slice(&cells.as_slice()[offset..offset + bins]);
        }

        let norm = block.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm != 0.0 {
            block.iter_mut().for_each(|v| *v /= norm);
        }
    })?;

    Ok(blocks)
}
