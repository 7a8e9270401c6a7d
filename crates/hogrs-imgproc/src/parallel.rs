use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row length must be valid.
    #[error("row length must be > 0, got {0}")]
    InvalidRowStride(usize),

    /// Destination buffers do not have the same length.
    #[error("destination slices must have the same length")]
    SizeMismatch,
}

/// Controls how per-row work is executed.
///
/// Every strategy writes each output row from exactly one worker, so the results are
/// bit-identical whichever strategy is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

impl ExecutionStrategy {
    fn run<F>(self, op: F) -> Result<(), ParallelError>
    where
        F: FnOnce(bool) + Send,
    {
        match self {
            ExecutionStrategy::Serial => op(false),
            ExecutionStrategy::ParallelRows => op(true),
            ExecutionStrategy::Fixed(n) => {
                if n == 0 {
                    return Err(ParallelError::InvalidThreadCount(n));
                }
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?;

                pool.install(|| op(true));
            }
        }
        Ok(())
    }
}

/// Apply a function to each row of a destination buffer.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `dst` - The destination buffer, a whole number of rows of `row_len` elements.
/// * `row_len` - The number of elements per row.
/// * `f` - Called with the row index and the mutable row.
pub fn par_iter_rows_mut<T, F>(
    strategy: ExecutionStrategy,
    dst: &mut [T],
    row_len: usize,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if row_len == 0 {
        return Err(ParallelError::InvalidRowStride(row_len));
    }

    strategy.run(|parallel| {
        if parallel {
            dst.par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        } else {
            dst.chunks_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
    })
}

/// Apply a function to each pair of rows of two destination buffers of the same length.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `dst1` - The first destination buffer.
/// * `dst2` - The second destination buffer.
/// * `row_len` - The number of elements per row in both buffers.
/// * `f` - Called with the row index and the two mutable rows.
pub fn par_iter_rows_mut_two<T1, T2, F>(
    strategy: ExecutionStrategy,
    dst1: &mut [T1],
    dst2: &mut [T2],
    row_len: usize,
    f: F,
) -> Result<(), ParallelError>
where
    T1: Send,
    T2: Send,
    F: Fn(usize, &mut [T1], &mut [T2]) + Send + Sync,
{
    if row_len == 0 {
        return Err(ParallelError::InvalidRowStride(row_len));
    }

    if dst1.len() != dst2.len() {
        return Err(ParallelError::SizeMismatch);
    }

    strategy.run(|parallel| {
        if parallel {
            dst1.par_chunks_mut(row_len)
                .zip(dst2.par_chunks_mut(row_len))
                .enumerate()
                .for_each(|(r, (row1, row2))| f(r, row1, row2));
        } else {
            dst1.chunks_mut(row_len)
                .zip(dst2.chunks_mut(row_len))
                .enumerate()
                .for_each(|(r, (row1, row2))| f(r, row1, row2));
        }
    })
}
