#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// block grouping and L2 normalization module.
pub mod block;

/// per-cell orientation histograms module.
pub mod cells;

/// descriptor flattening module.
pub mod descriptor;

/// error types for the descriptor pipeline.
pub mod error;

/// image gradient magnitude and orientation module.
pub mod gradient;

/// end-to-end descriptor computation and its configuration.
pub mod hog;

/// module containing parallization utilities.
pub mod parallel;

pub use crate::error::HogError;
pub use crate::hog::{hog, HistogramWeight, HogConfig};
pub use crate::parallel::ExecutionStrategy;
