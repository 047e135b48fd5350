//! Statistics used across the pipeline.
//!
//! - Descriptive summaries (median, quartiles, the `describe` table)
//! - The four moments reported for the target column
//! - Pearson correlation matrices
//!
//! Missing values are always removed by an explicit filter
//! ([`descriptive::present_values`] or pairwise completion in
//! [`correlation::pearson`]) before any estimator runs.

pub mod correlation;
pub mod descriptive;
pub mod moments;

pub use correlation::{CorrelationMatrix, pearson};
pub use descriptive::{ColumnSummary, describe, median, present_values, quantile};
pub use moments::{Moments, compute_moments};
