//! Statistical engines for the hunches analyses.
//!
//! This crate provides the numeric building blocks every analysis reuses:
//!
//! - **Descriptive statistics**: count, mean, median, variance of a dataset
//! - **Binning**: fixed, labeled intervals and explicit categorical labels
//! - **Correlation**: Pearson correlation and a one-hot categorical association
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`binning`]: Interval bucketing with stable labels
//! - [`correlation`]: Linear association between a feature and a target
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use hunches_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 2.0);
//! assert_eq!(stats.median, 2.0);
//! assert_eq!(stats.count, 3);
//! ```
//!
//! ## Bucketing values
//!
//! ```
//! use hunches_stats::binning::{BucketAssignment, Boundaries};
//!
//! let edges = Boundaries::new(vec![0.0, 25.0, 50.0]).unwrap();
//! assert_eq!(edges.bucket_of(30.0), BucketAssignment::Bucket(1));
//! assert_eq!(edges.label(1), "[25, 50)");
//! ```
//!
//! ## Correlating a feature with a score
//!
//! ```
//! use hunches_stats::correlation::pearson;
//!
//! let lengths = [10.0, 20.0, 30.0, 40.0];
//! let scores = [1.0, 3.0, 2.0, 4.0];
//! let r = pearson(&lengths, &scores).unwrap();
//! assert!((r - 0.8).abs() < 1e-12);
//! ```

pub mod binning;
pub mod correlation;
pub mod descriptive;
