//! Batch scalar multiplication over secp256k1.
//!
//! A batch is an ordered list of `(point, scalar)` submissions. Each
//! submission is validated on its own; the valid ones are multiplied on
//! independent lanes with no shared mutable state, and the resulting
//! Jacobian points meet at a single join where one field inversion,
//! amortized over the whole batch, brings them to affine form. Results come
//! back in submission order, one per submission.
//!
//! # Example
//!
//! ```
//! use ecloop_batch::{BatchConfig, BatchExecutor, PointInput, Submission};
//! use ecloop_curve::Affine;
//!
//! let executor = BatchExecutor::new(BatchConfig::default()).expect("executor");
//! let g = PointInput::from(&Affine::generator());
//!
//! let results = executor.run(&[
//!     Submission::new(g.clone(), vec![2]),
//!     Submission::new(g, vec![0; 40]),
//! ]);
//!
//! assert_eq!(results[0], Ok(Affine::generator().double()));
//! assert_eq!(results[1].unwrap_err().index(), 1);
//! ```

mod config;
mod errors;
mod executor;
mod item;
mod lane;


pub use config::{BatchConfig, Method};
pub use errors::{BatchError, Coordinate, ItemError};
pub use executor::BatchExecutor;
pub use item::{PointInput, Submission, WorkItem};
pub use lane::{lane_for, mul_reduce_one, BinaryLane, Lane, WindowedLane};
