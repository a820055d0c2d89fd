//! `epi-runner` — independent replications in parallel, averaged into one
//! calibration series.
//!
//! ```text
//! run_batch
//!   ① validate once       — bad parameters fail before any thread starts
//!   ② thread pool         — sized by `SimConfig::num_threads`
//!   ③ replications 0..n   — seed_i = SimRng::replication_seed(seed, i)
//!   ④ collect in order    — first failure fails the batch
//!   ⑤ average             — elementwise mean of the adjusted cumulative
//!                           cases per 100k
//! ```
//!
//! Replications share the reference data and parameters by `&` and own
//! everything else, so the output is identical at any worker count.
//!
//! | Module        | Contents                                      |
//! |---------------|-----------------------------------------------|
//! | [`batch`]     | `run_batch`, `BatchOutput`                    |
//! | [`stats`]     | `mean_series`                                 |
//! | [`error`]     | `RunnerError`, `RunnerResult<T>`              |

pub mod batch;
pub mod error;
pub mod stats;


pub use batch::{BatchOutput, run_batch};
pub use error::{RunnerError, RunnerResult};
pub use stats::mean_series;
