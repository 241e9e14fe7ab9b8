#![deny(clippy::pedantic)]
#![deny(clippy::cargo)]
// Some of our dependencies transitively depend on different versions of the same crates, like syn
// and bitflags. TODO: remove once our dependencies no longer do that.
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod distribution;
pub mod invocation;
pub mod outputs;
pub mod snapshot;

pub use config::RunnerConfig;
pub use invocation::{demo, run};
pub use outputs::ComputeOutputs;
