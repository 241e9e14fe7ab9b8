#![deny(clippy::pedantic)]
#![deny(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod common;
pub mod io;
pub mod schema;

pub use common::types::{Address, Amount, ProposedTransaction};
