//! Game-theoretic analysis of configurations.

pub mod table;

pub use table::{LosingTable, TableCache};
