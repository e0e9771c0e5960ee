//! # lumen-core
//!
//! Foundational types shared by the Lumen kernel generators:
//! - `Shape`: stack-allocated dimension list with broadcasting and
//!   stride helpers
//! - `LumenError`: the error enum for shape-driven construction failures

pub mod error;
pub mod shape;

pub use error::LumenError;
pub use shape::Shape;

pub type Result<T> = std::result::Result<T, LumenError>;
