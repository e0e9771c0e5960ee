//! # lumen-wgpu
//!
//! WGSL compute-kernel generation and selection for the Lumen tensor
//! backend.
//!
//! This crate turns operand shapes into ready-to-compile compute shaders:
//! - Tiled matmul with shared-memory panels, vec4 packed access,
//!   bounds-check elision and fused bias/activation epilogues
//! - Elementwise binary kernels (17 operations) with three access
//!   strategies: packed vec4, workgroup-shared broadcast, and generic
//!   strided broadcast
//!
//! Everything here is pure source emission. Device and queue management,
//! buffer binding and pipeline caching belong to the runtime layered on
//! top; it consumes the [`Program`] artifact produced here.

pub mod binary;
pub mod dispatch;
pub mod matmul;
pub mod program;
pub mod source;

pub use binary::{BinaryOp, BinaryStrategy};
pub use dispatch::{Dispatch, DispatchLayout, WorkgroupSize};
pub use matmul::{Activation, MatmulOptions};
pub use program::Program;
