//! The generated-kernel artifact.

use crate::dispatch::{Dispatch, DispatchLayout, WorkgroupSize};

/// A fully resolved compute kernel, ready for the runtime to compile and
/// launch.
///
/// A `Program` is immutable once built: the source, cache key, dispatch
/// geometry and binding list are all fixed by the factory that produced
/// it. Input bindings occupy group-0 slots in the order listed, followed
/// by the `result` storage binding and the `uniforms` buffer; the packed
/// uniform words are carried along so the runtime can upload them without
/// re-deriving shape facts.
#[derive(Debug, Clone)]
pub struct Program {
    source: String,
    shader_key: String,
    dispatch: Dispatch,
    workgroup_size: WorkgroupSize,
    dispatch_layout: DispatchLayout,
    inputs: Vec<&'static str>,
    uniforms: Vec<i32>,
}

impl Program {
    pub(crate) fn new(
        source: String,
        shader_key: String,
        dispatch: Dispatch,
        workgroup_size: WorkgroupSize,
        dispatch_layout: DispatchLayout,
        inputs: Vec<&'static str>,
        uniforms: Vec<i32>,
    ) -> Self {
        Self {
            source,
            shader_key,
            dispatch,
            workgroup_size,
            dispatch_layout,
            inputs,
            uniforms,
        }
    }

    /// WGSL module text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Deterministic cache key: equal keys imply byte-identical source.
    pub fn shader_key(&self) -> &str {
        &self.shader_key
    }

    /// Workgroup counts to launch.
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Threads per workgroup, matching the `@workgroup_size` attribute in
    /// the source.
    pub fn workgroup_size(&self) -> WorkgroupSize {
        self.workgroup_size
    }

    /// How output axes map onto dispatch axes.
    pub fn dispatch_layout(&self) -> &DispatchLayout {
        &self.dispatch_layout
    }

    /// Ordered names of the input storage bindings.
    pub fn inputs(&self) -> &[&'static str] {
        &self.inputs
    }

    /// Packed words for the shader's `Uniforms` struct, including any
    /// trailing alignment padding.
    pub fn uniform_words(&self) -> &[i32] {
        &self.uniforms
    }
}
