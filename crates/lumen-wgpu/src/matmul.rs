//! Tiled matmul WGSL generation.
//!
//! Two kernel bodies share one set of shape-aware wrappers:
//! - **panel**: blocked multiply with workgroup-shared tiles of both
//!   operands, `rows_per_thread` vec4 accumulators per thread, two
//!   barriers per tile iteration (after the cooperative load and after
//!   the FMA passes);
//! - **vector**: for single-row outputs, a 1-D shared tile over A only,
//!   with B read straight from storage.
//!
//! Reads elide their bounds branch when the tile evenly divides the
//! operand (`tiles_fit_evenly`); the write is always bounds-checked
//! against the true output extents and carries the optional bias add and
//! fused activation.

use lumen_core::{LumenError, Result, Shape};
use tracing::debug;

use crate::dispatch::{
    compute_dispatch, tiles_fit_evenly, workgroup_size_for_matmul, DispatchLayout, WorkgroupSize,
};
use crate::program::Program;
use crate::source::SourceBuilder;

/// Width of every packed storage access. Inner and output-column extents
/// must be divisible by this.
pub const VEC_WIDTH: usize = 4;

const DEFAULT_ROWS_PER_THREAD: usize = 4;

/// Activation fused into `mm_write` before the result is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Arbitrary WGSL expression over the vec4 variable `value`.
    Expression(String),
    /// PReLU with a per-channel `prelu_alpha` operand.
    Prelu,
}

/// Caller options for matmul program construction.
#[derive(Debug, Clone, Default)]
pub struct MatmulOptions {
    /// Add a per-column `bias` operand before the activation.
    pub bias: bool,
    pub activation: Option<Activation>,
    /// Output rows accumulated per thread. Advisory: forced to 1 when the
    /// output has a single row.
    pub rows_per_thread: Option<usize>,
}

/// Which kernel body a shape pair selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatmulVariant {
    Panel,
    Vector,
}

/// Single-row outputs take the vector body; everything else the panel.
pub fn select_variant(row_extent: usize) -> MatmulVariant {
    if row_extent == 1 {
        MatmulVariant::Vector
    } else {
        MatmulVariant::Panel
    }
}

/// `(batch, rows, cols)` of a rank-2 or rank-3 operand.
fn operand_dims(shape: &Shape) -> Result<(usize, usize, usize)> {
    match shape.dims() {
        [r, c] => Ok((1, *r, *c)),
        [b, r, c] => Ok((*b, *r, *c)),
        _ => Err(LumenError::UnsupportedRank {
            op: "matmul",
            rank: shape.ndim(),
            expected: "2 or 3",
        }),
    }
}

/// Reader wrapper over one packed operand.
///
/// Maps `(batch, row, col)` onto a flat vec4 index through the operand's
/// contiguous extents; when `guarded`, out-of-range reads produce a zero
/// vector instead.
fn read_fragment(
    fn_name: &str,
    buffer: &str,
    rows_field: &str,
    cols_field: &str,
    guarded: bool,
) -> String {
    let index = format!(
        "(batch * uniforms.{rows_field} * uniforms.{cols_field} + row * uniforms.{cols_field} + col) / 4"
    );
    if guarded {
        format!(
            "
fn {fn_name}(batch : i32, row : i32, col : i32) -> vec4<f32> {{
    var value = vec4<f32>(0.0);
    if (row < uniforms.{rows_field} && col < uniforms.{cols_field}) {{
        value = {buffer}[{index}];
    }}
    return value;
}}
"
        )
    } else {
        format!(
            "
fn {fn_name}(batch : i32, row : i32, col : i32) -> vec4<f32> {{
    return {buffer}[{index}];
}}
"
        )
    }
}

/// Bounds-checked writer with the optional bias add and activation.
fn write_fragment(bias: bool, activation: Option<&Activation>) -> String {
    let mut epilogue = String::new();
    if bias {
        epilogue.push_str("        value = value + bias[col / 4];\n");
    }
    match activation {
        Some(Activation::Expression(expr)) => {
            epilogue.push_str(&format!("        value = {expr};\n"));
        }
        Some(Activation::Prelu) => {
            epilogue.push_str(
                "        let alpha = prelu_alpha[col / 4];
        let mask = vec4<f32>(value < vec4<f32>(0.0));
        value = (mask * alpha * value) + ((vec4<f32>(1.0) - mask) * value);\n",
            );
        }
        None => {}
    }
    format!(
        "
fn mm_write(batch : i32, row : i32, col : i32, value_in : vec4<f32>) {{
    if (row < uniforms.dim_a_outer && col < uniforms.dim_b_outer) {{
        var value = value_in;
{epilogue}        let flat_index = (batch * uniforms.dim_a_outer * uniforms.dim_b_outer + row * uniforms.dim_b_outer + col) / 4;
        result[flat_index] = value;
    }}
}}
"
    )
}

fn panel_body(wg: WorkgroupSize, rows_per_thread: usize, tile_inner: usize) -> String {
    let fma_passes = tile_inner / VEC_WIDTH;
    format!(
        "
@compute @workgroup_size({wx}, {wy}, 1)
fn main(
    @builtin(local_invocation_id) local_id : vec3<u32>,
    @builtin(global_invocation_id) global_id : vec3<u32>,
    @builtin(workgroup_id) workgroup_id : vec3<u32>,
) {{
    let batch = i32(workgroup_id.z);
    let batch_a = batch % uniforms.batch_a;
    let batch_b = batch % uniforms.batch_b;

    let tile_row = i32(local_id.y) * ROWS_PER_THREAD;
    let tile_col = i32(local_id.x);
    let global_row = i32(global_id.y) * ROWS_PER_THREAD;
    let global_col = i32(global_id.x) * 4;
    let num_tiles = (uniforms.dim_inner - 1) / TILE_INNER + 1;

    var acc : array<vec4<f32>, {rows_per_thread}>;
    var k_start = 0;

    for (var t = 0; t < num_tiles; t = t + 1) {{
        for (var inner_row = 0; inner_row < ROWS_PER_THREAD; inner_row = inner_row + 1) {{
            mm_a_sub[tile_row + inner_row][tile_col] =
                mm_read_a(batch_a, global_row + inner_row, k_start + tile_col * 4);
        }}
        let tile_row_b = i32(local_id.y) * ROWS_PER_THREAD_B;
        for (var inner_row = 0; inner_row < ROWS_PER_THREAD_B; inner_row = inner_row + 1) {{
            mm_b_sub[tile_row_b + inner_row][tile_col] =
                mm_read_b(batch_b, k_start + tile_row_b + inner_row, global_col);
        }}
        k_start = k_start + TILE_INNER;
        workgroupBarrier();

        for (var k = 0; k < {fma_passes}; k = k + 1) {{
            let b_row = k * 4;
            let b_cached_0 = mm_b_sub[b_row][tile_col];
            let b_cached_1 = mm_b_sub[b_row + 1][tile_col];
            let b_cached_2 = mm_b_sub[b_row + 2][tile_col];
            let b_cached_3 = mm_b_sub[b_row + 3][tile_col];
            for (var i = 0; i < ROWS_PER_THREAD; i = i + 1) {{
                let a_cached = mm_a_sub[tile_row + i][k];
                acc[i] = acc[i] + a_cached.x * b_cached_0;
                acc[i] = acc[i] + a_cached.y * b_cached_1;
                acc[i] = acc[i] + a_cached.z * b_cached_2;
                acc[i] = acc[i] + a_cached.w * b_cached_3;
            }}
        }}
        workgroupBarrier();
    }}

    for (var i = 0; i < ROWS_PER_THREAD; i = i + 1) {{
        mm_write(batch, global_row + i, global_col, acc[i]);
    }}
}}
",
        wx = wg.x,
        wy = wg.y,
    )
}

fn vector_body(wg: WorkgroupSize) -> String {
    format!(
        "
@compute @workgroup_size({wx}, 1, 1)
fn main(
    @builtin(local_invocation_id) local_id : vec3<u32>,
    @builtin(global_invocation_id) global_id : vec3<u32>,
    @builtin(workgroup_id) workgroup_id : vec3<u32>,
) {{
    let batch = i32(workgroup_id.z);
    let batch_a = batch % uniforms.batch_a;
    let batch_b = batch % uniforms.batch_b;

    let tile_col = i32(local_id.x);
    let global_col = i32(global_id.x) * 4;
    let num_tiles = (uniforms.dim_inner - 1) / TILE_K + 1;

    var acc = vec4<f32>(0.0);

    for (var t = 0; t < num_tiles; t = t + 1) {{
        let k_start = t * TILE_K;
        mm_a_sub[tile_col] = mm_read_a(batch_a, 0, k_start + tile_col * 4);
        workgroupBarrier();

        for (var k = 0; k < {wx}; k = k + 1) {{
            let k_base = k_start + k * 4;
            let b_cached_0 = mm_read_b(batch_b, k_base, global_col);
            let b_cached_1 = mm_read_b(batch_b, k_base + 1, global_col);
            let b_cached_2 = mm_read_b(batch_b, k_base + 2, global_col);
            let b_cached_3 = mm_read_b(batch_b, k_base + 3, global_col);
            let a_cached = mm_a_sub[k];
            acc = acc + a_cached.x * b_cached_0;
            acc = acc + a_cached.y * b_cached_1;
            acc = acc + a_cached.z * b_cached_2;
            acc = acc + a_cached.w * b_cached_3;
        }}
        workgroupBarrier();
    }}

    mm_write(batch, 0, global_col, acc);
}}
",
        wx = wg.x,
    )
}

/// Build a batched matmul program for `a_shape @ b_shape`.
///
/// Operands are rank 2 or 3; batch extents must match or broadcast from 1.
/// The packed path requires the inner and output-column extents to be
/// divisible by [`VEC_WIDTH`]; violating that is a caller bug and panics.
pub fn build(a_shape: &Shape, b_shape: &Shape, options: &MatmulOptions) -> Result<Program> {
    let (batch_a, m, k) = operand_dims(a_shape)?;
    let (batch_b, k_rhs, n) = operand_dims(b_shape)?;
    if k != k_rhs {
        return Err(LumenError::MatmulDimMismatch {
            m,
            k_lhs: k,
            k_rhs,
            n,
        });
    }
    if batch_a != batch_b && batch_a != 1 && batch_b != 1 {
        return Err(LumenError::BatchMismatch {
            lhs: batch_a,
            rhs: batch_b,
        });
    }
    assert!(
        k % VEC_WIDTH == 0 && n % VEC_WIDTH == 0,
        "matmul packed path requires inner ({k}) and output-column ({n}) extents divisible by {VEC_WIDTH}"
    );

    let batch = batch_a.max(batch_b);
    let out_rank = a_shape.ndim().max(b_shape.ndim());
    let out_shape = Shape::new(&[batch, m, n]);

    let variant = select_variant(m);
    let rows_per_thread = match variant {
        MatmulVariant::Vector => 1,
        MatmulVariant::Panel => options.rows_per_thread.unwrap_or(DEFAULT_ROWS_PER_THREAD),
    };
    let wg = workgroup_size_for_matmul(m, k, n);

    // Tile geometry and fit analysis per variant.
    let (fit_a, fit_b) = match variant {
        MatmulVariant::Panel => {
            let tile_a_outer = wg.y as usize * rows_per_thread;
            let tile_b_outer = wg.x as usize * VEC_WIDTH;
            let tile_inner = tile_b_outer;
            (
                tiles_fit_evenly(&[tile_a_outer, tile_inner], &[m, k]),
                tiles_fit_evenly(&[tile_inner, tile_b_outer], &[k, n]),
            )
        }
        MatmulVariant::Vector => {
            let tile_k = wg.x as usize * VEC_WIDTH;
            (
                tiles_fit_evenly(&[tile_k], &[k]),
                tiles_fit_evenly(&[tile_k, tile_k], &[k, n]),
            )
        }
    };

    let activation_tag = match &options.activation {
        None => "none",
        Some(Activation::Prelu) => "prelu",
        Some(Activation::Expression(expr)) => expr.as_str(),
    };
    let variant_tag = match variant {
        MatmulVariant::Panel => "panel",
        MatmulVariant::Vector => "vector",
    };
    let shader_key = format!(
        "matmul_{variant_tag}_r{rows_per_thread}_fa{fit_a}_fb{fit_b}_bias{}_act:{activation_tag}_rank{out_rank}_wg{}x{}x{}",
        options.bias, wg.x, wg.y, wg.z,
    );
    debug!(
        key = %shader_key,
        m, k, n, batch,
        "building matmul program"
    );

    let mut sb = SourceBuilder::new();
    sb.fragment(
        "
struct Uniforms {
    dim_a_outer : i32,
    dim_inner : i32,
    dim_b_outer : i32,
    batch_a : i32,
    batch_b : i32,
}
",
    );
    sb.blank();

    let mut inputs: Vec<&'static str> = vec!["a", "b"];
    if options.bias {
        inputs.push("bias");
    }
    if options.activation == Some(Activation::Prelu) {
        inputs.push("prelu_alpha");
    }
    let mut slot = 0;
    for name in &inputs {
        sb.line(format!(
            "@group(0) @binding({slot}) var<storage, read> {name} : array<vec4<f32>>;"
        ));
        slot += 1;
    }
    sb.line(format!(
        "@group(0) @binding({slot}) var<storage, read_write> result : array<vec4<f32>>;"
    ));
    sb.line(format!(
        "@group(0) @binding({}) var<uniform> uniforms : Uniforms;",
        slot + 1
    ));
    sb.blank();

    match variant {
        MatmulVariant::Panel => {
            let tile_a_outer = wg.y as usize * rows_per_thread;
            let tile_b_outer = wg.x as usize * VEC_WIDTH;
            let tile_inner = tile_b_outer;
            sb.line(format!("const TILE_INNER : i32 = {tile_inner};"));
            sb.line(format!("const ROWS_PER_THREAD : i32 = {rows_per_thread};"));
            sb.line(format!(
                "const ROWS_PER_THREAD_B : i32 = {};",
                tile_inner / wg.y as usize
            ));
            sb.blank();
            sb.line(format!(
                "var<workgroup> mm_a_sub : array<array<vec4<f32>, {}>, {tile_a_outer}>;",
                tile_inner / VEC_WIDTH
            ));
            sb.line(format!(
                "var<workgroup> mm_b_sub : array<array<vec4<f32>, {}>, {tile_inner}>;",
                tile_b_outer / VEC_WIDTH
            ));
        }
        MatmulVariant::Vector => {
            let tile_k = wg.x as usize * VEC_WIDTH;
            sb.line(format!("const TILE_K : i32 = {tile_k};"));
            sb.blank();
            sb.line(format!(
                "var<workgroup> mm_a_sub : array<vec4<f32>, {}>;",
                wg.x
            ));
        }
    }
    sb.blank();
    sb.fragment(&read_fragment(
        "mm_read_a",
        "a",
        "dim_a_outer",
        "dim_inner",
        !fit_a,
    ));
    sb.blank();
    sb.fragment(&read_fragment(
        "mm_read_b",
        "b",
        "dim_inner",
        "dim_b_outer",
        !fit_b,
    ));
    sb.blank();
    sb.fragment(&write_fragment(options.bias, options.activation.as_ref()));
    sb.blank();
    match variant {
        MatmulVariant::Panel => {
            let tile_inner = wg.x as usize * VEC_WIDTH;
            sb.fragment(&panel_body(wg, rows_per_thread, tile_inner));
        }
        MatmulVariant::Vector => {
            sb.fragment(&vector_body(wg));
        }
    }

    let dispatch = compute_dispatch(
        &DispatchLayout::matmul(),
        &out_shape,
        wg,
        [VEC_WIDTH, rows_per_thread, 1],
    );

    Ok(Program::new(
        sb.build(),
        shader_key,
        dispatch,
        wg,
        DispatchLayout::matmul(),
        inputs,
        vec![m as i32, k as i32, n as i32, batch_a as i32, batch_b as i32],
    ))
}
