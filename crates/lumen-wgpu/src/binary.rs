//! Elementwise binary kernels: per-op WGSL expression bodies plus
//! selection between three access strategies.
//!
//! Strategy order (first match wins):
//! 1. identical shapes with a vec4-aligned element count — packed vec4
//!    loads, four vec4s per thread;
//! 2. one rank-1 operand small enough for workgroup memory, broadcast
//!    along the last axis of a higher-rank operand — the small side is
//!    staged into shared memory once per group and indexed by
//!    `flat % extent`;
//! 3. anything else — generic strided broadcast with per-operand strides
//!    in the uniform buffer, rank padded to 4.

use lumen_core::{LumenError, Result, Shape};
use tracing::debug;

use crate::dispatch::{compute_dispatch, DispatchLayout, WorkgroupSize};
use crate::program::Program;
use crate::source::SourceBuilder;

/// Largest rank-1 operand staged into workgroup memory (8 KiB of f32).
pub const SHARED_BROADCAST_LIMIT: usize = 2048;

/// The closed set of supported binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    SquaredDifference,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    LogicalAnd,
    IntDiv,
    Pow,
    Prelu,
    Min,
    Max,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 17] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::SquaredDifference,
        BinaryOp::Equal,
        BinaryOp::NotEqual,
        BinaryOp::Greater,
        BinaryOp::GreaterEqual,
        BinaryOp::Less,
        BinaryOp::LessEqual,
        BinaryOp::LogicalAnd,
        BinaryOp::IntDiv,
        BinaryOp::Pow,
        BinaryOp::Prelu,
        BinaryOp::Min,
        BinaryOp::Max,
    ];

    /// Stable lowercase name, used in shader keys.
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::SquaredDifference => "squared_difference",
            BinaryOp::Equal => "equal",
            BinaryOp::NotEqual => "not_equal",
            BinaryOp::Greater => "greater",
            BinaryOp::GreaterEqual => "greater_equal",
            BinaryOp::Less => "less",
            BinaryOp::LessEqual => "less_equal",
            BinaryOp::LogicalAnd => "logical_and",
            BinaryOp::IntDiv => "int_div",
            BinaryOp::Pow => "pow",
            BinaryOp::Prelu => "prelu",
            BinaryOp::Min => "min",
            BinaryOp::Max => "max",
        }
    }
}

/// Whether the op's body calls the bitcast-based NaN helper.
pub fn needs_nan_helper(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Min | BinaryOp::Max)
}

/// The WGSL function body computing `op` over `a` and `b`.
///
/// Scalar bodies operate on `f32`, vectorized bodies on `vec4<f32>` with
/// per-component results identical to four scalar evaluations. Comparison
/// ops return 1.0/0.0.
pub fn binary_op_body(op: BinaryOp, vectorized: bool) -> String {
    let body = if vectorized {
        vec4_body(op)
    } else {
        scalar_body(op)
    };
    body.to_string()
}

fn scalar_body(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "    return a + b;",
        BinaryOp::Sub => "    return a - b;",
        BinaryOp::Mul => "    return a * b;",
        BinaryOp::Div => "    return a / b;",
        BinaryOp::SquaredDifference => "    return (a - b) * (a - b);",
        BinaryOp::Equal => "    return f32(a == b);",
        BinaryOp::NotEqual => "    return f32(a != b);",
        BinaryOp::Greater => "    return f32(a > b);",
        BinaryOp::GreaterEqual => "    return f32(a >= b);",
        BinaryOp::Less => "    return f32(a < b);",
        BinaryOp::LessEqual => "    return f32(a <= b);",
        BinaryOp::LogicalAnd => "    return f32(a >= 1.0 && b >= 1.0);",
        // Rounded operands, truncated quotient, zero divisor yields zero.
        BinaryOp::IntDiv => {
            "    let ia = round(a);
    let ib = round(b);
    if (ib == 0.0) {
        return 0.0;
    }
    return sign(a) * sign(b) * floor(abs(ia / ib));"
        }
        BinaryOp::Pow => {
            "    if (b == 0.0) {
        return 1.0;
    }
    if (a < 0.0 && floor(b) < b) {
        return bitcast<f32>(0x7fc00000u);
    }
    let value = pow(abs(a), b);
    if (round(abs(b) % 2.0) == 1.0) {
        return sign(a) * value;
    }
    return value;"
        }
        BinaryOp::Prelu => {
            "    if (a < 0.0) {
        return a * b;
    }
    return a;"
        }
        BinaryOp::Min => {
            "    if (is_nan(a)) {
        return a;
    }
    if (is_nan(b)) {
        return b;
    }
    return min(a, b);"
        }
        BinaryOp::Max => {
            "    if (is_nan(a)) {
        return a;
    }
    if (is_nan(b)) {
        return b;
    }
    return max(a, b);"
        }
    }
}

fn vec4_body(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "    return a + b;",
        BinaryOp::Sub => "    return a - b;",
        BinaryOp::Mul => "    return a * b;",
        BinaryOp::Div => "    return a / b;",
        BinaryOp::SquaredDifference => "    return (a - b) * (a - b);",
        BinaryOp::Equal => "    return vec4<f32>(a == b);",
        BinaryOp::NotEqual => "    return vec4<f32>(a != b);",
        BinaryOp::Greater => "    return vec4<f32>(a > b);",
        BinaryOp::GreaterEqual => "    return vec4<f32>(a >= b);",
        BinaryOp::Less => "    return vec4<f32>(a < b);",
        BinaryOp::LessEqual => "    return vec4<f32>(a <= b);",
        BinaryOp::LogicalAnd => {
            "    return vec4<f32>((a >= vec4<f32>(1.0)) & (b >= vec4<f32>(1.0)));"
        }
        BinaryOp::IntDiv => {
            "    let ia = round(a);
    let ib = round(b);
    let quotient = sign(a) * sign(b) * floor(abs(ia / ib));
    return select(vec4<f32>(0.0), quotient, ib != vec4<f32>(0.0));"
        }
        BinaryOp::Pow => {
            "    let nan_val = vec4<f32>(bitcast<f32>(0x7fc00000u));
    let is_odd = round(abs(b) % vec4<f32>(2.0)) == vec4<f32>(1.0);
    var value = select(pow(abs(a), b), sign(a) * pow(abs(a), b), is_odd);
    value = select(value, nan_val, (a < vec4<f32>(0.0)) & (floor(b) < b));
    return select(value, vec4<f32>(1.0), b == vec4<f32>(0.0));"
        }
        BinaryOp::Prelu => {
            "    let a_less_than_zero = vec4<f32>(a < vec4<f32>(0.0));
    return (a_less_than_zero * b * a) + ((vec4<f32>(1.0) - a_less_than_zero) * a);"
        }
        BinaryOp::Min => {
            "    var value = min(a, b);
    value = select(value, a, is_nan_vec4(a));
    value = select(value, b, is_nan_vec4(b));
    return value;"
        }
        BinaryOp::Max => {
            "    var value = max(a, b);
    value = select(value, a, is_nan_vec4(a));
    value = select(value, b, is_nan_vec4(b));
    return value;"
        }
    }
}

const IS_NAN_SCALAR: &str = "
fn is_nan(val : f32) -> bool {
    return (bitcast<u32>(val) & 0x7fffffffu) > 0x7f800000u;
}
";

const IS_NAN_VEC4: &str = "
fn is_nan_vec4(val : vec4<f32>) -> vec4<bool> {
    return (bitcast<vec4<u32>>(val) & vec4<u32>(0x7fffffffu)) > vec4<u32>(0x7f800000u);
}
";

/// How a binary program reads its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryStrategy {
    /// Identical shapes, element count divisible by 4: packed vec4 access.
    Vec4,
    /// One small rank-1 operand staged into workgroup memory.
    SharedBroadcast { small_is_lhs: bool },
    /// Strided broadcast, one element per thread.
    Generic,
}

/// The shared path reads the large operand flat at the output index, so
/// the large side must already have the full output shape: its innermost
/// extent equals the small operand's (or the small operand is a single
/// element).
fn shared_applies(small: &Shape, large: &Shape) -> bool {
    small.ndim() == 1
        && small.numel() < SHARED_BROADCAST_LIMIT
        && large.ndim() > 1
        && (small.numel() == 1 || large.dim(large.ndim() - 1) == Some(small.numel()))
}

/// Pick the access strategy for a pair of broadcast-compatible shapes.
pub fn select_strategy(a_shape: &Shape, b_shape: &Shape) -> BinaryStrategy {
    if a_shape == b_shape && a_shape.numel() % 4 == 0 {
        return BinaryStrategy::Vec4;
    }
    if shared_applies(a_shape, b_shape) {
        return BinaryStrategy::SharedBroadcast { small_is_lhs: true };
    }
    if shared_applies(b_shape, a_shape) {
        return BinaryStrategy::SharedBroadcast { small_is_lhs: false };
    }
    BinaryStrategy::Generic
}

/// Build the elementwise program for `op` over two operands.
///
/// Shapes must be broadcast-compatible and the output rank at most 4.
pub fn build(op: BinaryOp, a_shape: &Shape, b_shape: &Shape) -> Result<Program> {
    let out_shape = a_shape
        .broadcast_with(b_shape)
        .ok_or_else(|| LumenError::Broadcast {
            lhs: a_shape.to_string(),
            rhs: b_shape.to_string(),
        })?;
    if out_shape.ndim() > 4 {
        return Err(LumenError::UnsupportedRank {
            op: "binary elementwise",
            rank: out_shape.ndim(),
            expected: "at most 4",
        });
    }

    let strategy = select_strategy(a_shape, b_shape);
    debug!(op = op.name(), ?strategy, out = %out_shape, "building binary program");

    match strategy {
        BinaryStrategy::Vec4 => Ok(build_vec4(op, &out_shape)),
        BinaryStrategy::SharedBroadcast { small_is_lhs } => {
            let small = if small_is_lhs { a_shape } else { b_shape };
            Ok(build_shared(op, small.numel(), small_is_lhs, &out_shape))
        }
        BinaryStrategy::Generic => build_generic(op, a_shape, b_shape, &out_shape),
    }
}

fn op_function(sb: &mut SourceBuilder, op: BinaryOp, vectorized: bool) {
    if needs_nan_helper(op) {
        sb.fragment(if vectorized { IS_NAN_VEC4 } else { IS_NAN_SCALAR });
        sb.blank();
    }
    let ty = if vectorized { "vec4<f32>" } else { "f32" };
    sb.line(format!("fn binary_op(a : {ty}, b : {ty}) -> {ty} {{"));
    sb.fragment(&binary_op_body(op, vectorized));
    sb.line("}");
}

fn storage_header(sb: &mut SourceBuilder, elem: &str) {
    sb.line(format!(
        "@group(0) @binding(0) var<storage, read> a : array<{elem}>;"
    ));
    sb.line(format!(
        "@group(0) @binding(1) var<storage, read> b : array<{elem}>;"
    ));
    sb.line(format!(
        "@group(0) @binding(2) var<storage, read_write> result : array<{elem}>;"
    ));
    sb.line("@group(0) @binding(3) var<uniform> uniforms : Uniforms;");
}

fn build_vec4(op: BinaryOp, out_shape: &Shape) -> Program {
    let wg = WorkgroupSize::new(128, 1, 1);
    let layout = DispatchLayout::flatten(out_shape.ndim());
    // Four vec4s per thread, 16 scalars.
    let dispatch = compute_dispatch(&layout, out_shape, wg, [16, 1, 1]);
    let vec_count = out_shape.numel() / 4;

    let mut sb = SourceBuilder::new();
    sb.fragment(
        "
struct Uniforms {
    size : i32,
}
",
    );
    sb.blank();
    storage_header(&mut sb, "vec4<f32>");
    sb.blank();
    op_function(&mut sb, op, true);
    sb.blank();
    sb.fragment(
        "
@compute @workgroup_size(128, 1, 1)
fn main(@builtin(global_invocation_id) global_id : vec3<u32>) {
    let index = i32(global_id.x) * 4;
    for (var i = 0; i < 4; i = i + 1) {
        let flat = index + i;
        if (flat < uniforms.size) {
            result[flat] = binary_op(a[flat], b[flat]);
        }
    }
}
",
    );

    Program::new(
        sb.build(),
        format!("binary_vec4_{}", op.name()),
        dispatch,
        wg,
        layout,
        vec!["a", "b"],
        vec![vec_count as i32],
    )
}

fn build_shared(op: BinaryOp, extent: usize, small_is_lhs: bool, out_shape: &Shape) -> Program {
    let wg = WorkgroupSize::new(256, 1, 1);
    let layout = DispatchLayout::flatten(out_shape.ndim());
    let dispatch = compute_dispatch(&layout, out_shape, wg, [1, 1, 1]);

    let small = if small_is_lhs { "a" } else { "b" };

    let mut sb = SourceBuilder::new();
    sb.fragment(
        "
struct Uniforms {
    size : i32,
}
",
    );
    sb.blank();
    storage_header(&mut sb, "f32");
    sb.blank();
    sb.line(format!("const SHARED_EXTENT : i32 = {extent};"));
    sb.blank();
    sb.line("var<workgroup> shared_operand : array<f32, SHARED_EXTENT>;");
    sb.blank();
    op_function(&mut sb, op, false);
    sb.blank();
    let lhs_read = if small_is_lhs {
        "shared_operand[index % SHARED_EXTENT]"
    } else {
        "a[index]"
    };
    let rhs_read = if small_is_lhs {
        "b[index]"
    } else {
        "shared_operand[index % SHARED_EXTENT]"
    };
    sb.fragment(&format!(
        "
@compute @workgroup_size(256, 1, 1)
fn main(
    @builtin(local_invocation_id) local_id : vec3<u32>,
    @builtin(global_invocation_id) global_id : vec3<u32>,
) {{
    var i = i32(local_id.x);
    while (i < SHARED_EXTENT) {{
        shared_operand[i] = {small}[i];
        i = i + 256;
    }}
    workgroupBarrier();

    let index = i32(global_id.x);
    if (index < uniforms.size) {{
        result[index] = binary_op({lhs_read}, {rhs_read});
    }}
}}
",
    ));

    Program::new(
        sb.build(),
        format!("binary_shared_{}_{small}{extent}", op.name()),
        dispatch,
        wg,
        layout,
        vec!["a", "b"],
        vec![out_shape.numel() as i32],
    )
}

fn build_generic(
    op: BinaryOp,
    a_shape: &Shape,
    b_shape: &Shape,
    out_shape: &Shape,
) -> Result<Program> {
    let wg = WorkgroupSize::new(256, 1, 1);
    let layout = DispatchLayout::flatten(out_shape.ndim());
    let dispatch = compute_dispatch(&layout, out_shape, wg, [1, 1, 1]);

    let out4 = out_shape.padded_to(4);
    let broadcast_err = || LumenError::Broadcast {
        lhs: a_shape.to_string(),
        rhs: b_shape.to_string(),
    };
    let a_strides = a_shape.broadcast_strides(&out4).ok_or_else(broadcast_err)?;
    let b_strides = b_shape.broadcast_strides(&out4).ok_or_else(broadcast_err)?;
    let out_strides = out4.contiguous_strides();

    // vec4<i32> x3 at offsets 0/16/32, size at 48, tail padded to 64 bytes.
    let mut words: Vec<i32> = Vec::with_capacity(16);
    words.extend(out_strides.iter().map(|&s| s as i32));
    words.extend(a_strides.iter().map(|&s| s as i32));
    words.extend(b_strides.iter().map(|&s| s as i32));
    words.push(out_shape.numel() as i32);
    words.extend([0, 0, 0]);

    let mut sb = SourceBuilder::new();
    sb.fragment(
        "
struct Uniforms {
    out_strides : vec4<i32>,
    a_strides : vec4<i32>,
    b_strides : vec4<i32>,
    size : i32,
}
",
    );
    sb.blank();
    storage_header(&mut sb, "f32");
    sb.blank();
    op_function(&mut sb, op, false);
    sb.blank();
    sb.fragment(
        "
@compute @workgroup_size(256, 1, 1)
fn main(@builtin(global_invocation_id) global_id : vec3<u32>) {
    let index = i32(global_id.x);
    if (index >= uniforms.size) {
        return;
    }
    var a_index = 0;
    var b_index = 0;
    var remaining = index;
    for (var d = 0; d < 4; d = d + 1) {
        let coord = remaining / uniforms.out_strides[d];
        remaining = remaining - coord * uniforms.out_strides[d];
        a_index = a_index + coord * uniforms.a_strides[d];
        b_index = b_index + coord * uniforms.b_strides[d];
    }
    result[index] = binary_op(a[a_index], b[b_index]);
}
",
    );

    Ok(Program::new(
        sb.build(),
        format!("binary_generic_{}", op.name()),
        dispatch,
        wg,
        layout,
        vec!["a", "b"],
        words,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_total_over_all_ops() {
        for op in BinaryOp::ALL {
            for vectorized in [false, true] {
                let body = binary_op_body(op, vectorized);
                assert!(body.contains("return"), "{op:?} vectorized={vectorized}");
            }
        }
    }

    #[test]
    fn test_bodies_distinct() {
        for vectorized in [false, true] {
            let mut seen = std::collections::HashSet::new();
            for op in BinaryOp::ALL {
                assert!(
                    seen.insert(binary_op_body(op, vectorized)),
                    "{op:?} body duplicates another op"
                );
            }
        }
    }

    #[test]
    fn test_nan_helper_flag() {
        assert!(needs_nan_helper(BinaryOp::Min));
        assert!(needs_nan_helper(BinaryOp::Max));
        assert!(!needs_nan_helper(BinaryOp::Pow));
        assert!(!needs_nan_helper(BinaryOp::Add));
    }

    #[test]
    fn test_strategy_selection() {
        let s = Shape::new(&[1, 4, 4]);
        assert_eq!(select_strategy(&s, &s), BinaryStrategy::Vec4);

        // 15 elements is not vec4-aligned.
        let s = Shape::new(&[1, 5, 3]);
        assert_eq!(select_strategy(&s, &s), BinaryStrategy::Generic);

        let small = Shape::new(&[10]);
        let big = Shape::new(&[1, 10, 10]);
        assert_eq!(
            select_strategy(&small, &big),
            BinaryStrategy::SharedBroadcast { small_is_lhs: true }
        );
        assert_eq!(
            select_strategy(&big, &small),
            BinaryStrategy::SharedBroadcast {
                small_is_lhs: false
            }
        );

        // Over the workgroup-memory limit the generic path takes over.
        let wide = Shape::new(&[SHARED_BROADCAST_LIMIT]);
        let big = Shape::new(&[4, SHARED_BROADCAST_LIMIT]);
        assert_eq!(select_strategy(&wide, &big), BinaryStrategy::Generic);

        // Large side broadcasting along its own last axis cannot be read
        // flat; that pair falls back to the generic path.
        let small = Shape::new(&[10]);
        let column = Shape::new(&[10, 1]);
        assert_eq!(select_strategy(&small, &column), BinaryStrategy::Generic);

        // A single-element small side pairs with any large shape.
        let one = Shape::new(&[1]);
        assert_eq!(
            select_strategy(&one, &column),
            BinaryStrategy::SharedBroadcast { small_is_lhs: true }
        );
    }

    #[test]
    fn test_vec4_program() {
        let s = Shape::new(&[2, 8]);
        let p = build(BinaryOp::Add, &s, &s).unwrap();
        assert_eq!(p.shader_key(), "binary_vec4_add");
        assert_eq!(p.workgroup_size(), WorkgroupSize::new(128, 1, 1));
        assert_eq!(p.uniform_words(), &[4]); // 16 elements, 4 vec4s
        assert!(p.source().contains("array<vec4<f32>>"));
        assert_eq!(p.inputs(), &["a", "b"]);
    }

    #[test]
    fn test_shared_program_stages_small_side() {
        let small = Shape::new(&[10]);
        let big = Shape::new(&[1, 10, 10]);

        let p = build(BinaryOp::Mul, &small, &big).unwrap();
        assert_eq!(p.shader_key(), "binary_shared_mul_a10");
        assert!(p.source().contains("shared_operand[i] = a[i];"));
        assert!(p.source().contains("workgroupBarrier();"));
        assert!(p
            .source()
            .contains("binary_op(shared_operand[index % SHARED_EXTENT], b[index])"));

        let p = build(BinaryOp::Mul, &big, &small).unwrap();
        assert_eq!(p.shader_key(), "binary_shared_mul_b10");
        assert!(p.source().contains("shared_operand[i] = b[i];"));
        assert!(p
            .source()
            .contains("binary_op(a[index], shared_operand[index % SHARED_EXTENT])"));
    }

    #[test]
    fn test_generic_program_strides() {
        // A rank-1 rhs matching the last axis would take the shared path;
        // a column vector broadcasts along its own last axis and cannot.
        let a = Shape::new(&[2, 3, 4]);
        let b = Shape::new(&[3, 1]);
        assert_eq!(select_strategy(&a, &b), BinaryStrategy::Generic);

        let p = build(BinaryOp::Sub, &a, &b).unwrap();
        assert_eq!(p.shader_key(), "binary_generic_sub");
        // out_strides, a_strides, b_strides, size, 3 pad words.
        assert_eq!(
            p.uniform_words(),
            &[24, 12, 4, 1, 0, 12, 4, 1, 0, 0, 1, 0, 24, 0, 0, 0]
        );
        assert_eq!(p.dispatch().x, 1);
    }

    #[test]
    fn test_nan_helper_emitted_once() {
        let s = Shape::new(&[4, 4]);
        let p = build(BinaryOp::Max, &s, &s).unwrap();
        assert_eq!(p.source().matches("fn is_nan_vec4").count(), 1);

        let p = build(BinaryOp::Add, &s, &s).unwrap();
        assert!(!p.source().contains("is_nan"));
    }

    #[test]
    fn test_incompatible_shapes() {
        let a = Shape::new(&[2, 3]);
        let b = Shape::new(&[4, 3]);
        assert!(matches!(
            build(BinaryOp::Add, &a, &b),
            Err(LumenError::Broadcast { .. })
        ));
    }

    // Host-side mirror of the guarded WGSL semantics for the tricky ops.
    // WGSL sign(0.0) is 0.0, unlike f32::signum.
    fn wgsl_sign(x: f32) -> f32 {
        if x > 0.0 {
            1.0
        } else if x < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    fn int_div_ref(a: f32, b: f32) -> f32 {
        let (ia, ib) = (a.round(), b.round());
        if ib == 0.0 {
            return 0.0;
        }
        wgsl_sign(a) * wgsl_sign(b) * (ia / ib).abs().floor()
    }

    fn pow_ref(a: f32, b: f32) -> f32 {
        if b == 0.0 {
            return 1.0;
        }
        if a < 0.0 && b.floor() < b {
            return f32::NAN;
        }
        let value = a.abs().powf(b);
        if (b.abs() % 2.0).round() == 1.0 {
            wgsl_sign(a) * value
        } else {
            value
        }
    }

    #[test]
    fn test_int_div_semantics() {
        assert_eq!(int_div_ref(7.0, 2.0), 3.0);
        assert_eq!(int_div_ref(-7.0, 2.0), -3.0); // truncates toward zero
        assert_eq!(int_div_ref(7.0, -2.0), -3.0);
        assert_eq!(int_div_ref(5.0, 0.0), 0.0);
        assert_eq!(int_div_ref(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_pow_semantics() {
        assert_eq!(pow_ref(0.0, 0.0), 1.0);
        assert_eq!(pow_ref(-2.0, 0.0), 1.0);
        assert!(pow_ref(-2.0, 0.5).is_nan());
        assert_eq!(pow_ref(-2.0, 3.0), -8.0);
        assert_eq!(pow_ref(-2.0, 2.0), 4.0);
        assert_eq!(pow_ref(3.0, 2.0), 9.0);
    }
}
