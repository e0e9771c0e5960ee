//! Benchmark: shader generation cost across kernel kinds and shapes.
//!
//! Generation sits on the dispatch hot path until the runtime's pipeline
//! cache warms up, so it should stay in the low microseconds.

use lumen_core::Shape;
use lumen_wgpu::{binary, matmul, Activation, BinaryOp, MatmulOptions};
use std::time::Instant;

fn bench_matmul(a: &Shape, b: &Shape, options: &MatmulOptions, iters: usize) -> f64 {
    let start = Instant::now();
    for _ in 0..iters {
        let _ = matmul::build(a, b, options).unwrap();
    }
    start.elapsed().as_secs_f64() / iters as f64
}

fn bench_binary(op: BinaryOp, a: &Shape, b: &Shape, iters: usize) -> f64 {
    let start = Instant::now();
    for _ in 0..iters {
        let _ = binary::build(op, a, b).unwrap();
    }
    start.elapsed().as_secs_f64() / iters as f64
}

fn main() {
    let iters = 10_000;

    println!("=== Lumen Shader Generation Benchmark ===\n");
    println!("{:<40} {:>12} {:>12}", "Kernel", "Time (us)", "Source (B)");
    println!("{}", "-".repeat(66));

    let matmul_cases: &[(&str, &[usize], &[usize], MatmulOptions)] = &[
        ("matmul panel 512x512x512", &[512, 512], &[512, 512], MatmulOptions::default()),
        (
            "matmul panel ragged 60x68x32",
            &[60, 68],
            &[68, 32],
            MatmulOptions::default(),
        ),
        (
            "matmul panel bias+prelu",
            &[512, 512],
            &[512, 512],
            MatmulOptions {
                bias: true,
                activation: Some(Activation::Prelu),
                rows_per_thread: None,
            },
        ),
        (
            "matmul vector 1x1024x1024",
            &[1, 1024],
            &[1024, 1024],
            MatmulOptions::default(),
        ),
    ];

    for (label, a, b, options) in matmul_cases {
        let a = Shape::new(a);
        let b = Shape::new(b);
        let secs = bench_matmul(&a, &b, options, iters);
        let source_len = matmul::build(&a, &b, options).unwrap().source().len();
        println!("{:<40} {:>10.2}us {:>12}", label, secs * 1e6, source_len);
    }

    let binary_cases: &[(&str, BinaryOp, &[usize], &[usize])] = &[
        ("binary vec4 add 1M", BinaryOp::Add, &[1024, 1024], &[1024, 1024]),
        ("binary vec4 pow 1M", BinaryOp::Pow, &[1024, 1024], &[1024, 1024]),
        ("binary shared mul [256]", BinaryOp::Mul, &[64, 256, 256], &[256]),
        ("binary generic max bcast", BinaryOp::Max, &[8, 1, 256], &[8, 256, 1]),
    ];

    for (label, op, a, b) in binary_cases {
        let a = Shape::new(a);
        let b = Shape::new(b);
        let secs = bench_binary(*op, &a, &b, iters);
        let source_len = binary::build(*op, &a, &b).unwrap().source().len();
        println!("{:<40} {:>10.2}us {:>12}", label, secs * 1e6, source_len);
    }
}
