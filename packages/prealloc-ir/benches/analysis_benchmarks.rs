//! Benchmarks for per-file analysis
//!
//! Run with: cargo bench --bench analysis_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use prealloc_ir::{analyze_source, PreallocConfig};

/// Generate a Go file with N functions, each with a few candidate loops
fn generate_go_functions(count: usize) -> String {
    let mut source = String::from("package bench\n\n");
    for i in 0..count {
        source.push_str(&format!(
            r#"func function_{i}(items []string, n int) []string {{
	var out []string
	lengths := make([]int, 0)
	for _, item := range items {{
		out = append(out, item)
		lengths = append(lengths, len(item))
	}}
	for j := 0; j < n; j++ {{
		if j > 10 {{
			break
		}}
		out = append(out, "x")
	}}
	_ = lengths
	return out
}}

"#
        ));
    }
    source
}

/// Generate one function with deeply nested blocks
fn generate_nested(depth: usize) -> String {
    let mut body = String::new();
    for level in 0..depth {
        body.push_str(&format!(
            "{indent}if n > {level} {{\n{indent}\tvar x{level} []int\n{indent}\tfor i := range n {{\n{indent}\t\tx{level} = append(x{level}, i)\n{indent}\t}}\n",
            indent = "\t".repeat(level + 1),
        ));
    }
    for level in (0..depth).rev() {
        body.push_str(&format!("{}}}\n", "\t".repeat(level + 1)));
    }
    format!("package bench\n\nfunc nested(n int) {{\n{}}}\n", body)
}

fn bench_analyze_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_functions");
    let config = PreallocConfig::all_loops();

    for size in [10, 100, 500].iter() {
        let source = generate_go_functions(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &_size| {
            b.iter(|| analyze_source(black_box(&source), "bench.go", &config));
        });
    }

    group.finish();
}

fn bench_analyze_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_nested");
    let config = PreallocConfig::default();

    for depth in [5, 20, 50].iter() {
        let source = generate_nested(*depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &_depth| {
            b.iter(|| analyze_source(black_box(&source), "nested.go", &config));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze_functions, bench_analyze_nested);
criterion_main!(benches);
