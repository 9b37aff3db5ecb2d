//! Benchmarks for the tokenizer and token buffer.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ember_lexer::TokenBuffer;

fn generate_source(functions: usize) -> String {
    let mut source = String::new();
    for i in 0..functions {
        source.push_str(&format!(
            "func f{i}(mut a: Int, b: Int = 0x1F) -> Int {{\n    let [x, 2: y, ...rest] = xs;\n    return a * b + x ** 2 - (y << 3);\n}}\n"
        ));
        source.push_str(&format!(
            "struct S{i} {{ name: String, value: Int = {i} }}\nlet s{i} = \"line\\n{i}\";\n"
        ));
    }
    source
}

fn bench_lex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lex");
    for size in [10, 100, 1000] {
        let source = generate_source(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(format!("functions_{size}"), |b| {
            b.iter(|| TokenBuffer::create(black_box(&source)).map(|buffer| buffer.len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lex);
criterion_main!(benches);
