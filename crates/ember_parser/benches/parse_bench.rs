use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ember_core::Arena;
use ember_diagnostics::DiagnosticCollection;
use ember_lexer::TokenBuffer;
use ember_options::ParseOptions;
use ember_parser::ParseUnit;

fn generate_source(functions: usize) -> String {
    let mut source = String::new();
    for i in 0..functions {
        source.push_str(&format!(
            "func f{i}(mut a: Int, b: Int = 0x1F) -> Int {{\n    let [x, 2: y, ...rest] = xs;\n    if (a > b) {{ a = b }} else a += 1;\n    return a * b + x ** 2 - (y << 3);\n}}\n"
        ));
        source.push_str(&format!(
            "struct S{i} {{ name: String, value: Int = {i} }};\nlet g{i} = [&, a](v: Int) => v.field->next.*?[0](label: a);\n"
        ));
    }
    source
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [10, 100, 1000] {
        let source = generate_source(size);
        let Ok(buffer) = TokenBuffer::create(&source) else {
            panic!("generated source should lex");
        };
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(format!("functions_{size}"), |b| {
            b.iter(|| {
                let arena = Arena::new();
                let mut diags = DiagnosticCollection::new();
                let unit = ParseUnit::create(&arena, black_box(&buffer), &mut diags, ParseOptions::default());
                unit.statements().len()
            })
        });
    }
    group.finish();
}

fn bench_parse_and_print(c: &mut Criterion) {
    let source = generate_source(100);
    let Ok(buffer) = TokenBuffer::create(&source) else {
        panic!("generated source should lex");
    };
    c.bench_function("parse_and_print_100", |b| {
        b.iter(|| {
            let arena = Arena::new();
            let mut diags = DiagnosticCollection::new();
            let unit = ParseUnit::create(&arena, &buffer, &mut diags, ParseOptions::default());
            ember_printer::print_statements(unit.statements()).len()
        })
    });
}

criterion_group!(benches, bench_parse, bench_parse_and_print);
criterion_main!(benches);
