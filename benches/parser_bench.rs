//! Parser Benchmark
//!
//! Measures scan and parse throughput for long path chains, closure-heavy
//! build scripts and deeply nested argument lists.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use grove::parser::{ParserOptions, parse_source_text, parse_source_text_with_options};
use grove::scanner::ScannerState;

// =============================================================================
// Test Sources
// =============================================================================

const BUILD_SCRIPT: &str = r#"
plugins {
    id 'java'
}

repositories.mavenCentral()

dependencies.implementation("org.example:lib:1.0")

tasks.named('test') { task ->
    task.useJUnitPlatform()
    task.testLogging.events("passed", "skipped", "failed")
}

sourceSets.main.java.srcDirs.each { dir ->
    println("${dir.name}: ${dir.absolutePath}")
}

project.ext.versions = [core: '1.2', util: '3.4']
configurations*.exclude(group: 'commons-logging')
subprojects.findAll { it.name.startsWith('lib') }.collect { it.path }
"#;

/// `root` followed by `length` mixed path elements.
fn long_chain(length: usize) -> String {
    let mut source = String::from("root");
    for i in 0..length {
        match i % 5 {
            0 => source.push_str(".child"),
            1 => source.push_str("?.maybe"),
            2 => source.push_str("[i]"),
            3 => source.push_str(" { it }"),
            _ => source.push_str("(1, key: 2)"),
        }
    }
    source.push('\n');
    source
}

fn repeated_script(copies: usize) -> String {
    BUILD_SCRIPT.repeat(copies)
}

fn nested_closures(depth: usize) -> String {
    format!("{}leaf{}", "a.each { x -> ".repeat(depth), " }".repeat(depth))
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner");
    let source = repeated_script(50);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("build_script_x50", |b| {
        b.iter(|| {
            let mut scanner = ScannerState::new(black_box(&source));
            black_box(scanner.scan_all())
        })
    });
    group.finish();
}

fn bench_long_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("long_chain");
    for length in [10, 100, 900] {
        let source = long_chain(length);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(length), &source, |b, source| {
            b.iter(|| black_box(parse_source_text("chain.groovy", black_box(source))))
        });
    }
    group.finish();
}

fn bench_build_scripts(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_script");
    for copies in [1, 10, 100] {
        let source = repeated_script(copies);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(copies), &source, |b, source| {
            b.iter(|| black_box(parse_source_text("build.groovy", black_box(source))))
        });
    }
    group.finish();
}

fn bench_nested_closures(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_closures");
    let options = ParserOptions::default();
    for depth in [8, 32, 100] {
        let source = nested_closures(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &source, |b, source| {
            b.iter(|| {
                black_box(parse_source_text_with_options(
                    "nested.groovy",
                    black_box(source),
                    options.clone(),
                ))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scanner,
    bench_long_chains,
    bench_build_scripts,
    bench_nested_closures
);
criterion_main!(benches);
