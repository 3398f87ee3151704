use criterion::{Criterion, black_box, criterion_group, criterion_main};
use docs_core::fixes::ALL;
use docs_core::{FixOptions, FixRegistry, RunConfig, Scanner, Validator};
use docs_test_utils::{docs, TestCms};

fn messy_body(paragraphs: usize) -> String {
    let mut body = String::new();
    for i in 0..paragraphs {
        body.push_str(&format!("Paragraph {i} with latency <{i}ms   \n```\nls -la\n```\n"));
        body.push_str(&format!("See [rfc](../rfcs/2025-01-02-rfc-{:03}-api.md)\n\n", i % 10));
    }
    body
}

fn populated_cms(documents: u32) -> TestCms {
    let cms = TestCms::new().with_default_config();
    for n in 1..=documents {
        cms.write_doc(
            &format!("adr/adr-{n:03}-decision.md"),
            &docs::adr(n, "Benchmark decision", &messy_body(20)),
        );
    }
    cms
}

fn fix_all_benchmark(c: &mut Criterion) {
    c.bench_function("fix all (dry run, 50 documents)", |b| {
        let cms = populated_cms(50);
        let config = RunConfig::load(cms.root(), None).unwrap();
        let files = Scanner::new(&config).discover();
        let registry = FixRegistry::with_builtins();
        let options = FixOptions {
            dry_run: true,
            ..FixOptions::default()
        };

        b.iter(|| {
            let summary = registry
                .run(black_box(ALL), black_box(&files), &config, &options)
                .unwrap();
            assert_eq!(summary.changed.len(), 50);
        })
    });
}

fn validate_benchmark(c: &mut Criterion) {
    c.bench_function("validate (50 documents, no build)", |b| {
        let cms = populated_cms(50);
        let config = RunConfig::load(cms.root(), None).unwrap().with_skip_build(true);

        b.iter(|| {
            let report = Validator::new(black_box(&config)).run();
            assert_eq!(report.scanned, 50);
        })
    });
}

criterion_group!(benches, fix_all_benchmark, validate_benchmark);
criterion_main!(benches);
