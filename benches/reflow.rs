//! Benchmarks for the reflow pipeline.
//!
//! Run with: cargo bench

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use booktidy::{ArenaDom, Pipeline, ReflowConfig, parse_html, prerender};

/// A book-sized page: many chapters of prose, code, tables and callouts.
fn sample_book(chapters: usize) -> String {
    let mut html = String::from("<html><head><title>Sample</title></head><body>");
    for i in 0..chapters {
        html.push_str(&format!(
            "<h2>Chapter {i}</h2>\
             <p><font size=\"2\">Introductory prose for chapter {i}.</font></p>\
             <div><p>Run <tt><code>cargo test --chapter {i}</code></tt> first.</p></div>\
             <div><h3>Tip</h3><p>Keep it short.</p></div>\
             <div><h3>Warning</h3><p>Mind the borrow checker.</p></div>\
             <table border=\"1\"><tr><th>Key</th><th>Value</th></tr>\
             <tr><td><p><font size=\"1\">k{i}</font></p></td><td>v{i}</td></tr></table>\
             <img src=\"fig{i}.png\">"
        ));
    }
    html.push_str("</body></html>");
    html
}

// ============================================================================
// Parsing
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let html = sample_book(200);

    c.bench_function("parse_html", |b| {
        b.iter(|| parse_html(&html));
    });
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_pipeline_detached(c: &mut Criterion) {
    let html = sample_book(200);
    let pipeline = Pipeline::standard(&ReflowConfig::default()).unwrap();

    c.bench_function("pipeline_detached", |b| {
        b.iter_batched(
            || {
                let mut dom = parse_html(&html);
                let body = dom.body().unwrap();
                dom.detach(body);
                (dom, body)
            },
            |(mut dom, body): (ArenaDom, _)| pipeline.run(&mut dom, body),
            BatchSize::LargeInput,
        );
    });
}

fn bench_pipeline_attached(c: &mut Criterion) {
    let html = sample_book(200);
    let pipeline = Pipeline::standard(&ReflowConfig::default()).unwrap();

    c.bench_function("pipeline_attached", |b| {
        b.iter_batched(
            || parse_html(&html),
            |mut dom| {
                let body = dom.body().unwrap();
                pipeline.run(&mut dom, body)
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_prerender(c: &mut Criterion) {
    let html = sample_book(200);

    c.bench_function("prerender", |b| {
        b.iter_batched(
            || parse_html(&html),
            |mut dom| {
                prerender(&mut dom, &ReflowConfig::default()).unwrap();
                dom.to_html().unwrap()
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_parse,
    // Reflow
    bench_pipeline_detached,
    bench_pipeline_attached,
    bench_prerender,
);
criterion_main!(benches);
