//! Performance benchmarks for Neura
//!
//! Run with: cargo bench
//! Or for specific benchmarks: cargo bench -- <filter>

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::time::Duration;

use neura::core::document::{PageLayout, export_pdf, wrap_text};
use neura::core::narration::{CompletionOutcome, NarrationConfig, Narrator};
use neura::core::render::{clean_for_export, render_display_html};

fn sample_response(paragraphs: usize) -> String {
    let paragraph = "**Heading** Generated answers often mix <tags>, \"quotes\" & bullets:\n\
        * first point with some detail\n* second point\n\n\n\n```\ncode block\n```\n";
    paragraph.repeat(paragraphs)
}

/// Benchmark display rendering and export cleaning
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.measurement_time(Duration::from_secs(5));

    for paragraphs in [1usize, 20, 200] {
        let text = sample_response(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("display_html", text.len()),
            &text,
            |b, text| b.iter(|| render_display_html(black_box(text))),
        );
        group.bench_with_input(
            BenchmarkId::new("clean_for_export", text.len()),
            &text,
            |b, text| b.iter(|| clean_for_export(black_box(text))),
        );
    }

    group.finish();
}

/// Benchmark line wrapping and full PDF export
fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");
    let layout = PageLayout::default();

    for paragraphs in [5usize, 100] {
        let text = sample_response(paragraphs);
        let cleaned = clean_for_export(&text);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("wrap_text", text.len()), &cleaned, |b, text| {
            b.iter(|| wrap_text(black_box(text), layout.text_width_mm(), layout.font_size_pt))
        });
        group.bench_with_input(BenchmarkId::new("export_pdf", text.len()), &text, |b, text| {
            b.iter(|| export_pdf(black_box(text)))
        });
    }

    group.finish();
}

/// Benchmark narrating a long text chunk by chunk with instant completions
fn bench_narration(c: &mut Criterion) {
    let mut group = c.benchmark_group("narration");
    let text = "The quick brown fox jumps over the lazy dog. (aside) ".repeat(500);
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("full_session", |b| {
        b.iter(|| {
            let mut narrator = Narrator::new(NarrationConfig::default());
            let mut next = narrator.toggle(black_box(&text)).speak;
            let mut chunks = 0usize;
            while let Some(request) = next {
                chunks += 1;
                next = match narrator.chunk_finished(request.ticket) {
                    CompletionOutcome::Advanced(effects) => effects.speak,
                    CompletionOutcome::Stale => None,
                };
            }
            chunks
        })
    });

    group.bench_function("pause_resume", |b| {
        b.iter(|| {
            let mut narrator = Narrator::new(NarrationConfig::default());
            narrator.toggle(&text);
            narrator.toggle(&text);
            narrator.toggle(black_box(&text))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_render, bench_document, bench_narration);

criterion_main!(benches);
