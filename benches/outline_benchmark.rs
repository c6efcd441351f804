//! Benchmarks for pdfoutline.
//!
//! Run with: cargo bench
//!
//! Outline heuristics run on synthetic span trees; parsing runs on a
//! synthetic PDF.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfoutline::outline::{extract, FontProfile};
use pdfoutline::{BBox, Block, Document, HeuristicConfig, Line, Page, Span, SpanFlags};

/// A document with one heading and a body paragraph per page.
fn create_test_document(page_count: u32) -> Document {
    let mut doc = Document::new();
    for number in 1..=page_count {
        let mut page = Page::letter(number);
        page.add_block(Block::new(vec![Line::new(vec![
            Span::new("Section Heading", 20.0, BBox::new(72.0, 60.0, 300.0, 80.0))
                .with_flags(SpanFlags::BOLD),
        ])]));
        let lines = (0..40)
            .map(|i| {
                let top = 100.0 + i as f32 * 14.0;
                Line::new(vec![Span::new(
                    "body text of the benchmark document runs across the whole line",
                    10.0,
                    BBox::new(72.0, top, 540.0, top + 10.0),
                )])
            })
            .collect();
        page.add_block(Block::new(lines));
        doc.add_page(page);
    }
    doc
}

/// Creates a minimal synthetic PDF with the given number of pages.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut content = String::new();
    let mut offsets = Vec::new();

    content.push_str("%PDF-1.4\n");

    offsets.push(content.len());
    content.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", i * 2 + 4)).collect();
    offsets.push(content.len());
    content.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        page_count
    ));

    offsets.push(content.len());
    content.push_str("3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n");

    for i in 0..page_count {
        let page_obj = i * 2 + 4;
        let content_obj = page_obj + 1;

        offsets.push(content.len());
        content.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>\nendobj\n",
            page_obj, content_obj
        ));

        let text = format!(
            "BT /F1 24 Tf 72 720 Td (Chapter {}) Tj ET \
             BT /F1 10 Tf 72 680 Td (Benchmark body text for outline extraction.) Tj ET",
            i + 1
        );
        offsets.push(content.len());
        content.push_str(&format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content_obj,
            text.len(),
            text
        ));
    }

    let xref_offset = content.len();
    content.push_str(&format!("xref\n0 {}\n", offsets.len() + 1));
    content.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        content.push_str(&format!("{:010} 00000 n \n", offset));
    }

    content.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        offsets.len() + 1,
        xref_offset
    ));

    content.into_bytes()
}

/// Benchmark the two heuristic passes at various sizes.
fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline");
    let config = HeuristicConfig::default();

    for page_count in [1, 10, 100] {
        let doc = create_test_document(page_count);

        group.bench_function(format!("profile_{}_pages", page_count), |b| {
            b.iter(|| FontProfile::from_document(black_box(&doc)));
        });
        group.bench_function(format!("extract_{}_pages", page_count), |b| {
            b.iter(|| extract(black_box(&doc), &config));
        });
    }

    group.finish();
}

/// Benchmark PDF header detection.
fn bench_header_detection(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("detect_valid_pdf", |b| {
        b.iter(|| pdfoutline::detect_header(black_box(&pdf_data)).is_ok());
    });

    c.bench_function("detect_non_pdf", |b| {
        b.iter(|| pdfoutline::detect_header(black_box(non_pdf_data)).is_err());
    });
}

/// Benchmark parsing and extraction end to end.
fn bench_pdf_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_outline");

    for page_count in [1, 5, 10] {
        let data = create_test_pdf(page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let _ = pdfoutline::extract_outline_bytes(black_box(&data));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_outline, bench_header_detection, bench_pdf_outline);
criterion_main!(benches);
