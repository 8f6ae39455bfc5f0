//! Diffing engine benchmark: Measure buffer diff and output performance.
//!
//! Target: < 500µs for 200×50 buffer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera::buffer::diff::{diff, full};
use tessera::{AnsiWriter, Attributes, Buffer, Cell, Compositor, Rgba};

/// Create a buffer with random-ish content for benchmarking.
fn create_test_buffer(width: u16, height: u16, seed: u16) -> Buffer {
    let mut buffer = Buffer::new(width, height, false).unwrap();
    for y in 0..height {
        for x in 0..width {
            let c = char::from(b'A' + ((x + y + seed) % 26) as u8);
            let fg = Rgba::rgb(
                f32::from((x * 3 + seed) % 256) / 255.0,
                f32::from((y * 7 + seed) % 256) / 255.0,
                f32::from((x + y + seed) % 256) / 255.0,
            );
            let cell = Cell::new(c, fg, Rgba::rgb(0.08, 0.08, 0.12), Attributes::empty());
            buffer.set(i32::from(x), i32::from(y), cell);
        }
    }
    buffer
}

fn diff_identical_buffers(c: &mut Criterion) {
    let buffer = create_test_buffer(200, 50, 0);
    let buffer_clone = buffer.clone();

    c.bench_function("diff_200x50_identical", |b| {
        b.iter(|| diff(black_box(&buffer), black_box(&buffer_clone)).unwrap().count())
    });
}

fn diff_single_cell_change(c: &mut Criterion) {
    let buffer_a = create_test_buffer(200, 50, 0);
    let mut buffer_b = buffer_a.clone();
    // Change a single cell in the middle
    buffer_b.set(100, 25, Cell::from_char('X').with_fg(Rgba::RED));

    c.bench_function("diff_200x50_single_change", |b| {
        b.iter(|| diff(black_box(&buffer_a), black_box(&buffer_b)).unwrap().count())
    });
}

fn diff_many_changes(c: &mut Criterion) {
    let buffer_a = create_test_buffer(200, 50, 0);
    let buffer_b = create_test_buffer(200, 50, 1); // Different seed = different content

    c.bench_function("diff_200x50_full_change", |b| {
        b.iter(|| diff(black_box(&buffer_a), black_box(&buffer_b)).unwrap().count())
    });
}

fn write_line_change(c: &mut Criterion) {
    let buffer_a = create_test_buffer(200, 50, 0);
    let mut buffer_b = buffer_a.clone();
    // Change one full line
    buffer_b.draw_text(&"*".repeat(200), 0, 25, Rgba::rgb(1.0, 1.0, 0.0), Rgba::BLACK, Attributes::empty(), None);

    c.bench_function("write_200x50_line_change", |b| {
        b.iter(|| {
            let mut writer = AnsiWriter::new(Vec::with_capacity(4096));
            writer.present(diff(black_box(&buffer_a), black_box(&buffer_b)).unwrap()).unwrap()
        })
    });
}

fn write_full(c: &mut Criterion) {
    let buffer = create_test_buffer(200, 50, 0);

    c.bench_function("write_full_200x50", |b| {
        b.iter(|| {
            let mut writer = AnsiWriter::new(Vec::with_capacity(65536));
            writer.present(full(black_box(&buffer))).unwrap()
        })
    });
}

fn compositor_frame(c: &mut Criterion) {
    let mut compositor = Compositor::new(200, 50).unwrap();
    let mut tick = 0u32;

    c.bench_function("compositor_frame_200x50_status_line", |b| {
        b.iter(|| {
            tick = tick.wrapping_add(1);
            let back = compositor.begin_frame().unwrap();
            back.fill_rect(0, 0, 200, 50, Rgba::rgb(0.1, 0.1, 0.15));
            back.draw_text(&format!("frame {tick}"), 1, 49, Rgba::WHITE, Rgba::TRANSPARENT, Attributes::BOLD, None);
            compositor.end_frame().unwrap().count()
        })
    });
}

fn diff_various_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_by_size");

    for (width, height) in [(80, 24), (120, 40), (200, 50), (300, 80)] {
        let buffer_a = create_test_buffer(width, height, 0);
        let buffer_b = create_test_buffer(width, height, 1);

        group.bench_with_input(
            BenchmarkId::new("full_change", format!("{width}x{height}")),
            &(buffer_a, buffer_b),
            |b, (a, bb)| b.iter(|| diff(black_box(a), black_box(bb)).unwrap().count()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    diff_identical_buffers,
    diff_single_cell_change,
    diff_many_changes,
    write_line_change,
    write_full,
    compositor_frame,
    diff_various_sizes,
);
criterion_main!(benches);
