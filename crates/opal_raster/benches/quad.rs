use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opal_core::{Bounds, Hsla, Point, Size};
use opal_raster::{evaluate_quad, Frame, FrameParams, Quad, Rasterizer};

fn bench_quad_evaluate(c: &mut Criterion) {
    let quad = Quad::new(Bounds::new(0.0, 0.0, 256.0, 256.0), Hsla::RED)
        .with_corner_radii(12.0)
        .with_border(2.0, Hsla::BLACK);

    c.bench_function("quad_evaluate_4k_points", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for y in 0..64 {
                for x in 0..64 {
                    let point = Point::new(x as f32 * 4.0 + 0.5, y as f32 * 4.0 + 0.5);
                    let (_, coverage) = evaluate_quad(black_box(&quad), point);
                    total += coverage;
                }
            }
            black_box(total)
        })
    });
}

fn bench_quad_fill(c: &mut Criterion) {
    c.bench_function("quad_fill_256", |b| {
        b.iter(|| {
            let mut frame = Frame::new(256, 256).unwrap();
            let params = FrameParams::new(Size::new(256.0, 256.0), false);
            let mut rasterizer = Rasterizer::new(&mut frame, params).unwrap();
            rasterizer.draw_quads(black_box(&[Quad::new(
                Bounds::new(8.0, 8.0, 240.0, 240.0),
                Hsla::BLUE,
            )
            .with_corner_radii(16.0)]));
        })
    });
}

criterion_group!(benches, bench_quad_evaluate, bench_quad_fill);
criterion_main!(benches);
