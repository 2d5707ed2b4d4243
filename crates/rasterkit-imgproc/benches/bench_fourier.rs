use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use rasterkit_image::{Image, PixelFormat};
use rasterkit_imgproc::fourier::{dft, inverse};

fn bench_fourier(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fourier");
    group.sample_size(10);

    // direct summation grows with the square of the pixel count
    for side in [8, 16, 32].iter() {
        let parameter_string = format!("{}x{}", side, side);
        let data = (0..side * side).map(|i| (i % 251) as u8).collect();
        let image = Image::new([*side, *side].into(), PixelFormat::Gray8, data).unwrap();

        group.bench_with_input(BenchmarkId::new("dft", &parameter_string), &image, |b, src| {
            b.iter(|| black_box(dft(src)))
        });

        let freq = dft(&image).unwrap();
        group.bench_with_input(BenchmarkId::new("idft", &parameter_string), &freq, |b, f| {
            b.iter(|| black_box(inverse(f)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fourier);
criterion_main!(benches);
