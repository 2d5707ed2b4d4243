use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use rasterkit_image::{Image, PixelFormat};
use rasterkit_imgproc::filter::{
    box_blur, edge_filter, gaussian_blur, median_blur, Direction, EdgeOperator,
};

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filters");

    for (width, height) in [(256, 224), (512, 448)].iter() {
        for kernel_size in [3, 5, 7].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            let image_size = [*width, *height].into();
            let image = Image::from_size_val(image_size, PixelFormat::Bgr8, 128).unwrap();
            let output = image.zeros_like().unwrap();

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(gaussian_blur(src, &mut dst, *kernel_size, 1.3)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("box_blur", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(box_blur(src, &mut dst, *kernel_size)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("median_blur", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(median_blur(src, &mut dst, *kernel_size)))
                },
            );
        }

        let image = Image::from_size_val([*width, *height].into(), PixelFormat::Bgr8, 128).unwrap();
        group.bench_with_input(
            BenchmarkId::new("sobel_gray", format!("{}x{}", width, height)),
            &image,
            |b, src| {
                b.iter(|| black_box(edge_filter(src, EdgeOperator::Sobel(Direction::Horizontal))))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
