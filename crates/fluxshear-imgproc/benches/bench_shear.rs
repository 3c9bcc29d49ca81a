use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use fluxshear_image::{Image, ImageSize};
use fluxshear_imgproc::{
    parallel::ExecutionStrategy,
    shear::{shear_x, PassOptions, ShearParams, ShearResampler, Window},
};

fn bench_shear_x(c: &mut Criterion) {
    let mut group = c.benchmark_group("ShearX");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let size = ImageSize {
            width: *width,
            height: *height,
        };
        let src = Image::from_fn(size, |x, y| ((x ^ y) & 0xff) as f32);
        let tmp = Image::from_size_val(size.transposed(), 0.0f32).unwrap();
        let params = ShearParams::for_x_shear(0.92, 0.38).unwrap();
        let window = Window::centered(size);

        for (name, strategy) in [
            ("serial", ExecutionStrategy::Serial),
            ("parallel", ExecutionStrategy::Parallel),
        ] {
            let options = PassOptions::default().with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(name, &parameter_string),
                &(&src, &tmp),
                |b, i| {
                    let (src, mut tmp) = (i.0, i.1.clone());
                    b.iter(|| {
                        shear_x(
                            black_box(src),
                            black_box(&mut tmp),
                            black_box(&params),
                            black_box(window),
                            black_box(options),
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_resampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("ShearResampler");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let size = ImageSize {
            width: *width,
            height: *height,
        };
        let src = Image::from_fn(size, |x, y| ((x ^ y) & 0xff) as f32);
        let dst = Image::from_size_val(size, 0.0f32).unwrap();

        // a 22.5 degree rotation split into its y and x shears
        let x_params = ShearParams::for_x_shear(1.0 / 0.9239, -0.4142).unwrap();
        let y_params = ShearParams::for_y_shear(0.3827, 0.9239).unwrap();

        group.bench_with_input(
            BenchmarkId::new("two_pass", &parameter_string),
            &(&src, &dst),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                let mut resampler = ShearResampler::new(size, PassOptions::default()).unwrap();
                b.iter(|| {
                    resampler.apply(
                        black_box(src),
                        black_box(&mut dst),
                        black_box(&x_params),
                        black_box(&y_params),
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_shear_x, bench_resampler);
criterion_main!(benches);
