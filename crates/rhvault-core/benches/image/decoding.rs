use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rhvault_core::media::image::decoder::ImageRgbColor;
use rhvault_core::CodecOptions;
use std::io::Read;

pub fn image_decoding(c: &mut Criterion) {
    let cover: RgbImage = ImageBuffer::from_fn(512, 512, |x, y| {
        image::Rgb([(x ^ y) as u8, (x * 3) as u8, (y * 5) as u8])
    });
    let opts = CodecOptions::default().with_kdf_rounds(1_000);
    let img = rhvault_core::hide_with_options(
        &cover,
        b"Hello World!",
        "pw",
        &opts,
        &mut StdRng::seed_from_u64(0),
    )
    .expect("Cannot hide secret message");

    c.bench_function("Image Decoding", |b| {
        let mut buf = [0; 64];

        b.iter(|| {
            ImageRgbColor::new(&img)
                .read_exact(&mut buf)
                .expect("Failed to read 64 bytes");
        })
    });

    c.bench_function("Blob extraction", |b| {
        b.iter(|| {
            rhvault_core::extract_blob(&img)
                .expect("Failed to extract blob")
        })
    });

    c.bench_function("Reveal with low kdf rounds", |b| {
        b.iter(|| {
            rhvault_core::reveal_with_options(&img, "pw", &opts)
                .expect("Failed to reveal")
        })
    });
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
