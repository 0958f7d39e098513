use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rhvault_core::media::image::encoder::ImageRgbColorMut;
use rhvault_core::CodecOptions;
use std::io::Write;

fn carrier_image() -> RgbImage {
    ImageBuffer::from_fn(512, 512, |x, y| {
        image::Rgb([(x ^ y) as u8, (x * 3) as u8, (y * 5) as u8])
    })
}

pub fn image_encoding(c: &mut Criterion) {
    c.bench_function("Image Encoding", |b| {
        let mut plain_image = carrier_image();
        let secret_message = b"Hello World!";

        b.iter(|| {
            ImageRgbColorMut::new(&mut plain_image)
                .write_all(&secret_message[..])
                .expect("Cannot write secret message");
        })
    });

    c.bench_function("Image Encoding with noise", |b| {
        let mut plain_image = carrier_image();
        let mut rng = StdRng::seed_from_u64(0);

        b.iter(|| {
            let mut encoder = ImageRgbColorMut::new(&mut plain_image);
            encoder
                .write_all(b"Hello World!")
                .expect("Cannot write secret message");
            encoder.fill_with_noise(&mut rng);
        })
    });

    c.bench_function("Hide with low kdf rounds", |b| {
        let cover = carrier_image();
        let opts = CodecOptions::default().with_kdf_rounds(1_000);
        let mut rng = StdRng::seed_from_u64(1);

        b.iter(|| {
            rhvault_core::hide_with_options(&cover, b"Hello World!", "pw", &opts, &mut rng)
                .expect("Cannot hide secret message")
        })
    });
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
