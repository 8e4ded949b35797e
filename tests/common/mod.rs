#![allow(dead_code)]

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, GrayImage, ImageEncoder, Luma, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

/// A small image with enough variation that encoder settings change the bytes
pub fn gradient(seed: u8) -> RgbImage {
    RgbImage::from_fn(16, 12, |x, y| {
        Rgb([
            (x as u8).wrapping_mul(13).wrapping_add(seed),
            (y as u8).wrapping_mul(29),
            ((x + y) as u8).wrapping_mul(7),
        ])
    })
}

pub fn write_png(dir: &Path, name: &str, pixels: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, png_bytes(pixels, CompressionType::Default, FilterType::Adaptive))
        .expect("write png");
    path
}

pub fn write_gray_png(dir: &Path, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
    let path = dir.join(name);
    GrayImage::from_pixel(width, height, Luma([value]))
        .save_with_format(&path, image::ImageFormat::Png)
        .expect("write gray png");
    path
}

pub fn write_jpeg(dir: &Path, name: &str, pixels: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    pixels
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .expect("write jpeg");
    path
}

pub fn png_bytes(pixels: &RgbImage, compression: CompressionType, filter: FilterType) -> Vec<u8> {
    let mut bytes = Vec::new();
    PngEncoder::new_with_quality(&mut bytes, compression, filter)
        .write_image(
            pixels.as_raw(),
            pixels.width(),
            pixels.height(),
            ExtendedColorType::Rgb8,
        )
        .expect("encode png");
    bytes
}

/// PNG bytes with a `tEXt` chunk inserted right after IHDR
pub fn png_bytes_with_text(pixels: &RgbImage, keyword: &str, text: &str) -> Vec<u8> {
    let plain = png_bytes(pixels, CompressionType::Default, FilterType::Adaptive);

    // signature (8) + IHDR length/type/data/crc (4 + 4 + 13 + 4)
    let split = 8 + 25;

    let mut data = Vec::new();
    data.extend_from_slice(keyword.as_bytes());
    data.push(0);
    data.extend_from_slice(text.as_bytes());

    let mut chunk = Vec::new();
    chunk.extend_from_slice(&(data.len() as u32).to_be_bytes());
    let mut typed = b"tEXt".to_vec();
    typed.extend_from_slice(&data);
    chunk.extend_from_slice(&typed);
    chunk.extend_from_slice(&crc32(&typed).to_be_bytes());

    let mut out = plain[..split].to_vec();
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&plain[split..]);
    out
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in bytes {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

/// File names in `dir`, sorted
pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
