#![cfg(feature = "pngio")]

use image::{DynamicImage, Rgba, RgbaImage};
use std::io::{Cursor, ErrorKind};
use web2exe_icons::{encode_image_to_icns, encode_rle24, icns_bytes_to_png,
                    icns_to_png, save_icns, variant_element, IconElement,
                    IconFamily, IconInfo, IconType, Image, OSType};

const RED: [u8; 4] = [255, 0, 0, 255];

#[test]
fn encode_64px_as_rle_with_mask() {
    let data = encode_source(solid(64, 64, RED));
    let family = IconFamily::from_bytes(&data).unwrap();
    assert_ostypes(&family, &["ih32", "h8mk"]);

    let icons = icns_bytes_to_png(&data).unwrap();
    assert_eq!(icons.len(), 1);
    let icon = &icons[0];
    assert_eq!(icon.icon_type, Some(IconType::RGB24_48x48));
    assert_eq!((icon.width, icon.height), (48, 48));
    assert_eq!(pixel(icon, 24, 24), RED);
}

#[test]
fn encode_300px_as_png() {
    let data = encode_source(solid(300, 300, RED));
    let family = IconFamily::from_bytes(&data).unwrap();
    assert_ostypes(&family, &["ic08"]);
    assert!(family.elements[0].has_png_payload());

    let icons = icns_bytes_to_png(&data).unwrap();
    assert_eq!(icons.len(), 1);
    assert_eq!((icons[0].width, icons[0].height), (256, 256));
    assert_eq!(pixel(&icons[0], 128, 128), RED);
}

#[test]
fn encode_wide_source_is_letterboxed() {
    let data = encode_source(solid(1100, 550, RED));
    let family = IconFamily::from_bytes(&data).unwrap();
    assert_ostypes(&family, &["ic10"]);

    let icons = icns_bytes_to_png(&data).unwrap();
    let icon = &icons[0];
    assert_eq!((icon.width, icon.height), (1024, 1024));
    assert_eq!(pixel(icon, 512, 0)[3], 0);
    assert_eq!(pixel(icon, 512, 1023)[3], 0);
    assert_eq!(pixel(icon, 512, 512), RED);
}

#[test]
fn save_and_reload_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let png_path = dir.path().join("logo.png");
    RgbaImage::from_pixel(32, 32, Rgba(RED)).save(&png_path).unwrap();

    assert!(save_icns(&png_path, dir.path().join("logo")).unwrap());
    let icns_path = dir.path().join("logo.icns");
    assert!(icns_path.exists());

    let icons = icns_to_png(&icns_path).unwrap().unwrap();
    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].icon_type, Some(IconType::RGB24_32x32));
    assert_eq!(pixel(&icons[0], 16, 16), RED);
}

#[test]
fn missing_icns_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = icns_to_png(dir.path().join("absent.icns")).unwrap();
    assert!(result.is_none());
}

#[test]
fn decode_indexed_with_mono_mask() {
    let mut mono = vec![0u8; 128];
    mono.extend(vec![0xFFu8; 128]);
    let family = family_of(vec![element("icl8", vec![35u8; 1024]),
                                element("ICN#", mono)]);
    let icons = family.extract_icons().unwrap();
    assert_eq!(icons.len(), 2);
    assert_eq!(icons[0].icon_type, Some(IconType::Indexed8_32x32));
    assert_eq!(pixel(&icons[0], 3, 7), RED);
    assert_eq!(icons[1].icon_type, Some(IconType::Mono_32x32));
    assert_eq!(pixel(&icons[1], 3, 7), [255, 255, 255, 255]);
}

#[test]
fn decode_uncompressed_argb() {
    let argb = [255u8, 10, 20, 30].repeat(256);
    let family = family_of(vec![element("is32", argb),
                                element("s8mk", vec![0x80u8; 256])]);
    let icons = family.extract_icons().unwrap();
    assert_eq!(icons.len(), 1);
    assert_eq!(pixel(&icons[0], 0, 0), [10, 20, 30, 0x80]);
}

#[test]
fn decode_icons_inside_variants() {
    let rgba = [0u8, 0, 255, 255].repeat(256);
    let base = family_of(vec![element("is32", encode_rle24(&rgba)),
                              element("s8mk", vec![0xFFu8; 256])]);
    let mut family = base.clone();
    family.elements.push(element("TOC ", vec![0u8; 16]));
    family.elements.push(variant_element(OSType(*b"tile"), &base).unwrap());
    family.elements.push(element("zzzz", vec![1, 2, 3]));

    let data = family.to_bytes().unwrap();
    let icons = icns_bytes_to_png(&data).unwrap();
    assert_eq!(icons.len(), 2);
    for icon in icons.iter() {
        assert_eq!(icon.icon_type, Some(IconType::RGB24_16x16));
        assert_eq!(pixel(icon, 8, 8), [0, 0, 255, 255]);
    }
}

#[test]
fn missing_mask_is_an_error() {
    let rgba = [1u8, 2, 3, 255].repeat(256);
    let family = family_of(vec![element("is32", encode_rle24(&rgba))]);
    let err = family.extract_icons().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn decode_keeps_icons_before_truncated_element() {
    let mut data = encode_source(solid(16, 16, RED));
    data.extend_from_slice(b"zzzz\0\0\x01\0abcd");
    let length = data.len() as u32;
    data[4..8].copy_from_slice(&length.to_be_bytes());

    let icons = icns_bytes_to_png(&data).unwrap();
    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].icon_type, Some(IconType::RGB24_16x16));
    assert_eq!(pixel(&icons[0], 8, 8), RED);
}

#[test]
fn reject_malformed_headers() {
    let err = icns_bytes_to_png(b"abcd\0\0\0\x08").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);

    let mut data = encode_source(solid(16, 16, RED));
    data.push(0);
    let err = icns_bytes_to_png(&data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

fn solid(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)))
}

fn encode_source(source: DynamicImage) -> Vec<u8> {
    let data = encode_image_to_icns(&source).unwrap().unwrap();
    let declared = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
    assert_eq!(declared as usize, data.len());
    data
}

fn element(ostype: &str, data: Vec<u8>) -> IconElement {
    IconElement::new(ostype.parse::<OSType>().unwrap(), data)
}

fn family_of(elements: Vec<IconElement>) -> IconFamily {
    let mut family = IconFamily::new();
    family.elements = elements;
    family
}

fn assert_ostypes(family: &IconFamily, expected: &[&str]) {
    let actual: Vec<String> =
        family.elements.iter().map(|el| el.ostype().to_string()).collect();
    assert_eq!(actual, expected);
}

fn pixel(icon: &IconInfo, x: u32, y: u32) -> [u8; 4] {
    let image = Image::read_png(Cursor::new(&icon.data)).unwrap();
    assert_eq!(image.width(), icon.width);
    assert_eq!(image.height(), icon.height);
    let start = ((y * image.width() + x) * 4) as usize;
    let mut out = [0u8; 4];
    out.copy_from_slice(&image.data()[start..start + 4]);
    out
}
