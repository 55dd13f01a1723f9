use ::image::RgbaImage;
use std::io::{self, Error, ErrorKind};

/// The eight bytes every PNG stream starts with.
pub(crate) const PNG_MAGIC: [u8; 8] =
    [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// A JP2 container starts with this signature box.
const JP2_MAGIC: [u8; 12] =
    [0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A];

/// A bare JPEG 2000 codestream starts with SOC followed by SIZ.
const J2K_MAGIC: [u8; 4] = [0xFF, 0x4F, 0xFF, 0x51];

/// A decoded icon image.
#[derive(Clone, Debug)]
pub struct Image {
    pub(crate) format: PixelFormat,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Box<[u8]>,
}

impl Image {
    /// Creates a new image with all pixel data set to zero.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Image {
        let data_bits = format.bits_per_pixel() * width * height;
        let data_bytes = (data_bits + 7) / 8;
        Image {
            format,
            width,
            height,
            data: vec![0u8; data_bytes as usize].into_boxed_slice(),
        }
    }

    /// Creates an image from existing pixel data.  Returns an error if the
    /// data length does not match the format and dimensions.
    pub fn from_data(format: PixelFormat,
                     width: u32,
                     height: u32,
                     data: Vec<u8>)
                     -> io::Result<Image> {
        let expected = (format.bits_per_pixel() * width * height + 7) / 8;
        if data.len() != expected as usize {
            let msg = format!("pixel data has wrong length ({} instead of {} \
                               for {}x{} {:?})",
                              data.len(),
                              expected,
                              width,
                              height,
                              format);
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        Ok(Image {
            format,
            width,
            height,
            data: data.into_boxed_slice(),
        })
    }

    /// Wraps an RGBA raster produced by the `image` crate.
    pub fn from_rgba(raster: RgbaImage) -> Image {
        let (width, height) = raster.dimensions();
        Image {
            format: PixelFormat::RGBA,
            width,
            height,
            data: raster.into_raw().into_boxed_slice(),
        }
    }

    /// Converts this image into an `image` crate RGBA raster.
    pub fn to_rgba_image(&self) -> io::Result<RgbaImage> {
        let rgba = self.convert_to(PixelFormat::RGBA);
        RgbaImage::from_raw(rgba.width, rgba.height, rgba.data.into_vec())
            .ok_or_else(|| {
                Error::new(ErrorKind::InvalidData,
                           "pixel buffer does not match image dimensions")
            })
    }

    /// Creates a copy of this image converted to the specified format.
    pub fn convert_to(&self, format: PixelFormat) -> Image {
        let data = match (self.format, format) {
            (from, to) if from == to => self.data.clone(),
            (PixelFormat::RGBA, to) => rgba_to(&self.data, to),
            (from, PixelFormat::RGBA) => to_rgba(&self.data, from),
            (from, to) => rgba_to(&to_rgba(&self.data, from), to),
        };
        Image {
            format,
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Returns the format in which this image's pixel data is stored.
    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns a reference to the image's pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the image's pixel data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the image, returning its pixel data.
    pub fn into_data(self) -> Box<[u8]> {
        self.data
    }
}

/// A format for storing pixel data in an image.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelFormat {
    /// 32-bit color with alpha channel.
    RGBA,
    /// 24-bit color with no alpha.
    RGB,
    /// 16-bit grayscale-with-alpha.
    GrayAlpha,
    /// 8-bit grayscale with no alpha.
    Gray,
    /// 8-bit alpha mask with no color.
    Alpha,
}

impl PixelFormat {
    /// Returns the number of bits needed to store a single pixel in this
    /// format.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::RGBA => 32,
            PixelFormat::RGB => 24,
            PixelFormat::GrayAlpha => 16,
            PixelFormat::Gray | PixelFormat::Alpha => 8,
        }
    }
}

fn to_rgba(data: &[u8], format: PixelFormat) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(data.len() * 4);
    match format {
        PixelFormat::RGBA => rgba.extend_from_slice(data),
        PixelFormat::RGB => {
            for pixel in data.chunks_exact(3) {
                rgba.extend_from_slice(pixel);
                rgba.push(u8::MAX);
            }
        }
        PixelFormat::GrayAlpha => {
            for pixel in data.chunks_exact(2) {
                rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0],
                                         pixel[1]]);
            }
        }
        PixelFormat::Gray => {
            for &value in data {
                rgba.extend_from_slice(&[value, value, value, u8::MAX]);
            }
        }
        PixelFormat::Alpha => {
            for &alpha in data {
                rgba.extend_from_slice(&[0, 0, 0, alpha]);
            }
        }
    }
    rgba.into_boxed_slice()
}

fn rgba_to(rgba: &[u8], format: PixelFormat) -> Box<[u8]> {
    let pixels = rgba.chunks_exact(4);
    let data: Vec<u8> = match format {
        PixelFormat::RGBA => rgba.to_vec(),
        PixelFormat::RGB => {
            pixels.flat_map(|p| vec![p[0], p[1], p[2]]).collect()
        }
        PixelFormat::GrayAlpha => {
            pixels.flat_map(|p| vec![gray_value(p), p[3]]).collect()
        }
        PixelFormat::Gray => pixels.map(gray_value).collect(),
        PixelFormat::Alpha => pixels.map(|p| p[3]).collect(),
    };
    data.into_boxed_slice()
}

fn gray_value(pixel: &[u8]) -> u8 {
    let sum = pixel[0] as u32 + pixel[1] as u32 + pixel[2] as u32;
    ((sum + 1) / 3) as u8
}

/// Returns true if `data` starts with the PNG signature.
pub(crate) fn has_png_magic(data: &[u8]) -> bool {
    data.starts_with(&PNG_MAGIC)
}

/// Returns true if `data` starts with a JPEG 2000 container or codestream
/// signature.
pub(crate) fn has_jp2_magic(data: &[u8]) -> bool {
    data.starts_with(&JP2_MAGIC) || data.starts_with(&J2K_MAGIC)
}

#[cfg(feature = "pngio")]
pub(crate) fn decode_png_payload(data: &[u8]) -> io::Result<Image> {
    Image::read_png(io::Cursor::new(data))
}

#[cfg(not(feature = "pngio"))]
pub(crate) fn decode_png_payload(_data: &[u8]) -> io::Result<Image> {
    Err(Error::new(ErrorKind::InvalidInput,
                   "PNG payloads require the `pngio` feature"))
}

#[cfg(feature = "pngio")]
pub(crate) fn encode_png_payload(image: &Image) -> io::Result<Vec<u8>> {
    let mut output = Vec::new();
    image.write_png(&mut output)?;
    Ok(output)
}

#[cfg(not(feature = "pngio"))]
pub(crate) fn encode_png_payload(_image: &Image) -> io::Result<Vec<u8>> {
    Err(Error::new(ErrorKind::InvalidInput,
                   "PNG output requires the `pngio` feature"))
}

#[cfg(feature = "jp2io")]
pub(crate) fn decode_jp2_payload(data: &[u8]) -> io::Result<Image> {
    Image::read_jp2(data)
}

#[cfg(not(feature = "jp2io"))]
pub(crate) fn decode_jp2_payload(_data: &[u8]) -> io::Result<Image> {
    Err(Error::new(ErrorKind::InvalidInput,
                   "JPEG 2000 payloads require the `jp2io` feature"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_image_is_zeroed() {
        let image = Image::new(PixelFormat::GrayAlpha, 3, 2);
        assert_eq!(image.data().len(), 12);
        assert!(image.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn gray_to_rgba() {
        let image = Image::from_data(PixelFormat::Gray, 2, 1, vec![10, 200])
            .unwrap();
        let rgba = image.convert_to(PixelFormat::RGBA);
        assert_eq!(rgba.data(), &[10, 10, 10, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn rgba_to_alpha_and_rgb() {
        let image = Image::from_data(PixelFormat::RGBA,
                                     2,
                                     1,
                                     vec![1, 2, 3, 4, 5, 6, 7, 8])
            .unwrap();
        assert_eq!(image.convert_to(PixelFormat::Alpha).data(), &[4, 8]);
        assert_eq!(image.convert_to(PixelFormat::RGB).data(),
                   &[1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn alpha_to_gray_alpha() {
        let image = Image::from_data(PixelFormat::Alpha, 1, 1, vec![99])
            .unwrap();
        assert_eq!(image.convert_to(PixelFormat::GrayAlpha).data(), &[0, 99]);
    }

    #[test]
    fn from_data_rejects_wrong_length() {
        let result = Image::from_data(PixelFormat::RGB, 2, 2, vec![0; 11]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn rgba_image_round_trip() {
        let raster = RgbaImage::from_pixel(4, 3, ::image::Rgba([9, 8, 7, 6]));
        let image = Image::from_rgba(raster.clone());
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        assert_eq!(image.to_rgba_image().unwrap(), raster);
    }

    #[test]
    fn payload_magic_detection() {
        let mut png = PNG_MAGIC.to_vec();
        png.push(0);
        assert!(has_png_magic(&png));
        assert!(!has_png_magic(&png[..7]));
        assert!(has_jp2_magic(&JP2_MAGIC));
        assert!(has_jp2_magic(&[0xFF, 0x4F, 0xFF, 0x51, 0x00]));
        assert!(!has_jp2_magic(&png));
    }
}
