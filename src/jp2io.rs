use crate::image::{Image, PixelFormat};
use hayro_jpeg2000::{ColorSpace, DecodeSettings};
use std::io::{self, Error, ErrorKind};

impl Image {
    /// Reads an image from a JPEG 2000 file or bare codestream.  Only
    /// grayscale and RGB color spaces are supported.
    pub fn read_jp2(input: &[u8]) -> io::Result<Image> {
        let settings = DecodeSettings {
            resolve_palette_indices: true,
            strict: false,
            target_resolution: None,
        };
        let image = hayro_jpeg2000::Image::new(input, &settings)
            .map_err(|err| Error::new(ErrorKind::InvalidData, err))?;

        let format = match (image.color_space(), image.has_alpha()) {
            (ColorSpace::Gray, true) => PixelFormat::GrayAlpha,
            (ColorSpace::Gray, false) => PixelFormat::Gray,
            (ColorSpace::RGB, true) => PixelFormat::RGBA,
            (ColorSpace::RGB, false) => PixelFormat::RGB,
            (ColorSpace::CMYK, _) => {
                return Err(unsupported("CMYK color space".to_string()));
            }
            (ColorSpace::Unknown { num_channels }, _) => {
                return Err(unsupported(format!("unknown {}-channel color \
                                                space",
                                               num_channels)));
            }
            (ColorSpace::Icc { .. }, _) => {
                return Err(unsupported("ICC profile".to_string()));
            }
        };
        let (width, height) = (image.width(), image.height());
        let data = image.decode()
            .map_err(|err| Error::new(ErrorKind::InvalidData, err))?;
        Image::from_data(format, width, height, data).map_err(|err| {
            Error::new(ErrorKind::InvalidData, err.to_string())
        })
    }
}

fn unsupported(what: String) -> Error {
    Error::new(ErrorKind::InvalidData,
               format!("jpeg2000 images with {} not supported", what))
}
