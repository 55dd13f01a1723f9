//! Icon conversion for packaged web applications.
//!
//! The crate has two halves:
//!
//! * An Apple Icon Image (.icns) codec.  [`encode_image_to_icns`] turns any
//!   raster the `image` crate can open into a single-icon family, and
//!   [`icns_to_png`] decodes every icon of an existing family (including
//!   variant sets) into PNG streams.
//! * A Windows PE icon patcher.  [`pe::PeFile`] parses an executable's
//!   headers and resource tree, and replaces the primary icon in place.
//!
//! See https://en.wikipedia.org/wiki/Apple_Icon_Image_format for more
//! information about the icns format.
//!
//! # ICNS example
//!
//! ```no_run
//! use web2exe_icons::save_icns;
//!
//! if !save_icns("logo.png", "logo.icns").unwrap() {
//!     println!("PNG support is disabled; nothing written");
//! }
//! ```
//!
//! # PE example
//!
//! ```no_run
//! use web2exe_icons::pe::PeFile;
//!
//! let mut exe = PeFile::open("app.exe").unwrap();
//! exe.replace_icon("logo.png").unwrap();
//! exe.write("app-branded.exe").unwrap();
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod colormap;
mod element;
mod family;
mod icontype;
mod image;
mod info;
#[cfg(feature = "jp2io")]
mod jp2io;
#[cfg(feature = "pngio")]
mod pngio;
mod resize;
mod rle;

pub mod pe;

pub use crate::colormap::{COLORMAP_4, COLORMAP_8};
pub use crate::element::IconElement;
pub use crate::family::{variant_element, IconFamily};
pub use crate::icontype::{Encoding, IconType, OSType, ICON_VERSION,
                          TABLE_OF_CONTENTS, VARIANT_TYPES};
pub use crate::image::{Image, PixelFormat};
pub use crate::info::IconInfo;
pub use crate::resize::{fit_to_canvas, fit_to_square, nearest_icon_size,
                        ICON_SIZES};
pub use crate::rle::{decode_rle24, encode_rle24};

use std::fs;
use std::io::{self, Error, ErrorKind};
use std::path::{Path, PathBuf};

/// Encodes a source image into the bytes of a single-icon ICNS file.
///
/// Returns `Ok(None)` when the crate was built without PNG support, since
/// no image can be staged for encoding in that configuration.
pub fn encode_image_to_icns(source: &::image::DynamicImage)
                            -> io::Result<Option<Vec<u8>>> {
    if !cfg!(feature = "pngio") {
        warn!("icns encoding requires the `pngio` feature");
        return Ok(None);
    }
    let family = IconFamily::parse_image(source)?;
    family.to_bytes().map(Some)
}

/// Opens the image at `image_path`, encodes it and writes the result to
/// `icns_path`, adding an `.icns` extension if it is missing.
///
/// Returns `Ok(false)` if nothing was written (see
/// [`encode_image_to_icns`]).
pub fn save_icns<P: AsRef<Path>, Q: AsRef<Path>>(image_path: P,
                                                 icns_path: Q)
                                                 -> io::Result<bool> {
    let source = ::image::open(image_path.as_ref()).map_err(image_error)?;
    let data = match encode_image_to_icns(&source)? {
        Some(data) => data,
        None => return Ok(false),
    };
    let icns_path = with_icns_extension(icns_path.as_ref());
    debug!("writing {} bytes to {}", data.len(), icns_path.display());
    fs::write(icns_path, data)?;
    Ok(true)
}

/// Decodes every icon in an in-memory ICNS file into PNG-backed
/// descriptors.  The header's declared size must match `data`.
pub fn icns_bytes_to_png(data: &[u8]) -> io::Result<Vec<IconInfo>> {
    IconFamily::from_bytes(data)?.extract_icons()
}

/// Decodes every icon in the ICNS file at `path`.  Returns `Ok(None)` if the
/// file does not exist.
pub fn icns_to_png<P: AsRef<Path>>(path: P)
                                   -> io::Result<Option<Vec<IconInfo>>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("{} does not exist", path.display());
        return Ok(None);
    }
    let data = fs::read(path)?;
    icns_bytes_to_png(&data).map(Some)
}

fn with_icns_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == "icns" => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".icns");
            PathBuf::from(name)
        }
    }
}

pub(crate) fn image_error(err: ::image::ImageError) -> io::Error {
    match err {
        ::image::ImageError::IoError(err) => err,
        other => Error::new(ErrorKind::InvalidData, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icns_extension_is_appended_once() {
        assert_eq!(with_icns_extension(Path::new("a/b.icns")),
                   PathBuf::from("a/b.icns"));
        assert_eq!(with_icns_extension(Path::new("a/b.png")),
                   PathBuf::from("a/b.png.icns"));
        assert_eq!(with_icns_extension(Path::new("b")), PathBuf::from("b.icns"));
    }

    #[test]
    fn missing_file_yields_none() {
        let result = icns_to_png("/nonexistent/dir/icon.icns").unwrap();
        assert!(result.is_none());
    }
}
