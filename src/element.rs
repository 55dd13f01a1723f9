use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Error, ErrorKind, Read, Write};

use super::colormap::{COLORMAP_4, COLORMAP_8};
use super::icontype::{Encoding, IconType, OSType};
use super::image::{self, Image, PixelFormat};
use super::info::IconInfo;
use super::rle::decode_rle24;

/// The length of an icon element header, in bytes:
pub(crate) const ICON_ELEMENT_HEADER_LENGTH: u32 = 8;

/// One entry in an ICNS file.  Depending on the resource type, this may
/// represent an icon, or part of an icon (such as an alpha mask, or color
/// data without the mask).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconElement {
    pub(crate) ostype: OSType,
    pub(crate) data: Vec<u8>,
}

impl IconElement {
    /// Creates an icon element with the given OSType and data payload.
    pub fn new(ostype: OSType, data: Vec<u8>) -> IconElement {
        IconElement { ostype, data }
    }

    /// Returns the OSType for this element (e.g. `it32` or `t8mk`).
    pub fn ostype(&self) -> OSType {
        self.ostype
    }

    /// Returns the type of icon encoded by this element, or `None` if this
    /// element does not encode a supported icon type.
    pub fn icon_type(&self) -> Option<IconType> {
        IconType::from_ostype(self.ostype)
    }

    /// Returns the metadata describing this element's type.
    pub fn info(&self) -> IconInfo {
        IconInfo::from_type(self.ostype)
    }

    /// Returns the encoded data for this element.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns true if the payload is a PNG stream, whatever the element
    /// type claims.
    pub fn has_png_payload(&self) -> bool {
        image::has_png_magic(&self.data)
    }

    /// Returns the encoded length of the element, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u32 {
        ICON_ELEMENT_HEADER_LENGTH + (self.data.len() as u32)
    }

    /// Decodes the color (or glyph) data of this element into an RGBA image
    /// with an opaque alpha channel.  PNG and JPEG 2000 payloads keep their
    /// own alpha.
    ///
    /// Returns an error if the element is a pure mask, is not a known type,
    /// or if its payload is too short.
    pub fn get_image(&self) -> io::Result<Image> {
        if self.has_png_payload() {
            let png = image::decode_png_payload(&self.data)?;
            return Ok(png.convert_to(PixelFormat::RGBA));
        }
        let icon_type = self.known_type()?;
        let width = icon_type.pixel_width();
        let height = icon_type.pixel_height();
        let pixel_count = (width * height) as usize;
        let mut output = Image::new(PixelFormat::RGBA, width, height);
        let pixels = output.data_mut();
        match icon_type.encoding() {
            Encoding::JP2PNG => {
                if !image::has_jp2_magic(&self.data) {
                    let msg = format!("'{}' element holds neither PNG nor \
                                       JPEG 2000 data",
                                      self.ostype);
                    return Err(Error::new(ErrorKind::InvalidData, msg));
                }
                let decoded = image::decode_jp2_payload(&self.data)?;
                return Ok(decoded.convert_to(PixelFormat::RGBA));
            }
            Encoding::RLE24 => {
                let raw_size = pixel_count * 4;
                if self.data.len() < raw_size {
                    let decoded = decode_rle24(&self.data, pixel_count);
                    for (pixel, rgb) in pixels.chunks_exact_mut(4)
                        .zip(decoded.chunks_exact(4)) {
                        pixel[..3].copy_from_slice(&rgb[..3]);
                        pixel[3] = u8::MAX;
                    }
                } else {
                    // Uncompressed payloads are stored ARGB.
                    for (pixel, argb) in pixels.chunks_exact_mut(4)
                        .zip(self.data.chunks_exact(4)) {
                        pixel.copy_from_slice(&[argb[1], argb[2], argb[3],
                                                argb[0]]);
                    }
                }
            }
            Encoding::Indexed8 => {
                let raw = self.raw_payload(pixel_count)?;
                for (pixel, &index) in pixels.chunks_exact_mut(4).zip(raw) {
                    let color = COLORMAP_8[index as usize];
                    pixel.copy_from_slice(&[color[0], color[1], color[2],
                                            u8::MAX]);
                }
            }
            Encoding::Indexed4 => {
                let raw = self.raw_payload((pixel_count + 1) / 2)?;
                for (i, pixel) in pixels.chunks_exact_mut(4).enumerate() {
                    let byte = raw[i / 2];
                    let index = if i % 2 == 0 { byte >> 4 } else { byte & 0x0F };
                    let color = COLORMAP_4[index as usize];
                    pixel.copy_from_slice(&[color[0], color[1], color[2],
                                            u8::MAX]);
                }
            }
            Encoding::Mono => {
                let raw = self.raw_payload((pixel_count + 7) / 8)?;
                for (i, pixel) in pixels.chunks_exact_mut(4).enumerate() {
                    let value = if bit_is_set(raw, i) { 0x00 } else { 0xFF };
                    pixel.copy_from_slice(&[value, value, value, u8::MAX]);
                }
            }
            Encoding::Mask8 => {
                let msg = format!("'{}' is a mask element", self.ostype);
                return Err(Error::new(ErrorKind::InvalidInput, msg));
            }
        }
        Ok(output)
    }

    /// Decodes this element as a mask, returning one alpha byte per pixel.
    ///
    /// 1-bit elements normally store the glyph first and the mask second;
    /// when the payload is only one bitmap long it is used as the mask.
    pub fn get_mask(&self) -> io::Result<Vec<u8>> {
        let icon_type = self.known_type()?;
        let pixel_count =
            (icon_type.pixel_width() * icon_type.pixel_height()) as usize;
        match icon_type.encoding() {
            Encoding::Mask8 => Ok(self.raw_payload(pixel_count)?.to_vec()),
            Encoding::Mono => {
                let mask_size = (pixel_count + 7) / 8;
                let bits = if self.data.len() == mask_size * 2 {
                    &self.data[mask_size..]
                } else {
                    self.raw_payload(mask_size)?
                };
                Ok((0..pixel_count)
                    .map(|i| if bit_is_set(bits, i) { 0xFF } else { 0x00 })
                    .collect())
            }
            _ => {
                let msg = format!("'{}' is not a mask element", self.ostype);
                Err(Error::new(ErrorKind::InvalidInput, msg))
            }
        }
    }

    /// Reads an icon element from within an ICNS file.
    pub fn read<R: Read>(mut reader: R) -> io::Result<IconElement> {
        let mut raw_ostype = [0u8; 4];
        reader.read_exact(&mut raw_ostype)?;
        let element_length = reader.read_u32::<BigEndian>()?;
        if element_length < ICON_ELEMENT_HEADER_LENGTH {
            return Err(Error::new(ErrorKind::InvalidData,
                                  "invalid element length"));
        }
        let data_length = element_length - ICON_ELEMENT_HEADER_LENGTH;
        let mut data = Vec::new();
        reader.take(data_length as u64).read_to_end(&mut data)?;
        if data.len() != data_length as usize {
            return Err(Error::new(ErrorKind::UnexpectedEof,
                                  "element extends past end of data"));
        }
        Ok(IconElement::new(OSType(raw_ostype), data))
    }

    /// Writes the icon element to within an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let OSType(ref raw_ostype) = self.ostype;
        writer.write_all(raw_ostype)?;
        writer.write_u32::<BigEndian>(self.total_length())?;
        writer.write_all(&self.data)?;
        Ok(())
    }

    fn known_type(&self) -> io::Result<IconType> {
        self.icon_type().ok_or_else(|| {
            Error::new(ErrorKind::InvalidInput,
                       format!("unsupported OSType: {}", self.ostype))
        })
    }

    fn raw_payload(&self, length: usize) -> io::Result<&[u8]> {
        if self.data.len() < length {
            let msg = format!("'{}' payload too short ({} instead of {} \
                               bytes)",
                              self.ostype,
                              self.data.len(),
                              length);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        Ok(&self.data[..length])
    }
}

/// Tests bit `index` of a most-significant-bit-first bitmap.
fn bit_is_set(bits: &[u8], index: usize) -> bool {
    bits[index / 8] & (0x80 >> (index % 8)) != 0
}
