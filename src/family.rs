use ::image::DynamicImage;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Error, ErrorKind, Read, Write};

use super::element::{IconElement, ICON_ELEMENT_HEADER_LENGTH};
use super::icontype::{Encoding, IconType, OSType, TABLE_OF_CONTENTS};
use super::image::{self, Image, PixelFormat};
use super::info::IconInfo;
use super::resize::{fit_to_square, nearest_icon_size};
use super::rle::encode_rle24;

/// The first four bytes of an ICNS file:
const ICNS_MAGIC_LITERAL: &[u8; 4] = b"icns";

/// The length of an icon family header, in bytes:
const ICON_FAMILY_HEADER_LENGTH: u32 = 8;

/// A set of icons stored in a single ICNS file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IconFamily {
    /// The icon elements stored in the ICNS file.
    pub elements: Vec<IconElement>,
}

impl IconFamily {
    /// Creates a new, empty icon family.
    pub fn new() -> IconFamily {
        IconFamily { elements: Vec::new() }
    }

    /// Returns true if the icon family contains no icons nor any other
    /// elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Encodes a source image of any size into a new family holding a single
    /// icon.
    ///
    /// The icon edge is the largest supported size not exceeding the longer
    /// side of the image.  The image is scaled to fit and centered on a
    /// transparent square.  Sizes of 256 and up are stored as PNG; smaller
    /// sizes are stored RLE24-compressed with an 8-bit mask element built
    /// from the alpha channel.
    pub fn parse_image(source: &DynamicImage) -> io::Result<IconFamily> {
        let size = nearest_icon_size(source.width().max(source.height()));
        let canvas = Image::from_rgba(fit_to_square(source, size));
        let info = IconInfo {
            is_image: true,
            width: size,
            height: size,
            channels: 4,
            pixel_depth: 8,
            bit_depth: 32,
            raw_data_size: canvas.data().len(),
            ..IconInfo::default()
        };
        let icon_type = info.get_image_type().ok_or_else(|| {
            let msg = format!("no icon type stores {}x{} images", size, size);
            Error::new(ErrorKind::InvalidInput, msg)
        })?;
        debug!("encoding {}x{} source as '{}'",
               source.width(),
               source.height(),
               icon_type.ostype());

        let mut family = IconFamily::new();
        if icon_type.encoding() == Encoding::JP2PNG {
            let payload = image::encode_png_payload(&canvas)?;
            family.elements.push(IconElement::new(icon_type.ostype(), payload));
        } else {
            let payload = encode_rle24(canvas.data());
            family.elements.push(IconElement::new(icon_type.ostype(), payload));
            if let Some(mask_type) = icon_type.mask_type() {
                let mask = canvas.convert_to(PixelFormat::Alpha);
                family.elements
                    .push(IconElement::new(mask_type.ostype(),
                                           mask.into_data().into_vec()));
            }
        }
        Ok(family)
    }

    /// Returns the first element with the given icon type.
    pub fn find_element(&self, icon_type: IconType)
                        -> io::Result<&IconElement> {
        let ostype = icon_type.ostype();
        self.elements.iter().find(|el| el.ostype == ostype).ok_or_else(|| {
            let msg = format!("the icon family does not contain a '{}' \
                               element",
                              ostype);
            Error::new(ErrorKind::NotFound, msg)
        })
    }

    /// Decodes the icon with the given type, compositing its companion mask
    /// into the alpha channel.  The result carries the icon's metadata and a
    /// complete PNG stream.
    ///
    /// PNG-backed elements carry their own alpha and skip the mask lookup.
    /// Returns a `NotFound` error if the icon or its mask is missing.
    pub fn get_image_with_mask(&self, icon_type: IconType)
                               -> io::Result<IconInfo> {
        let element = self.find_element(icon_type)?;
        let mut decoded = element.get_image()?;
        if !element.has_png_payload() {
            if let Some(mask_type) = icon_type.mask_type() {
                let mask = self.find_element(mask_type)?.get_mask()?;
                for (pixel, &alpha) in decoded.data_mut()
                    .chunks_exact_mut(4)
                    .zip(mask.iter()) {
                    pixel[3] = alpha;
                }
            }
        }

        let mut info = element.info();
        info.width = decoded.width();
        info.height = decoded.height();
        info.channels = 4;
        info.pixel_depth = 8;
        info.bit_depth = 32;
        info.raw_data_size = decoded.data().len();
        info.data = image::encode_png_payload(&decoded)?;
        Ok(info)
    }

    /// Decodes every image-bearing element, including those nested inside
    /// variant elements (`tile`, `over`, `drop`, `open`, `odrp`).
    ///
    /// Table-of-contents entries and unknown types are skipped, as are
    /// variants whose contents do not parse.  Missing masks and corrupt
    /// icon payloads are reported as errors.
    pub fn extract_icons(&self) -> io::Result<Vec<IconInfo>> {
        let mut icons = Vec::new();
        let mut stack: Vec<IconFamily> = vec![self.clone()];
        while let Some(family) = stack.pop() {
            for element in &family.elements {
                if element.ostype == TABLE_OF_CONTENTS {
                    continue;
                }
                if element.ostype.is_variant() {
                    match IconFamily::read_elements(&element.data) {
                        Ok(variant) => stack.push(variant),
                        Err(err) => {
                            warn!("skipping unreadable '{}' variant: {}",
                                  element.ostype,
                                  err);
                        }
                    }
                    continue;
                }
                match element.icon_type() {
                    Some(icon_type) if icon_type.is_image() => {
                        icons.push(family.get_image_with_mask(icon_type)?);
                    }
                    Some(_) => {}
                    None => {
                        warn!("skipping element with unknown type '{}'",
                              element.ostype);
                    }
                }
            }
        }
        Ok(icons)
    }

    /// Parses a complete ICNS file held in memory.  The header's declared
    /// size must equal the length of `data`.
    pub fn from_bytes(data: &[u8]) -> io::Result<IconFamily> {
        if data.len() < ICON_FAMILY_HEADER_LENGTH as usize ||
           &data[..4] != ICNS_MAGIC_LITERAL {
            let msg = "not an icns file (wrong magic literal)";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let declared = (&data[4..8]).read_u32::<BigEndian>()?;
        if declared as usize != data.len() {
            let msg = format!("expected {} bytes of icns data, but got {}",
                              declared,
                              data.len());
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        IconFamily::read(Cursor::new(data))
    }

    /// Parses a bare element list, the payload of a variant element.
    fn read_elements(data: &[u8]) -> io::Result<IconFamily> {
        let mut reader = Cursor::new(data);
        let mut family = IconFamily::new();
        while (reader.position() as usize) + (ICON_ELEMENT_HEADER_LENGTH as
                                              usize) <= data.len() {
            family.elements.push(IconElement::read(reader.by_ref())?);
        }
        Ok(family)
    }

    /// Reads an icon family from an ICNS file.
    pub fn read<R: Read>(mut reader: R) -> io::Result<IconFamily> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != *ICNS_MAGIC_LITERAL {
            let msg = "not an icns file (wrong magic literal)";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let file_length = reader.read_u32::<BigEndian>()?;
        let mut file_position: u32 = ICON_FAMILY_HEADER_LENGTH;
        let mut family = IconFamily::new();
        while file_position < file_length {
            let element = match IconElement::read(reader.by_ref()) {
                Ok(element) => element,
                Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                    warn!("icns data ends inside an element; ignoring the \
                           rest: {}",
                          err);
                    break;
                }
                Err(err) => return Err(err),
            };
            file_position += element.total_length();
            family.elements.push(element);
        }
        Ok(family)
    }

    /// Writes the icon family to an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(ICNS_MAGIC_LITERAL)?;
        writer.write_u32::<BigEndian>(self.total_length())?;
        for element in &self.elements {
            element.write(writer.by_ref())?;
        }
        Ok(())
    }

    /// Serializes the family into a new buffer.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut output = Vec::with_capacity(self.total_length() as usize);
        self.write(&mut output)?;
        Ok(output)
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u32 {
        let mut length = ICON_FAMILY_HEADER_LENGTH;
        for element in &self.elements {
            length += element.total_length();
        }
        length
    }
}

/// Wraps a family's elements in a variant element of the given type.
pub fn variant_element(ostype: OSType, family: &IconFamily)
                       -> io::Result<IconElement> {
    let mut payload = Vec::new();
    for element in &family.elements {
        element.write(&mut payload)?;
    }
    Ok(IconElement::new(ostype, payload))
}
