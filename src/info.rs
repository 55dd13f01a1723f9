use super::icontype::{IconType, OSType, ICON_VERSION, TABLE_OF_CONTENTS};

/// Describes one icon bitmap, either decoded from an ICNS element or about to
/// be encoded into one.
///
/// For decoded icons, `data` holds a complete PNG stream.  For icons being
/// encoded, `data` holds the raw pixel (or mask) bytes, whose length is
/// `width * height * bit_depth / 8`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IconInfo {
    /// The element type this bitmap belongs to, or `None` for the null type.
    pub icon_type: Option<IconType>,
    /// True if the bitmap carries color or glyph data.
    pub is_image: bool,
    /// True if the bitmap carries mask data.
    pub is_mask: bool,
    /// Width in pixels (zero if unknown).
    pub width: u32,
    /// Height in pixels (zero if unknown).
    pub height: u32,
    /// Number of channels per pixel (1 or 4).
    pub channels: u32,
    /// Bits stored per channel.
    pub pixel_depth: u32,
    /// Bits stored per pixel.  Derived from `pixel_depth * channels` when
    /// left at zero.
    pub bit_depth: u32,
    /// Size of the raw (unencoded) bitmap, in bytes.
    pub raw_data_size: usize,
    /// The bitmap bytes.
    pub data: Vec<u8>,
}

impl IconInfo {
    /// Builds the description of an element of the given type, with `data`
    /// zeroed to the raw bitmap size.  Pseudo-elements and unknown types
    /// produce a description with no icon type and no data.
    pub fn from_type(ostype: OSType) -> IconInfo {
        if ostype == TABLE_OF_CONTENTS || ostype == ICON_VERSION {
            return IconInfo::default();
        }
        match IconType::from_ostype(ostype) {
            Some(icon_type) => {
                let mut info = IconInfo {
                    icon_type: Some(icon_type),
                    is_image: icon_type.is_image(),
                    is_mask: icon_type.is_mask(),
                    width: icon_type.pixel_width(),
                    height: icon_type.pixel_height(),
                    channels: icon_type.channels(),
                    pixel_depth: icon_type.pixel_depth(),
                    bit_depth: icon_type.bit_depth(),
                    raw_data_size: 0,
                    data: Vec::new(),
                };
                info.raw_data_size = info.expected_data_size();
                info.data = vec![0u8; info.raw_data_size];
                info
            }
            None => {
                debug!("unable to parse icon type {}", ostype);
                IconInfo::default()
            }
        }
    }

    /// Resolves the element type that should store this bitmap, or `None`
    /// when no type matches.
    ///
    /// Bitmaps with no dimensions are only recognized by their raw size (24
    /// bytes for a 16x12 1-bit bitmap, 32 bytes for a 16x16 one).  Otherwise
    /// the bitmap must be square, except for the 16x12 legacy sizes.
    pub fn get_image_type(&self) -> Option<IconType> {
        if !self.is_image && !self.is_mask {
            return None;
        }
        if self.width == 0 || self.height == 0 {
            if self.is_image && self.is_mask {
                return None;
            }
            return match self.raw_data_size {
                24 => Some(IconType::Mono_16x12),
                32 => Some(IconType::Mono_16x16),
                _ => None,
            };
        }

        let bit_depth = if self.bit_depth != 0 {
            self.bit_depth
        } else if self.pixel_depth == 0 || self.channels == 0 {
            return None;
        } else {
            self.pixel_depth * self.channels
        };

        if self.width == 16 && self.height == 12 {
            return match bit_depth {
                1 => Some(IconType::Mono_16x12),
                4 if self.is_image => Some(IconType::Indexed4_16x12),
                8 if self.is_image => Some(IconType::Indexed8_16x12),
                _ => None,
            };
        }
        if self.width != self.height {
            return None;
        }

        if self.is_image {
            data_type_for(self.width, bit_depth)
        } else {
            mask_type_for(self.width, bit_depth)
        }
    }

    /// Returns `width * height * bit_depth / 8`.
    pub fn expected_data_size(&self) -> usize {
        (self.width as usize) * (self.height as usize) *
        (self.bit_depth as usize) / 8
    }
}

fn data_type_for(width: u32, bit_depth: u32) -> Option<IconType> {
    match (width, bit_depth) {
        (1024, 32) => Some(IconType::RGBA32_1024x1024),
        (512, 32) => Some(IconType::RGBA32_512x512),
        (256, 32) => Some(IconType::RGBA32_256x256),
        (128, 32) => Some(IconType::RGB24_128x128),
        (48, 1) => Some(IconType::Mono_48x48),
        (48, 4) => Some(IconType::Indexed4_48x48),
        (48, 8) => Some(IconType::Indexed8_48x48),
        (48, 32) => Some(IconType::RGB24_48x48),
        (32, 1) => Some(IconType::Mono_32x32),
        (32, 4) => Some(IconType::Indexed4_32x32),
        (32, 8) => Some(IconType::Indexed8_32x32),
        (32, 32) => Some(IconType::RGB24_32x32),
        (16, 1) => Some(IconType::Mono_16x16),
        (16, 4) => Some(IconType::Indexed4_16x16),
        (16, 8) => Some(IconType::Indexed8_16x16),
        (16, 32) => Some(IconType::RGB24_16x16),
        _ => None,
    }
}

fn mask_type_for(width: u32, bit_depth: u32) -> Option<IconType> {
    match (width, bit_depth) {
        (128, 8) => Some(IconType::Mask8_128x128),
        (48, 1) => Some(IconType::Mono_48x48),
        (48, 8) => Some(IconType::Mask8_48x48),
        (32, 1) => Some(IconType::Mono_32x32),
        (32, 8) => Some(IconType::Mask8_32x32),
        (16, 1) => Some(IconType::Mono_16x16),
        (16, 8) => Some(IconType::Mask8_16x16),
        _ => None,
    }
}
