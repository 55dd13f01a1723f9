use std::fmt;

/// Table-of-contents pseudo-element (`TOC `).
pub const TABLE_OF_CONTENTS: OSType = OSType(*b"TOC ");
/// Icon Composer version pseudo-element (`icnV`).
pub const ICON_VERSION: OSType = OSType(*b"icnV");

/// Element types whose payload is itself a list of icon elements.
pub const VARIANT_TYPES: [OSType; 5] = [OSType(*b"tile"),
                                        OSType(*b"over"),
                                        OSType(*b"drop"),
                                        OSType(*b"open"),
                                        OSType(*b"odrp")];

/// Types of icon elements that can be decoded as images or masks.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IconType {
    /// 16x12 1-bit icon with its 1-bit mask in the same element.
    Mono_16x12,
    /// 16x16 1-bit icon with its 1-bit mask in the same element.
    Mono_16x16,
    /// 32x32 1-bit icon with its 1-bit mask in the same element.
    Mono_32x32,
    /// 48x48 1-bit icon with its 1-bit mask in the same element.
    Mono_48x48,
    /// 16x12 4-bit indexed icon.
    Indexed4_16x12,
    /// 16x16 4-bit indexed icon.
    Indexed4_16x16,
    /// 32x32 4-bit indexed icon.
    Indexed4_32x32,
    /// 48x48 4-bit indexed icon.
    Indexed4_48x48,
    /// 16x12 8-bit indexed icon.
    Indexed8_16x12,
    /// 16x16 8-bit indexed icon.
    Indexed8_16x16,
    /// 32x32 8-bit indexed icon.
    Indexed8_32x32,
    /// 48x48 8-bit indexed icon.
    Indexed8_48x48,
    /// 16x16 24-bit icon (without alpha).
    RGB24_16x16,
    /// 16x16 8-bit alpha mask.
    Mask8_16x16,
    /// 32x32 24-bit icon (without alpha).
    RGB24_32x32,
    /// 32x32 8-bit alpha mask.
    Mask8_32x32,
    /// 48x48 24-bit icon (without alpha).
    RGB24_48x48,
    /// 48x48 8-bit alpha mask.
    Mask8_48x48,
    /// 128x128 24-bit icon (without alpha).
    RGB24_128x128,
    /// 128x128 8-bit alpha mask.
    Mask8_128x128,
    /// 256x256 32-bit icon.
    RGBA32_256x256,
    /// 512x512 32-bit icon.
    RGBA32_512x512,
    /// 1024x1024 32-bit icon.
    RGBA32_1024x1024,
}

impl IconType {
    /// Every icon type known to the registry.
    pub const ALL: [IconType; 23] = [IconType::Mono_16x12,
                                     IconType::Mono_16x16,
                                     IconType::Mono_32x32,
                                     IconType::Mono_48x48,
                                     IconType::Indexed4_16x12,
                                     IconType::Indexed4_16x16,
                                     IconType::Indexed4_32x32,
                                     IconType::Indexed4_48x48,
                                     IconType::Indexed8_16x12,
                                     IconType::Indexed8_16x16,
                                     IconType::Indexed8_32x32,
                                     IconType::Indexed8_48x48,
                                     IconType::RGB24_16x16,
                                     IconType::Mask8_16x16,
                                     IconType::RGB24_32x32,
                                     IconType::Mask8_32x32,
                                     IconType::RGB24_48x48,
                                     IconType::Mask8_48x48,
                                     IconType::RGB24_128x128,
                                     IconType::Mask8_128x128,
                                     IconType::RGBA32_256x256,
                                     IconType::RGBA32_512x512,
                                     IconType::RGBA32_1024x1024];

    /// Get the icon type associated with the given OSType, if any.
    pub fn from_ostype(ostype: OSType) -> Option<IconType> {
        let OSType(raw_ostype) = ostype;
        match &raw_ostype {
            b"icm#" => Some(IconType::Mono_16x12),
            b"ics#" => Some(IconType::Mono_16x16),
            b"ICN#" => Some(IconType::Mono_32x32),
            b"ich#" => Some(IconType::Mono_48x48),
            b"icm4" => Some(IconType::Indexed4_16x12),
            b"ics4" => Some(IconType::Indexed4_16x16),
            b"icl4" => Some(IconType::Indexed4_32x32),
            b"ich4" => Some(IconType::Indexed4_48x48),
            b"icm8" => Some(IconType::Indexed8_16x12),
            b"ics8" => Some(IconType::Indexed8_16x16),
            b"icl8" => Some(IconType::Indexed8_32x32),
            b"ich8" => Some(IconType::Indexed8_48x48),
            b"is32" => Some(IconType::RGB24_16x16),
            b"s8mk" => Some(IconType::Mask8_16x16),
            b"il32" => Some(IconType::RGB24_32x32),
            b"l8mk" => Some(IconType::Mask8_32x32),
            b"ih32" => Some(IconType::RGB24_48x48),
            b"h8mk" => Some(IconType::Mask8_48x48),
            b"it32" => Some(IconType::RGB24_128x128),
            b"t8mk" => Some(IconType::Mask8_128x128),
            b"ic08" => Some(IconType::RGBA32_256x256),
            b"ic09" => Some(IconType::RGBA32_512x512),
            b"ic10" => Some(IconType::RGBA32_1024x1024),
            _ => None,
        }
    }

    /// Get the OSType that represents this icon type.
    pub fn ostype(self) -> OSType {
        match self {
            IconType::Mono_16x12 => OSType(*b"icm#"),
            IconType::Mono_16x16 => OSType(*b"ics#"),
            IconType::Mono_32x32 => OSType(*b"ICN#"),
            IconType::Mono_48x48 => OSType(*b"ich#"),
            IconType::Indexed4_16x12 => OSType(*b"icm4"),
            IconType::Indexed4_16x16 => OSType(*b"ics4"),
            IconType::Indexed4_32x32 => OSType(*b"icl4"),
            IconType::Indexed4_48x48 => OSType(*b"ich4"),
            IconType::Indexed8_16x12 => OSType(*b"icm8"),
            IconType::Indexed8_16x16 => OSType(*b"ics8"),
            IconType::Indexed8_32x32 => OSType(*b"icl8"),
            IconType::Indexed8_48x48 => OSType(*b"ich8"),
            IconType::RGB24_16x16 => OSType(*b"is32"),
            IconType::Mask8_16x16 => OSType(*b"s8mk"),
            IconType::RGB24_32x32 => OSType(*b"il32"),
            IconType::Mask8_32x32 => OSType(*b"l8mk"),
            IconType::RGB24_48x48 => OSType(*b"ih32"),
            IconType::Mask8_48x48 => OSType(*b"h8mk"),
            IconType::RGB24_128x128 => OSType(*b"it32"),
            IconType::Mask8_128x128 => OSType(*b"t8mk"),
            IconType::RGBA32_256x256 => OSType(*b"ic08"),
            IconType::RGBA32_512x512 => OSType(*b"ic09"),
            IconType::RGBA32_1024x1024 => OSType(*b"ic10"),
        }
    }

    /// Returns the type of the element holding the alpha mask for this icon
    /// type, or `None` if the icon carries its own alpha (or is itself a
    /// mask-only type).  The 1-bit types are their own mask type, since those
    /// elements store the glyph and the mask back to back.
    ///
    /// # Examples
    /// ```
    /// use web2exe_icons::IconType;
    /// assert_eq!(IconType::RGB24_32x32.mask_type(),
    ///            Some(IconType::Mask8_32x32));
    /// assert_eq!(IconType::Indexed8_16x16.mask_type(),
    ///            Some(IconType::Mono_16x16));
    /// assert_eq!(IconType::RGBA32_512x512.mask_type(), None);
    /// ```
    pub fn mask_type(self) -> Option<IconType> {
        match self {
            IconType::RGB24_16x16 => Some(IconType::Mask8_16x16),
            IconType::RGB24_32x32 => Some(IconType::Mask8_32x32),
            IconType::RGB24_48x48 => Some(IconType::Mask8_48x48),
            IconType::RGB24_128x128 => Some(IconType::Mask8_128x128),
            IconType::Mono_16x12 |
            IconType::Indexed4_16x12 |
            IconType::Indexed8_16x12 => Some(IconType::Mono_16x12),
            IconType::Mono_16x16 |
            IconType::Indexed4_16x16 |
            IconType::Indexed8_16x16 => Some(IconType::Mono_16x16),
            IconType::Mono_32x32 |
            IconType::Indexed4_32x32 |
            IconType::Indexed8_32x32 => Some(IconType::Mono_32x32),
            IconType::Mono_48x48 |
            IconType::Indexed4_48x48 |
            IconType::Indexed8_48x48 => Some(IconType::Mono_48x48),
            IconType::Mask8_16x16 |
            IconType::Mask8_32x32 |
            IconType::Mask8_48x48 |
            IconType::Mask8_128x128 |
            IconType::RGBA32_256x256 |
            IconType::RGBA32_512x512 |
            IconType::RGBA32_1024x1024 => None,
        }
    }

    /// Returns true if elements of this type carry color (or glyph) data.
    pub fn is_image(self) -> bool {
        match self.encoding() {
            Encoding::Mask8 => false,
            _ => true,
        }
    }

    /// Returns true if elements of this type carry mask data.  Note that the
    /// 1-bit types are both images and masks.
    pub fn is_mask(self) -> bool {
        match self.encoding() {
            Encoding::Mask8 | Encoding::Mono => true,
            _ => false,
        }
    }

    /// Returns the pixel data width of this icon type.
    ///
    /// # Examples
    /// ```
    /// use web2exe_icons::IconType;
    /// assert_eq!(IconType::Mask8_128x128.pixel_width(), 128);
    /// assert_eq!(IconType::Indexed4_16x12.pixel_width(), 16);
    /// assert_eq!(IconType::RGBA32_1024x1024.pixel_width(), 1024);
    /// ```
    pub fn pixel_width(self) -> u32 {
        match self {
            IconType::Mono_16x12 |
            IconType::Indexed4_16x12 |
            IconType::Indexed8_16x12 |
            IconType::Mono_16x16 |
            IconType::Indexed4_16x16 |
            IconType::Indexed8_16x16 |
            IconType::RGB24_16x16 |
            IconType::Mask8_16x16 => 16,
            IconType::Mono_32x32 |
            IconType::Indexed4_32x32 |
            IconType::Indexed8_32x32 |
            IconType::RGB24_32x32 |
            IconType::Mask8_32x32 => 32,
            IconType::Mono_48x48 |
            IconType::Indexed4_48x48 |
            IconType::Indexed8_48x48 |
            IconType::RGB24_48x48 |
            IconType::Mask8_48x48 => 48,
            IconType::RGB24_128x128 |
            IconType::Mask8_128x128 => 128,
            IconType::RGBA32_256x256 => 256,
            IconType::RGBA32_512x512 => 512,
            IconType::RGBA32_1024x1024 => 1024,
        }
    }

    /// Returns the pixel data height of this icon type.  This matches the
    /// width for every type except the legacy 16x12 "mini" icons.
    ///
    /// # Examples
    /// ```
    /// use web2exe_icons::IconType;
    /// assert_eq!(IconType::Mono_16x12.pixel_height(), 12);
    /// assert_eq!(IconType::RGB24_48x48.pixel_height(), 48);
    /// ```
    pub fn pixel_height(self) -> u32 {
        match self {
            IconType::Mono_16x12 |
            IconType::Indexed4_16x12 |
            IconType::Indexed8_16x12 => 12,
            _ => self.pixel_width(),
        }
    }

    /// Returns the number of channels stored per pixel.
    pub fn channels(self) -> u32 {
        match self.encoding() {
            Encoding::RLE24 | Encoding::JP2PNG => 4,
            _ => 1,
        }
    }

    /// Returns the number of bits stored per channel.
    pub fn pixel_depth(self) -> u32 {
        match self.encoding() {
            Encoding::Mono => 1,
            Encoding::Indexed4 => 4,
            Encoding::Indexed8 |
            Encoding::Mask8 |
            Encoding::RLE24 |
            Encoding::JP2PNG => 8,
        }
    }

    /// Returns the number of bits stored per pixel.
    pub fn bit_depth(self) -> u32 {
        self.pixel_depth() * self.channels()
    }

    /// Returns the encoding used within an ICNS file for this icon type.
    pub fn encoding(self) -> Encoding {
        match self {
            IconType::Mono_16x12 |
            IconType::Mono_16x16 |
            IconType::Mono_32x32 |
            IconType::Mono_48x48 => Encoding::Mono,
            IconType::Indexed4_16x12 |
            IconType::Indexed4_16x16 |
            IconType::Indexed4_32x32 |
            IconType::Indexed4_48x48 => Encoding::Indexed4,
            IconType::Indexed8_16x12 |
            IconType::Indexed8_16x16 |
            IconType::Indexed8_32x32 |
            IconType::Indexed8_48x48 => Encoding::Indexed8,
            IconType::RGB24_16x16 |
            IconType::RGB24_32x32 |
            IconType::RGB24_48x48 |
            IconType::RGB24_128x128 => Encoding::RLE24,
            IconType::Mask8_16x16 |
            IconType::Mask8_32x32 |
            IconType::Mask8_48x48 |
            IconType::Mask8_128x128 => Encoding::Mask8,
            IconType::RGBA32_256x256 |
            IconType::RGBA32_512x512 |
            IconType::RGBA32_1024x1024 => Encoding::JP2PNG,
        }
    }
}

/// A Macintosh OSType (also known as a ResType), used in ICNS files to
/// identify the type of each icon element.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OSType(pub [u8; 4]);

impl OSType {
    /// Returns true for the element types that wrap a nested icon list.
    pub fn is_variant(self) -> bool {
        VARIANT_TYPES.contains(&self)
    }
}

impl fmt::Display for OSType {
    fn fmt(&self, out: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let &OSType(raw) = self;
        for &byte in &raw {
            write!(out, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl std::str::FromStr for OSType {
    type Err = String;

    fn from_str(input: &str) -> Result<OSType, String> {
        let bytes = input.as_bytes();
        if bytes.len() != 4 {
            Err(format!("OSType string must be 4 bytes (was {})", bytes.len()))
        } else {
            let mut raw = [0u8; 4];
            raw.clone_from_slice(bytes);
            Ok(OSType(raw))
        }
    }
}

/// Method of encoding an image within an icon element.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Encoding {
    /// Icon element data payload is a 1-bit glyph followed by a 1-bit mask.
    Mono,
    /// Icon element data payload is 4-bit indices into the 16-color palette.
    Indexed4,
    /// Icon element data payload is 8-bit indices into the 256-color
    /// palette.
    Indexed8,
    /// Icon element data payload is an uncompressed 8-bit alpha mask.
    Mask8,
    /// Icon element data payload is an RLE-compressed 24-bit RGB image.
    RLE24,
    /// Icon element data payload is a JPEG 2000 or PNG file.
    JP2PNG,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn icon_type_ostype_round_trip() {
        for icon_type in &IconType::ALL {
            let ostype = icon_type.ostype();
            let from = IconType::from_ostype(ostype);
            assert_eq!(Some(*icon_type), from);
        }
    }

    #[test]
    fn mask_types_are_masks() {
        for icon_type in &IconType::ALL {
            if let Some(mask_type) = icon_type.mask_type() {
                assert!(mask_type.is_mask(), "{:?}", mask_type);
                assert_eq!(mask_type.pixel_width(), icon_type.pixel_width());
                assert_eq!(mask_type.pixel_height(),
                           icon_type.pixel_height());
            }
        }
    }

    #[test]
    fn mono_types_are_image_and_mask() {
        assert!(IconType::Mono_32x32.is_image());
        assert!(IconType::Mono_32x32.is_mask());
        assert!(!IconType::Mask8_32x32.is_image());
        assert!(!IconType::RGB24_32x32.is_mask());
    }

    #[test]
    fn pseudo_and_variant_types_are_not_icons() {
        assert_eq!(IconType::from_ostype(TABLE_OF_CONTENTS), None);
        assert_eq!(IconType::from_ostype(ICON_VERSION), None);
        for variant in &VARIANT_TYPES {
            assert!(variant.is_variant());
            assert_eq!(IconType::from_ostype(*variant), None);
        }
        assert!(!OSType(*b"il32").is_variant());
    }

    #[test]
    fn ostype_to_and_from_str() {
        let ostype = OSType::from_str("ICN#").expect("failed to parse OSType");
        assert_eq!(ostype.to_string(), "ICN#".to_string());
    }

    #[test]
    fn ostype_from_str_failure() {
        assert_eq!(OSType::from_str("abc"),
                   Err("OSType string must be 4 bytes (was 3)".to_string()));
        assert_eq!(OSType::from_str("abcde"),
                   Err("OSType string must be 4 bytes (was 5)".to_string()));
    }
}
