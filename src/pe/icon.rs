//! Icon group and icon directory records.
//!
//! A `RT_GROUP_ICON` resource holds a [`GroupHeader`]: the same layout as
//! the header of an `.ico` file, except that each 14-byte entry ends in the
//! ID of an `RT_ICON` resource instead of a 4-byte file offset.  An `.ico`
//! file's [`IconHeader`] uses 16-byte entries with the offset.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use ico::{IconDir, IconDirEntry, IconImage};
use image::DynamicImage;

use super::field::{self, Field};
use super::PeError;
use crate::resize::fit_to_canvas;

/// Size of the header shared by groups and `.ico` files.
pub const HEADER_SIZE: usize = 6;

/// Size of one group entry.
pub const GROUP_ENTRY_SIZE: usize = 14;

/// Size of one `.ico` directory entry.
pub const ICON_ENTRY_SIZE: usize = 16;

const HEADER_LAYOUT: [Field; 3] = [
    Field::new("Reserved", 0, 2),
    Field::new("ResourceType", 2, 2),
    Field::new("ResourceCount", 4, 2),
];

const ENTRY_LAYOUT: [Field; 8] = [
    Field::new("Width", 0, 1),
    Field::new("Height", 1, 1),
    Field::new("ColorCount", 2, 1),
    Field::new("Reserved", 3, 1),
    Field::new("ColorPlanes", 4, 2),
    Field::new("BitCount", 6, 2),
    Field::new("DataSize", 8, 4),
    Field::new("IconCursorId", 12, 2),
];

// ======================================================================== //

/// Image metadata common to group entries and icon entries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryInfo {
    /// Width in pixels; 0 means 256.
    pub width: u8,
    /// Height in pixels; 0 means 256.
    pub height: u8,
    /// Palette size, or 0 for true-color images.
    pub color_count: u8,
    /// Reserved, normally 0.
    pub reserved: u8,
    /// Color planes.
    pub color_planes: u16,
    /// Bits per pixel.
    pub bit_count: u16,
    /// Size of the image data.
    pub data_size: u32,
}

impl EntryInfo {
    fn parse(data: &[u8], offset: usize) -> Result<EntryInfo, PeError> {
        let read = |index: usize| ENTRY_LAYOUT[index].at(offset).read(data);
        Ok(EntryInfo {
            width: read(0)? as u8,
            height: read(1)? as u8,
            color_count: read(2)? as u8,
            reserved: read(3)? as u8,
            color_planes: read(4)? as u16,
            bit_count: read(5)? as u16,
            data_size: read(6)? as u32,
        })
    }

    fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u8(self.width)?;
        writer.write_u8(self.height)?;
        writer.write_u8(self.color_count)?;
        writer.write_u8(self.reserved)?;
        writer.write_u16::<LittleEndian>(self.color_planes)?;
        writer.write_u16::<LittleEndian>(self.bit_count)?;
        writer.write_u32::<LittleEndian>(self.data_size)?;
        Ok(())
    }

    /// Returns the width in pixels.
    pub fn pixel_width(&self) -> u32 {
        if self.width == 0 { 256 } else { self.width as u32 }
    }

    /// Returns the height in pixels.
    pub fn pixel_height(&self) -> u32 {
        if self.height == 0 { 256 } else { self.height as u32 }
    }
}

/// One entry of a [`GroupHeader`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupEntry {
    /// Image metadata.
    pub info: EntryInfo,
    /// ID of the `RT_ICON` resource holding the image.
    pub icon_id: u16,
    /// Position in the group, starting at 1.
    pub number: usize,
}

/// The contents of a `RT_GROUP_ICON` resource.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupHeader {
    /// Reserved, normally 0.
    pub reserved: u16,
    /// 1 for icons, 2 for cursors.
    pub resource_type: u16,
    /// The group's entries, in stored order.
    pub entries: Vec<GroupEntry>,
}

impl GroupHeader {
    /// Parses a group header and its entries from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<GroupHeader, PeError> {
        field::check_bounds(data, 0, HEADER_SIZE)?;
        let count = HEADER_LAYOUT[2].read(data)? as usize;
        let mut entries = Vec::with_capacity(count);
        for index in 0..count {
            let offset = HEADER_SIZE + index * GROUP_ENTRY_SIZE;
            field::check_bounds(data, offset, GROUP_ENTRY_SIZE)?;
            entries.push(GroupEntry {
                info: EntryInfo::parse(data, offset)?,
                icon_id: ENTRY_LAYOUT[7].at(offset).read(data)? as u16,
                number: index + 1,
            });
        }
        Ok(GroupHeader {
            reserved: HEADER_LAYOUT[0].read(data)? as u16,
            resource_type: HEADER_LAYOUT[1].read(data)? as u16,
            entries,
        })
    }

    /// Returns the size of the header plus its entry table.
    pub fn total_size(&self) -> usize {
        HEADER_SIZE + self.entries.len() * GROUP_ENTRY_SIZE
    }

    /// Serializes the header and entry table.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.total_size());
        out.write_u16::<LittleEndian>(self.reserved)?;
        out.write_u16::<LittleEndian>(self.resource_type)?;
        out.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        for entry in self.entries.iter() {
            entry.info.write_to(&mut out)?;
            out.write_u16::<LittleEndian>(entry.icon_id)?;
        }
        Ok(out)
    }
}

// ======================================================================== //

/// One entry of an [`IconHeader`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconEntry {
    /// Image metadata.
    pub info: EntryInfo,
    /// Offset of the image data from the start of the `.ico` file.
    pub offset_to_data: u32,
    /// Position in the directory, starting at 1.
    pub number: usize,
}

/// The header and directory of an `.ico` file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconHeader {
    /// Reserved, normally 0.
    pub reserved: u16,
    /// 1 for icons, 2 for cursors.
    pub image_type: u16,
    /// The directory entries, in stored order.
    pub entries: Vec<IconEntry>,
}

impl IconHeader {
    /// Parses an `.ico` header and directory from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<IconHeader, PeError> {
        field::check_bounds(data, 0, HEADER_SIZE)?;
        let count = HEADER_LAYOUT[2].read(data)? as usize;
        let mut entries = Vec::with_capacity(count);
        for index in 0..count {
            let offset = HEADER_SIZE + index * ICON_ENTRY_SIZE;
            field::check_bounds(data, offset, ICON_ENTRY_SIZE)?;
            entries.push(IconEntry {
                info: EntryInfo::parse(data, offset)?,
                offset_to_data: field::read_u32(data, offset + 12)?,
                number: index + 1,
            });
        }
        Ok(IconHeader {
            reserved: HEADER_LAYOUT[0].read(data)? as u16,
            image_type: HEADER_LAYOUT[1].read(data)? as u16,
            entries,
        })
    }

    /// Derives an `.ico` directory from a group.  Entries keep the group's
    /// order and numbering; their data is packed contiguously right after
    /// the directory.
    pub fn from_group(group: &GroupHeader) -> IconHeader {
        let mut offset = (HEADER_SIZE + group.entries.len() * ICON_ENTRY_SIZE)
            as u32;
        let mut entries = Vec::with_capacity(group.entries.len());
        for (index, group_entry) in group.entries.iter().enumerate() {
            entries.push(IconEntry {
                info: group_entry.info.clone(),
                offset_to_data: offset,
                number: index + 1,
            });
            offset += group_entry.info.data_size;
        }
        IconHeader {
            reserved: group.reserved,
            image_type: group.resource_type,
            entries,
        }
    }

    /// Returns the size of the header plus its directory.
    pub fn total_size(&self) -> usize {
        HEADER_SIZE + self.entries.len() * ICON_ENTRY_SIZE
    }

    /// Serializes the header and directory.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.total_size());
        out.write_u16::<LittleEndian>(self.reserved)?;
        out.write_u16::<LittleEndian>(self.image_type)?;
        out.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        for entry in self.entries.iter() {
            entry.info.write_to(&mut out)?;
            out.write_u32::<LittleEndian>(entry.offset_to_data)?;
        }
        Ok(out)
    }
}

// ======================================================================== //

/// Fits `source` onto a transparent `width` x `height` canvas and encodes it
/// as a single-image `.ico` file.
pub fn render_ico(source: &DynamicImage, width: u32, height: u32)
                  -> Result<Vec<u8>, PeError> {
    let canvas = fit_to_canvas(source, width, height);
    let image = IconImage::from_rgba_data(width, height, canvas.into_raw());
    let mut dir = IconDir::new(ico::ResourceType::Icon);
    dir.add_entry(IconDirEntry::encode(&image)?);
    let mut out = Vec::new();
    dir.write(&mut out)?;
    debug!("rendered {}x{} icon ({} bytes)", width, height, out.len());
    Ok(out)
}

// ======================================================================== //

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample_group() -> Vec<u8> {
        let mut data = vec![0, 0, 1, 0, 2, 0];
        // 32x32, 32 bpp, 1000 bytes, ID 7.
        data.extend_from_slice(&[32, 32, 0, 0, 1, 0, 32, 0]);
        data.extend_from_slice(&1000u32.to_le_bytes());
        data.extend_from_slice(&7u16.to_le_bytes());
        // 256x256, 32 bpp, 5000 bytes, ID 8.
        data.extend_from_slice(&[0, 0, 0, 0, 1, 0, 32, 0]);
        data.extend_from_slice(&5000u32.to_le_bytes());
        data.extend_from_slice(&8u16.to_le_bytes());
        data
    }

    #[test]
    fn parse_group() {
        let data = sample_group();
        let group = GroupHeader::parse(&data).unwrap();
        assert_eq!(group.resource_type, 1);
        assert_eq!(group.entries.len(), 2);
        assert_eq!(group.total_size(), 34);
        let first = &group.entries[0];
        assert_eq!(first.number, 1);
        assert_eq!(first.icon_id, 7);
        assert_eq!(first.info.pixel_width(), 32);
        assert_eq!(first.info.data_size, 1000);
        let second = &group.entries[1];
        assert_eq!(second.info.pixel_width(), 256);
        assert_eq!(second.info.pixel_height(), 256);
        assert_eq!(group.to_bytes().unwrap(), data);
    }

    #[test]
    fn truncated_group() {
        let data = sample_group();
        let result = GroupHeader::parse(&data[..20]);
        assert!(matches!(result, Err(PeError::OutOfBounds { .. })));
    }

    #[test]
    fn icon_header_from_group() {
        let group = GroupHeader::parse(&sample_group()).unwrap();
        let header = IconHeader::from_group(&group);
        assert_eq!(header.image_type, 1);
        assert_eq!(header.total_size(), 38);
        let offsets: Vec<u32> =
            header.entries.iter().map(|e| e.offset_to_data).collect();
        assert_eq!(offsets, vec![38, 1038]);
        let numbers: Vec<usize> =
            header.entries.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(header.entries[1].info, group.entries[1].info);

        let bytes = header.to_bytes().unwrap();
        assert_eq!(bytes.len(), 38);
        assert_eq!(IconHeader::parse(&bytes).unwrap(), header);
    }

    #[test]
    fn render_single_image_ico() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            40, 20, Rgba([0, 0, 255, 255])));
        let ico = render_ico(&source, 16, 16).unwrap();
        let header = IconHeader::parse(&ico).unwrap();
        assert_eq!(header.image_type, 1);
        assert_eq!(header.entries.len(), 1);
        let entry = &header.entries[0];
        assert_eq!(entry.info.pixel_width(), 16);
        assert_eq!(entry.info.pixel_height(), 16);
        assert_eq!(entry.offset_to_data as usize, header.total_size());
        assert_eq!(ico.len(),
                   header.total_size() + entry.info.data_size as usize);
    }
}
