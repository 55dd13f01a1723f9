//! The `.rsrc` resource directory tree.
//!
//! Tables are stored in a flat arena (`ResourceTree::tables`) and refer to
//! their children by index.  Every record keeps the absolute file offset it
//! was parsed from.

use std::collections::HashSet;
use std::fmt;

use super::field::{self, Field};
use super::headers::SectionHeader;
use super::PeError;

/// Size of a resource directory table header.
pub const TABLE_HEADER_SIZE: usize = 16;

/// Size of one resource directory entry.
pub const ENTRY_SIZE: usize = 8;

/// Size of a resource data entry.
pub const DATA_ENTRY_SIZE: usize = 16;

const HIGH_BIT: u32 = 0x8000_0000;

/// Standard resource type IDs found at the first level of the tree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum ResourceType {
    Cursor,
    Bitmap,
    Icon,
    Menu,
    Dialog,
    String,
    FontDirectory,
    Font,
    Accelerator,
    RcData,
    MessageTable,
    GroupCursor,
    GroupIcon,
    VersionInfo,
    DlgInclude,
    PlugAndPlay,
    Vxd,
    AnimatedCursor,
    AnimatedIcon,
    Html,
    Manifest,
}

impl ResourceType {
    /// Looks up a standard resource type by its numeric ID.
    pub fn from_id(id: u32) -> Option<ResourceType> {
        let resource_type = match id {
            1 => ResourceType::Cursor,
            2 => ResourceType::Bitmap,
            3 => ResourceType::Icon,
            4 => ResourceType::Menu,
            5 => ResourceType::Dialog,
            6 => ResourceType::String,
            7 => ResourceType::FontDirectory,
            8 => ResourceType::Font,
            9 => ResourceType::Accelerator,
            10 => ResourceType::RcData,
            11 => ResourceType::MessageTable,
            12 => ResourceType::GroupCursor,
            14 => ResourceType::GroupIcon,
            16 => ResourceType::VersionInfo,
            17 => ResourceType::DlgInclude,
            19 => ResourceType::PlugAndPlay,
            20 => ResourceType::Vxd,
            21 => ResourceType::AnimatedCursor,
            22 => ResourceType::AnimatedIcon,
            23 => ResourceType::Html,
            24 => ResourceType::Manifest,
            _ => return None,
        };
        Some(resource_type)
    }

    /// Returns the numeric ID of this resource type.
    pub fn id(self) -> u32 {
        match self {
            ResourceType::Cursor => 1,
            ResourceType::Bitmap => 2,
            ResourceType::Icon => 3,
            ResourceType::Menu => 4,
            ResourceType::Dialog => 5,
            ResourceType::String => 6,
            ResourceType::FontDirectory => 7,
            ResourceType::Font => 8,
            ResourceType::Accelerator => 9,
            ResourceType::RcData => 10,
            ResourceType::MessageTable => 11,
            ResourceType::GroupCursor => 12,
            ResourceType::GroupIcon => 14,
            ResourceType::VersionInfo => 16,
            ResourceType::DlgInclude => 17,
            ResourceType::PlugAndPlay => 19,
            ResourceType::Vxd => 20,
            ResourceType::AnimatedCursor => 21,
            ResourceType::AnimatedIcon => 22,
            ResourceType::Html => 23,
            ResourceType::Manifest => 24,
        }
    }

    /// Returns the human-readable name of this resource type.
    pub fn name(self) -> &'static str {
        match self {
            ResourceType::Cursor => "Cursor",
            ResourceType::Bitmap => "Bitmap",
            ResourceType::Icon => "Icon",
            ResourceType::Menu => "Menu",
            ResourceType::Dialog => "Dialog",
            ResourceType::String => "String",
            ResourceType::FontDirectory => "Font Directory",
            ResourceType::Font => "Font",
            ResourceType::Accelerator => "Accelerator",
            ResourceType::RcData => "RC Data",
            ResourceType::MessageTable => "Message Table",
            ResourceType::GroupCursor => "Group Cursor",
            ResourceType::GroupIcon => "Group Icon",
            ResourceType::VersionInfo => "Version Info",
            ResourceType::DlgInclude => "DLG Include",
            ResourceType::PlugAndPlay => "Plug and Play",
            ResourceType::Vxd => "VXD",
            ResourceType::AnimatedCursor => "Animated Cursor",
            ResourceType::AnimatedIcon => "Animated Icon",
            ResourceType::Html => "HTML",
            ResourceType::Manifest => "Manifest",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a directory entry is keyed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryKey {
    /// A length-prefixed UTF-16 name stored in the resource section.
    Name(String),
    /// A numeric ID.
    Id(u32),
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EntryKey::Name(ref name) => f.write_str(name),
            EntryKey::Id(id) => write!(f, "{}", id),
        }
    }
}

/// What a directory entry points at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryTarget {
    /// A nested table, by index into [`ResourceTree::tables`].
    Table(usize),
    /// A leaf describing a block of resource data.
    Data(ResourceDataEntry),
    /// The entry's target offset is zero.
    Empty,
}

/// One 8-byte entry of a resource directory table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceEntry {
    /// File offset of the entry.
    pub offset: usize,
    /// Name or ID of the entry.
    pub key: EntryKey,
    /// Human-readable label: the resource type name for first-level ID
    /// entries, otherwise the key itself.
    pub label: String,
    /// Nested table, data entry, or nothing.
    pub target: EntryTarget,
}

const DATA_ENTRY_LAYOUT: [Field; 4] = [
    Field::new("DataRVA", 0, 4),
    Field::new("Size", 4, 4),
    Field::new("Codepage", 8, 4),
    Field::new("Reserved", 12, 4),
];

/// A leaf of the tree, locating one resource's bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceDataEntry {
    /// File offset of the 16-byte record.
    pub offset: usize,
    /// RVA of the resource data.
    pub data_rva: u32,
    /// Size of the resource data.
    pub size: u32,
    /// Code page used to decode code point values in the data.
    pub codepage: u32,
    /// File offset of the resource data.
    pub data_offset: usize,
}

impl ResourceDataEntry {
    fn parse(data: &[u8], offset: usize, section: &SectionHeader)
             -> Result<ResourceDataEntry, PeError> {
        field::check_bounds(data, offset, DATA_ENTRY_SIZE)?;
        let data_rva = field::read_u32(data, offset)?;
        Ok(ResourceDataEntry {
            offset,
            data_rva,
            size: field::read_u32(data, offset + 4)?,
            codepage: field::read_u32(data, offset + 8)?,
            data_offset: section.rva_to_offset(data_rva),
        })
    }

    /// Returns the absolute field descriptor with the given name.
    pub fn field(&self, name: &str) -> Option<Field> {
        field::find(&DATA_ENTRY_LAYOUT, name).map(|f| f.at(self.offset))
    }

    /// Returns the resource bytes this entry points at.
    pub fn bytes<'a>(&self, data: &'a [u8]) -> Result<&'a [u8], PeError> {
        field::check_bounds(data, self.data_offset, self.size as usize)?;
        Ok(&data[self.data_offset..self.data_offset + self.size as usize])
    }
}

/// One resource directory table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceTable {
    /// File offset of the table header.
    pub offset: usize,
    /// Depth in the tree; the root is 0.
    pub depth: usize,
    /// ID of the entry that led here, for tables reached by ID.
    pub type_id: Option<u32>,
    /// Table characteristics (normally zero).
    pub characteristics: u32,
    /// Creation time stamp.
    pub time_date_stamp: u32,
    /// Major version number.
    pub major_version: u16,
    /// Minor version number.
    pub minor_version: u16,
    /// Number of name-keyed entries.
    pub number_of_name_entries: u16,
    /// Number of ID-keyed entries.
    pub number_of_id_entries: u16,
    /// Name-keyed entries followed by ID-keyed entries.
    pub entries: Vec<ResourceEntry>,
}

impl ResourceTable {
    fn parse_header(data: &[u8],
                    offset: usize,
                    depth: usize,
                    type_id: Option<u32>)
                    -> Result<ResourceTable, PeError> {
        field::check_bounds(data, offset, TABLE_HEADER_SIZE)?;
        Ok(ResourceTable {
            offset,
            depth,
            type_id,
            characteristics: field::read_u32(data, offset)?,
            time_date_stamp: field::read_u32(data, offset + 4)?,
            major_version: field::read_u16(data, offset + 8)?,
            minor_version: field::read_u16(data, offset + 10)?,
            number_of_name_entries: field::read_u16(data, offset + 12)?,
            number_of_id_entries: field::read_u16(data, offset + 14)?,
            entries: Vec::new(),
        })
    }

    /// Returns the nested tables of this table, by arena index.
    pub fn subdirectories<'a>(&'a self) -> impl Iterator<Item = usize> + 'a {
        self.entries.iter().filter_map(|entry| match entry.target {
            EntryTarget::Table(index) => Some(index),
            _ => None,
        })
    }

    /// Returns the data entries directly inside this table.
    pub fn data_entries<'a>(&'a self)
                            -> impl Iterator<Item = &'a ResourceDataEntry> + 'a {
        self.entries.iter().filter_map(|entry| match entry.target {
            EntryTarget::Data(ref data) => Some(data),
            _ => None,
        })
    }
}

/// The parsed resource directory of a `.rsrc` section.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceTree {
    /// Every table of the tree; index 0 is the root.
    pub tables: Vec<ResourceTable>,
}

impl ResourceTree {
    /// Walks the resource directory stored in `section`.
    ///
    /// The walk uses an explicit work stack.  A table offset that was
    /// already visited is logged and not expanded again, so self-referential
    /// trees terminate.
    pub fn parse(data: &[u8], section: &SectionHeader)
                 -> Result<ResourceTree, PeError> {
        let base = section.pointer_to_raw_data as usize;
        let root = ResourceTable::parse_header(data, base, 0, None)?;
        let mut tables = vec![root];
        let mut visited = HashSet::new();
        visited.insert(base);
        let mut stack = vec![0usize];

        while let Some(index) = stack.pop() {
            let (table_offset, depth, count) = {
                let table = &tables[index];
                (table.offset,
                 table.depth,
                 table.number_of_name_entries as usize +
                 table.number_of_id_entries as usize)
            };
            let name_count = tables[index].number_of_name_entries as usize;
            trace!("{} table at {:#x} ({} entries)",
                   "--".repeat(depth + 1),
                   table_offset,
                   count);

            let mut entries = Vec::with_capacity(count);
            for i in 0..count {
                let entry_offset = table_offset + TABLE_HEADER_SIZE +
                                   i * ENTRY_SIZE;
                let name_field = field::read_u32(data, entry_offset)?;
                let target_field = field::read_u32(data, entry_offset + 4)?;

                let key = if i < name_count {
                    let name_offset = base + (name_field & !HIGH_BIT) as usize;
                    EntryKey::Name(read_name(data, name_offset)?)
                } else {
                    EntryKey::Id(name_field)
                };
                let label = match key {
                    EntryKey::Id(id) if depth == 0 => {
                        match ResourceType::from_id(id) {
                            Some(resource_type) => resource_type.name()
                                .to_string(),
                            None => id.to_string(),
                        }
                    }
                    ref other => other.to_string(),
                };
                trace!("{} entry {} at {:#x} -> {:#x}",
                       "--".repeat(depth + 1),
                       label,
                       entry_offset,
                       target_field);

                let target_offset = base + (target_field & !HIGH_BIT) as usize;
                let target = if target_field & !HIGH_BIT == 0 {
                    EntryTarget::Empty
                } else if target_field & HIGH_BIT == 0 {
                    EntryTarget::Data(ResourceDataEntry::parse(data,
                                                               target_offset,
                                                               section)?)
                } else if !visited.insert(target_offset) {
                    warn!("resource table at {:#x} already visited; \
                           skipping entry {}",
                          target_offset,
                          label);
                    EntryTarget::Empty
                } else {
                    let type_id = match key {
                        EntryKey::Id(id) => Some(id),
                        EntryKey::Name(_) => None,
                    };
                    let child = ResourceTable::parse_header(data,
                                                            target_offset,
                                                            depth + 1,
                                                            type_id)?;
                    tables.push(child);
                    stack.push(tables.len() - 1);
                    EntryTarget::Table(tables.len() - 1)
                };
                entries.push(ResourceEntry {
                    offset: entry_offset,
                    key,
                    label,
                    target,
                });
            }
            tables[index].entries = entries;
        }
        Ok(ResourceTree { tables })
    }

    /// Returns the root table.
    pub fn root(&self) -> &ResourceTable {
        &self.tables[0]
    }

    /// Returns the table at an arena index.
    pub fn table(&self, index: usize) -> Option<&ResourceTable> {
        self.tables.get(index)
    }

    /// Returns the first-level table holding resources of the given type.
    pub fn directory_by_type(&self, resource_type: ResourceType)
                             -> Option<&ResourceTable> {
        self.root()
            .subdirectories()
            .filter_map(|index| self.table(index))
            .find(|table| table.type_id == Some(resource_type.id()))
    }

    /// Returns the first data entry of the first subdirectory of `table`.
    ///
    /// For a type directory this is the first language variant of the first
    /// named resource.  When that subdirectory nests further, the first
    /// table at each level is followed.
    pub fn first_data_entry(&self, table: &ResourceTable)
                            -> Option<&ResourceDataEntry> {
        let mut current = self.table(table.subdirectories().next()?)?;
        loop {
            if let Some(data) = current.data_entries().next() {
                return Some(data);
            }
            current = self.table(current.subdirectories().next()?)?;
        }
    }

    /// Returns the labels of the first-level entries, in directory order.
    pub fn type_names(&self) -> Vec<String> {
        self.root().entries.iter().map(|entry| entry.label.clone()).collect()
    }
}

/// Reads a length-prefixed UTF-16LE resource name.
fn read_name(data: &[u8], offset: usize) -> Result<String, PeError> {
    let length = field::read_u16(data, offset)? as usize;
    field::check_bounds(data, offset + 2, length * 2)?;
    let units: Vec<u16> = data[offset + 2..offset + 2 + length * 2]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(raw: u32, virtual_address: u32) -> SectionHeader {
        SectionHeader {
            offset: 0,
            name: ".rsrc".to_string(),
            virtual_size: 0x1000,
            virtual_address,
            size_of_raw_data: 0x1000,
            pointer_to_raw_data: raw,
            pointer_to_relocations: 0,
            pointer_to_line_numbers: 0,
            characteristics: 0,
        }
    }

    fn put_u16(data: &mut [u8], offset: usize, value: u16) {
        data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn put_u32(data: &mut [u8], offset: usize, value: u32) {
        data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    #[test]
    fn resource_type_names() {
        assert_eq!(ResourceType::from_id(14), Some(ResourceType::GroupIcon));
        assert_eq!(ResourceType::GroupIcon.name(), "Group Icon");
        assert_eq!(ResourceType::from_id(13), None);
        for id in 0..30 {
            if let Some(resource_type) = ResourceType::from_id(id) {
                assert_eq!(resource_type.id(), id);
            }
        }
    }

    #[test]
    fn walk_named_and_numbered_entries() {
        let mut data = vec![0u8; 0x100];
        // Root: one name entry, one ID entry (Icon).
        put_u16(&mut data, 12, 1);
        put_u16(&mut data, 14, 1);
        put_u32(&mut data, 16, HIGH_BIT | 0x80);
        put_u32(&mut data, 20, HIGH_BIT | 0x30);
        put_u32(&mut data, 24, 3);
        put_u32(&mut data, 28, HIGH_BIT | 0x48);
        // Named table at 0x30 is empty.  Icon table at 0x48 has one entry
        // leading to the language table at 0x68.
        put_u16(&mut data, 0x48 + 14, 1);
        put_u32(&mut data, 0x58, 1);
        put_u32(&mut data, 0x5C, HIGH_BIT | 0x68);
        put_u16(&mut data, 0x68 + 14, 1);
        put_u32(&mut data, 0x78, 0x409);
        put_u32(&mut data, 0x7C, 0xA0);
        // Name "AB" at 0x80.
        put_u16(&mut data, 0x80, 2);
        put_u16(&mut data, 0x82, u16::from(b'A'));
        put_u16(&mut data, 0x84, u16::from(b'B'));
        // Data entry at 0xA0 describing 4 bytes at 0xC0.
        put_u32(&mut data, 0xA0, 0x2000 + 0xC0);
        put_u32(&mut data, 0xA4, 4);

        let tree = ResourceTree::parse(&data, &section(0, 0x2000)).unwrap();
        assert_eq!(tree.tables.len(), 4);
        assert_eq!(tree.type_names(), vec!["AB".to_string(),
                                           "Icon".to_string()]);
        let icons = tree.directory_by_type(ResourceType::Icon).unwrap();
        assert_eq!(icons.type_id, Some(3));
        assert_eq!(icons.depth, 1);
        assert!(tree.directory_by_type(ResourceType::GroupIcon).is_none());
        let entry = tree.first_data_entry(icons).unwrap();
        assert_eq!(entry.offset, 0xA0);
        assert_eq!(entry.data_offset, 0xC0);
        assert_eq!(entry.size, 4);
        assert_eq!(entry.field("Size").unwrap().offset, 0xA4);
        assert_eq!(entry.bytes(&data).unwrap().len(), 4);
    }

    #[test]
    fn self_referencing_table_is_skipped() {
        let mut data = vec![0u8; 0x40];
        put_u16(&mut data, 14, 1);
        put_u32(&mut data, 16, 3);
        put_u32(&mut data, 20, HIGH_BIT);
        // The child table at 0x20 lists itself as its only subdirectory.
        let mut looped = data.clone();
        put_u32(&mut looped, 20, HIGH_BIT | 0x20);
        put_u16(&mut looped, 0x20 + 14, 1);
        put_u32(&mut looped, 0x30, 1);
        put_u32(&mut looped, 0x34, HIGH_BIT | 0x20);

        let tree = ResourceTree::parse(&data, &section(0, 0)).unwrap();
        assert_eq!(tree.root().entries[0].target, EntryTarget::Empty);

        let tree = ResourceTree::parse(&looped, &section(0, 0)).unwrap();
        assert_eq!(tree.tables.len(), 2);
        assert_eq!(tree.tables[1].entries[0].target, EntryTarget::Empty);
    }

    #[test]
    fn truncated_table_is_out_of_bounds() {
        let mut data = vec![0u8; 20];
        put_u16(&mut data, 14, 2);
        let result = ResourceTree::parse(&data, &section(0, 0));
        assert!(matches!(result, Err(PeError::OutOfBounds { .. })));
    }
}
