//! Windows PE/COFF parsing and primary icon replacement.
//!
//! [`PeFile`] reads a whole executable into memory, parses its headers,
//! section table and `.rsrc` resource tree, and can splice a new image into
//! the data of the first `RT_ICON` resource.  Every parsed record stores the
//! absolute offset of the bytes it came from; nothing outside the icon slot
//! is ever rewritten.

use std::fs;
use std::path::Path;

use image::DynamicImage;
use thiserror::Error;

pub mod field;
pub mod headers;
pub mod icon;
pub mod resource;

use self::headers::{CoffHeader, DosHeader, OptionalHeader, SectionHeader,
                    SECTION_HEADER_SIZE};
use self::icon::{GroupHeader, IconHeader, HEADER_SIZE, ICON_ENTRY_SIZE};
use self::resource::{ResourceDataEntry, ResourceTree, ResourceType};

/// Name of the section holding the resource tree.
pub const RESOURCE_SECTION: &str = ".rsrc";

/// Errors produced while parsing or patching a PE file.
#[derive(Debug, Error)]
pub enum PeError {
    /// The file does not start with the `MZ` DOS signature.
    #[error("not a DOS/PE image: missing MZ signature")]
    InvalidSignature,

    /// The DOS header does not point at a `PE\0\0` signature.
    #[error("missing PE signature")]
    InvalidPeSignature,

    /// The optional header magic is neither PE32 nor PE32+.
    #[error("unknown optional header magic {0:#06x}")]
    InvalidOptionalMagic(u16),

    /// A structure extends past the end of the file.
    #[error("read of {size} bytes at offset {offset:#x} exceeds file length \
             {len:#x}")]
    OutOfBounds {
        /// Offset of the attempted access.
        offset: usize,
        /// Size of the attempted access.
        size: usize,
        /// Length of the buffer.
        len: usize,
    },

    /// A value is too wide for the field it is written to.
    #[error("value {value:#x} does not fit in {size}-byte field {name}")]
    FieldOverflow {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: u64,
        /// Field width in bytes.
        size: usize,
    },

    /// A required section is absent.
    #[error("section {0} not found")]
    MissingSection(String),

    /// A required resource is absent from the resource tree.
    #[error("resource not found: {0}")]
    MissingResource(&'static str),

    /// The replacement image could not be loaded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An executable held in memory together with its parsed structure.
#[derive(Clone, Debug)]
pub struct PeFile {
    data: Vec<u8>,
    dos: DosHeader,
    coff: CoffHeader,
    optional: OptionalHeader,
    sections: Vec<SectionHeader>,
    resources: Option<ResourceTree>,
}

impl PeFile {
    /// Reads and parses the executable at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<PeFile, PeError> {
        let path = path.as_ref();
        debug!("loading {}", path.display());
        PeFile::from_bytes(fs::read(path)?)
    }

    /// Parses an executable already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<PeFile, PeError> {
        let dos = DosHeader::parse(&data)?;
        let coff = CoffHeader::parse(&data, dos.pe_header_offset as usize)?;
        debug!("machine {} with {} sections",
               coff.machine_name(),
               coff.number_of_sections);
        let optional = OptionalHeader::parse(&data, coff.offset +
                                                    CoffHeader::SIZE)?;
        debug!("{:?} optional header, subsystem {}",
               optional.kind,
               optional.subsystem_name());

        let table = optional.offset + coff.size_of_optional_header as usize;
        let mut sections = Vec::with_capacity(coff.number_of_sections as usize);
        for index in 0..coff.number_of_sections as usize {
            let section = SectionHeader::parse(&data, table +
                                                      index *
                                                      SECTION_HEADER_SIZE)?;
            if section.pointer_to_line_numbers != 0 {
                warn!("section {} has COFF line numbers, which are ignored",
                      section.name);
            }
            if section.pointer_to_relocations != 0 {
                warn!("section {} has COFF relocations, which are ignored",
                      section.name);
            }
            sections.push(section);
        }

        let resources = match sections.iter()
            .find(|section| section.name == RESOURCE_SECTION) {
            Some(section) => {
                debug!("resource section at {:#x}",
                       section.pointer_to_raw_data);
                Some(ResourceTree::parse(&data, section)?)
            }
            None => None,
        };

        Ok(PeFile {
            data,
            dos,
            coff,
            optional,
            sections,
            resources,
        })
    }

    /// Returns the raw bytes of the file, including any edits.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the DOS header.
    pub fn dos_header(&self) -> &DosHeader {
        &self.dos
    }

    /// Returns the COFF header.
    pub fn coff_header(&self) -> &CoffHeader {
        &self.coff
    }

    /// Returns the optional header.
    pub fn optional_header(&self) -> &OptionalHeader {
        &self.optional
    }

    /// Returns the section table in file order.
    pub fn sections(&self) -> &[SectionHeader] {
        &self.sections
    }

    /// Looks up a section by name.
    pub fn section(&self, name: &str) -> Option<&SectionHeader> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Returns the parsed resource tree, if the file has a `.rsrc` section.
    ///
    /// Offsets in the tree describe the file as loaded; after a replacement
    /// that changed the file length, data past the icon slot has moved.
    pub fn resources(&self) -> Option<&ResourceTree> {
        self.resources.as_ref()
    }

    /// Lists the labels of the top-level resource directories.
    pub fn resource_type_names(&self) -> Vec<String> {
        self.resources
            .as_ref()
            .map(ResourceTree::type_names)
            .unwrap_or_default()
    }

    /// Replaces the primary icon with the image file at `path`.
    pub fn replace_icon<P: AsRef<Path>>(&mut self, path: P)
                                        -> Result<(), PeError> {
        let source = image::open(path.as_ref())?;
        self.replace_icon_with_image(&source)
    }

    /// Replaces the primary icon with `source`.
    ///
    /// The image is fitted to the dimensions recorded in the first entry of
    /// the first icon group, encoded as an `.ico`, zero-padded up to the
    /// slot's recorded size, and spliced over the data of the first icon
    /// resource.  The group header and every resource table stay untouched,
    /// so an oversized icon grows the file without updating any recorded
    /// size or offset.
    pub fn replace_icon_with_image(&mut self, source: &DynamicImage)
                                   -> Result<(), PeError> {
        let (group_entry, icon_entry) = self.primary_icon_entries()?;
        let group = GroupHeader::parse(group_entry.bytes(&self.data)?)?;
        let slot = group.entries
            .first()
            .ok_or(PeError::MissingResource("group icon entry"))?;
        let (width, height) = (slot.info.pixel_width(),
                               slot.info.pixel_height());
        debug!("replacing icon {} ({}x{}, {} bytes) at {:#x}",
               slot.icon_id,
               width,
               height,
               icon_entry.size,
               icon_entry.data_offset);

        let mut ico = icon::render_ico(source, width, height)?;
        let slot_size = slot.info.data_size as usize + HEADER_SIZE +
                        ICON_ENTRY_SIZE;
        if ico.len() < slot_size {
            ico.resize(slot_size, 0);
        } else if ico.len() > slot_size {
            warn!("new icon is {} bytes larger than its slot; the file will \
                   grow",
                  ico.len() - slot_size);
        }
        let header = IconHeader::parse(&ico)?;
        let payload = &ico[header.total_size()..];

        let start = icon_entry.data_offset;
        let size = icon_entry.size as usize;
        field::check_bounds(&self.data, start, size)?;
        self.data.splice(start..start + size, payload.iter().cloned());
        Ok(())
    }

    /// Rebuilds a standalone `.ico` file from the primary icon.
    pub fn extract_icon(&self) -> Result<Vec<u8>, PeError> {
        let (group_entry, icon_entry) = self.primary_icon_entries()?;
        let mut group = GroupHeader::parse(group_entry.bytes(&self.data)?)?;
        group.entries.truncate(1);
        let payload = icon_entry.bytes(&self.data)?;
        match group.entries.first_mut() {
            Some(entry) => entry.info.data_size = payload.len() as u32,
            None => return Err(PeError::MissingResource("group icon entry")),
        }
        let mut out = IconHeader::from_group(&group).to_bytes()?;
        out.extend_from_slice(payload);
        Ok(out)
    }

    /// Writes the (possibly edited) file to `path`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), PeError> {
        let path = path.as_ref();
        debug!("writing {} bytes to {}", self.data.len(), path.display());
        fs::write(path, &self.data)?;
        Ok(())
    }

    fn primary_icon_entries(&self)
                            -> Result<(ResourceDataEntry, ResourceDataEntry),
                                      PeError> {
        let tree = self.resources
            .as_ref()
            .ok_or_else(|| {
                PeError::MissingSection(RESOURCE_SECTION.to_string())
            })?;
        let group_dir = tree.directory_by_type(ResourceType::GroupIcon)
            .ok_or(PeError::MissingResource("group icon directory"))?;
        let group_entry = tree.first_data_entry(group_dir)
            .ok_or(PeError::MissingResource("group icon data"))?;
        let icon_dir = tree.directory_by_type(ResourceType::Icon)
            .ok_or(PeError::MissingResource("icon directory"))?;
        let icon_entry = tree.first_data_entry(icon_dir)
            .ok_or(PeError::MissingResource("icon data"))?;
        Ok((group_entry.clone(), icon_entry.clone()))
    }
}
