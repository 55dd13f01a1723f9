//! DOS, COFF, optional and section headers.

use super::field::{self, Field};
use super::PeError;

/// `MZ`
pub const DOS_SIGNATURE: u16 = 0x5A4D;

/// `PE\0\0`
pub const PE_SIGNATURE: u32 = 0x0000_4550;

/// Optional header magic of 32-bit images.
pub const PE32_MAGIC: u16 = 0x10b;

/// Optional header magic of 64-bit images.
pub const PE32_PLUS_MAGIC: u16 = 0x20b;

/// Index of the resource table in the data directory array.
pub const RESOURCE_DIRECTORY_INDEX: usize = 2;

/// Size of one section table entry.
pub const SECTION_HEADER_SIZE: usize = 40;

const DOS_LAYOUT: [Field; 17] = [
    Field::new("e_magic", 0, 2),
    Field::new("e_cblp", 2, 2),
    Field::new("e_cp", 4, 2),
    Field::new("e_crlc", 6, 2),
    Field::new("e_cparhdr", 8, 2),
    Field::new("e_minalloc", 10, 2),
    Field::new("e_maxalloc", 12, 2),
    Field::new("e_ss", 14, 2),
    Field::new("e_sp", 16, 2),
    Field::new("e_csum", 18, 2),
    Field::new("e_ip", 20, 2),
    Field::new("e_cs", 22, 2),
    Field::new("e_lfarlc", 24, 2),
    Field::new("e_ovno", 26, 2),
    Field::new("e_oemid", 36, 2),
    Field::new("e_oeminfo", 38, 2),
    Field::new("e_lfanew", 60, 4),
];

/// The MS-DOS stub header at the start of every image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DosHeader {
    /// File offset of the `PE\0\0` signature.
    pub pe_header_offset: u32,
}

impl DosHeader {
    /// Size of the DOS header.
    pub const SIZE: usize = 64;

    /// Parses the DOS header, checking the `MZ` signature.
    pub fn parse(data: &[u8]) -> Result<DosHeader, PeError> {
        if data.len() < DosHeader::SIZE ||
           field::read_u16(data, 0)? != DOS_SIGNATURE {
            return Err(PeError::InvalidSignature);
        }
        Ok(DosHeader { pe_header_offset: field::read_u32(data, 0x3C)? })
    }

    /// Returns the field descriptor with the given name.
    pub fn field(&self, name: &str) -> Option<Field> {
        field::find(&DOS_LAYOUT, name)
    }
}

const COFF_LAYOUT: [Field; 7] = [
    Field::new("Machine", 0, 2),
    Field::new("NumberOfSections", 2, 2),
    Field::new("TimeDateStamp", 4, 4),
    Field::new("PointerToSymbolTable", 8, 4),
    Field::new("NumberOfSymbols", 12, 4),
    Field::new("SizeOfOptionalHeader", 16, 2),
    Field::new("Characteristics", 18, 2),
];

/// The COFF file header that follows the PE signature.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoffHeader {
    /// File offset of the header (just past the PE signature).
    pub offset: usize,
    /// Target machine type.
    pub machine: u16,
    /// Number of section table entries.
    pub number_of_sections: u16,
    /// Link time, in seconds since the Unix epoch.
    pub time_date_stamp: u32,
    /// Size of the optional header that follows.
    pub size_of_optional_header: u16,
    /// `IMAGE_FILE_*` flags.
    pub characteristics: u16,
}

impl CoffHeader {
    /// Size of the COFF header.
    pub const SIZE: usize = 20;

    /// Checks the PE signature at `signature_offset` and parses the COFF
    /// header after it.
    pub fn parse(data: &[u8], signature_offset: usize)
                 -> Result<CoffHeader, PeError> {
        if field::read_u32(data, signature_offset)
            .map_err(|_| PeError::InvalidPeSignature)? != PE_SIGNATURE {
            return Err(PeError::InvalidPeSignature);
        }
        let offset = signature_offset + 4;
        field::check_bounds(data, offset, CoffHeader::SIZE)?;
        let read = |index: usize| COFF_LAYOUT[index].at(offset).read(data);
        Ok(CoffHeader {
            offset,
            machine: read(0)? as u16,
            number_of_sections: read(1)? as u16,
            time_date_stamp: read(2)? as u32,
            size_of_optional_header: read(5)? as u16,
            characteristics: read(6)? as u16,
        })
    }

    /// Returns the absolute field descriptor with the given name.
    pub fn field(&self, name: &str) -> Option<Field> {
        field::find(&COFF_LAYOUT, name).map(|f| f.at(self.offset))
    }

    /// Returns the symbolic name of the machine type.
    pub fn machine_name(&self) -> &'static str {
        machine_name(self.machine)
    }

    /// Returns the symbolic names of the set characteristic flags.
    pub fn characteristic_names(&self) -> Vec<&'static str> {
        flag_names(self.characteristics as u32, &FILE_CHARACTERISTICS)
    }
}

const PE32_LAYOUT: [Field; 30] = [
    Field::new("Magic", 0, 2),
    Field::new("MajorLinkerVersion", 2, 1),
    Field::new("MinorLinkerVersion", 3, 1),
    Field::new("SizeOfCode", 4, 4),
    Field::new("SizeOfInitializedData", 8, 4),
    Field::new("SizeOfUninitializedData", 12, 4),
    Field::new("AddressOfEntryPoint", 16, 4),
    Field::new("BaseOfCode", 20, 4),
    Field::new("BaseOfData", 24, 4),
    Field::new("ImageBase", 28, 4),
    Field::new("SectionAlignment", 32, 4),
    Field::new("FileAlignment", 36, 4),
    Field::new("MajorOperatingSystemVersion", 40, 2),
    Field::new("MinorOperatingSystemVersion", 42, 2),
    Field::new("MajorImageVersion", 44, 2),
    Field::new("MinorImageVersion", 46, 2),
    Field::new("MajorSubsystemVersion", 48, 2),
    Field::new("MinorSubsystemVersion", 50, 2),
    Field::new("Win32VersionValue", 52, 4),
    Field::new("SizeOfImage", 56, 4),
    Field::new("SizeOfHeaders", 60, 4),
    Field::new("CheckSum", 64, 4),
    Field::new("Subsystem", 68, 2),
    Field::new("DllCharacteristics", 70, 2),
    Field::new("SizeOfStackReserve", 72, 4),
    Field::new("SizeOfStackCommit", 76, 4),
    Field::new("SizeOfHeapReserve", 80, 4),
    Field::new("SizeOfHeapCommit", 84, 4),
    Field::new("LoaderFlags", 88, 4),
    Field::new("NumberOfRvaAndSizes", 92, 4),
];

const PE32_PLUS_LAYOUT: [Field; 29] = [
    Field::new("Magic", 0, 2),
    Field::new("MajorLinkerVersion", 2, 1),
    Field::new("MinorLinkerVersion", 3, 1),
    Field::new("SizeOfCode", 4, 4),
    Field::new("SizeOfInitializedData", 8, 4),
    Field::new("SizeOfUninitializedData", 12, 4),
    Field::new("AddressOfEntryPoint", 16, 4),
    Field::new("BaseOfCode", 20, 4),
    Field::new("ImageBase", 24, 8),
    Field::new("SectionAlignment", 32, 4),
    Field::new("FileAlignment", 36, 4),
    Field::new("MajorOperatingSystemVersion", 40, 2),
    Field::new("MinorOperatingSystemVersion", 42, 2),
    Field::new("MajorImageVersion", 44, 2),
    Field::new("MinorImageVersion", 46, 2),
    Field::new("MajorSubsystemVersion", 48, 2),
    Field::new("MinorSubsystemVersion", 50, 2),
    Field::new("Win32VersionValue", 52, 4),
    Field::new("SizeOfImage", 56, 4),
    Field::new("SizeOfHeaders", 60, 4),
    Field::new("CheckSum", 64, 4),
    Field::new("Subsystem", 68, 2),
    Field::new("DllCharacteristics", 70, 2),
    Field::new("SizeOfStackReserve", 72, 8),
    Field::new("SizeOfStackCommit", 80, 8),
    Field::new("SizeOfHeapReserve", 88, 8),
    Field::new("SizeOfHeapCommit", 96, 8),
    Field::new("LoaderFlags", 104, 4),
    Field::new("NumberOfRvaAndSizes", 108, 4),
];

const DATA_DIRECTORY_NAMES: [&str; 16] = [
    "Export",
    "Import",
    "Resource",
    "Exception",
    "Certificate",
    "BaseRelocation",
    "Debug",
    "Architecture",
    "GlobalPtr",
    "TLS",
    "LoadConfig",
    "BoundImport",
    "IAT",
    "DelayImport",
    "CLRRuntime",
    "Reserved",
];

/// Which optional header layout an image uses.  The magic number selects
/// the whole layout: several fields widen from 4 to 8 bytes in PE32+.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OptionalHeaderKind {
    /// 32-bit layout, magic `0x10b`.
    Pe32,
    /// 64-bit layout, magic `0x20b`.
    Pe32Plus,
}

impl OptionalHeaderKind {
    /// Resolves the layout for a magic number.
    pub fn from_magic(magic: u16) -> Result<OptionalHeaderKind, PeError> {
        match magic {
            PE32_MAGIC => Ok(OptionalHeaderKind::Pe32),
            PE32_PLUS_MAGIC => Ok(OptionalHeaderKind::Pe32Plus),
            other => Err(PeError::InvalidOptionalMagic(other)),
        }
    }

    /// Returns the field table for this layout.
    pub fn layout(self) -> &'static [Field] {
        match self {
            OptionalHeaderKind::Pe32 => &PE32_LAYOUT,
            OptionalHeaderKind::Pe32Plus => &PE32_PLUS_LAYOUT,
        }
    }

    /// Returns the offset of the data directory array within the header.
    pub fn data_directory_offset(self) -> usize {
        match self {
            OptionalHeaderKind::Pe32 => 96,
            OptionalHeaderKind::Pe32Plus => 112,
        }
    }
}

/// One `(VirtualAddress, Size)` pair of the data directory array.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataDirectory {
    /// Symbolic name of the table.
    pub name: &'static str,
    /// RVA of the table.
    pub virtual_address: u32,
    /// Size of the table in bytes.
    pub size: u32,
}

/// The optional header, in either of its two layouts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionalHeader {
    /// File offset of the header.
    pub offset: usize,
    /// Layout selected by the magic number.
    pub kind: OptionalHeaderKind,
    /// Preferred load address.
    pub image_base: u64,
    /// Entry point RVA.
    pub address_of_entry_point: u32,
    /// Size of the loaded image.
    pub size_of_image: u32,
    /// `IMAGE_SUBSYSTEM_*` value.
    pub subsystem: u16,
    /// `IMAGE_DLLCHARACTERISTICS_*` flags.
    pub dll_characteristics: u16,
    /// Data directory entries present in the header.
    pub data_directories: Vec<DataDirectory>,
}

impl OptionalHeader {
    /// Parses the optional header at `offset`.
    pub fn parse(data: &[u8], offset: usize) -> Result<OptionalHeader, PeError> {
        let kind = OptionalHeaderKind::from_magic(field::read_u16(data,
                                                                  offset)?)?;
        let read = |name: &str| -> Result<u64, PeError> {
            match field::find(kind.layout(), name) {
                Some(f) => f.at(offset).read(data),
                None => Ok(0),
            }
        };
        let rva_count = (read("NumberOfRvaAndSizes")? as usize)
            .min(DATA_DIRECTORY_NAMES.len());
        let mut data_directories = Vec::with_capacity(rva_count);
        let mut entry = offset + kind.data_directory_offset();
        for name in DATA_DIRECTORY_NAMES.iter().take(rva_count) {
            data_directories.push(DataDirectory {
                name: *name,
                virtual_address: field::read_u32(data, entry)?,
                size: field::read_u32(data, entry + 4)?,
            });
            entry += 8;
        }
        Ok(OptionalHeader {
            offset,
            kind,
            image_base: read("ImageBase")?,
            address_of_entry_point: read("AddressOfEntryPoint")? as u32,
            size_of_image: read("SizeOfImage")? as u32,
            subsystem: read("Subsystem")? as u16,
            dll_characteristics: read("DllCharacteristics")? as u16,
            data_directories,
        })
    }

    /// Returns the absolute field descriptor with the given name.
    pub fn field(&self, name: &str) -> Option<Field> {
        field::find(self.kind.layout(), name).map(|f| f.at(self.offset))
    }

    /// Returns the resource table directory entry, if present.
    pub fn resource_directory(&self) -> Option<&DataDirectory> {
        self.data_directories.get(RESOURCE_DIRECTORY_INDEX)
    }

    /// Returns the symbolic name of the subsystem.
    pub fn subsystem_name(&self) -> &'static str {
        subsystem_name(self.subsystem)
    }

    /// Returns the symbolic names of the set DLL characteristic flags.
    pub fn dll_characteristic_names(&self) -> Vec<&'static str> {
        flag_names(self.dll_characteristics as u32, &DLL_CHARACTERISTICS)
    }
}

const SECTION_LAYOUT: [Field; 9] = [
    Field::new("VirtualSize", 8, 4),
    Field::new("VirtualAddress", 12, 4),
    Field::new("SizeOfRawData", 16, 4),
    Field::new("PointerToRawData", 20, 4),
    Field::new("PointerToRelocations", 24, 4),
    Field::new("PointerToLineNumbers", 28, 4),
    Field::new("NumberOfRelocations", 32, 2),
    Field::new("NumberOfLineNumbers", 34, 2),
    Field::new("Characteristics", 36, 4),
];

/// One entry of the section table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SectionHeader {
    /// File offset of the entry.
    pub offset: usize,
    /// Section name with NUL padding removed.
    pub name: String,
    /// Size of the section once loaded.
    pub virtual_size: u32,
    /// RVA of the section once loaded.
    pub virtual_address: u32,
    /// Size of the section's data in the file.
    pub size_of_raw_data: u32,
    /// File offset of the section's data.
    pub pointer_to_raw_data: u32,
    /// File offset of the COFF relocation entries.
    pub pointer_to_relocations: u32,
    /// File offset of the COFF line number entries.
    pub pointer_to_line_numbers: u32,
    /// `IMAGE_SCN_*` flags.
    pub characteristics: u32,
}

impl SectionHeader {
    /// Parses the section table entry at `offset`.
    pub fn parse(data: &[u8], offset: usize) -> Result<SectionHeader, PeError> {
        field::check_bounds(data, offset, SECTION_HEADER_SIZE)?;
        let raw_name = &data[offset..offset + 8];
        let name_len = raw_name.iter().position(|&b| b == 0).unwrap_or(8);
        let name = String::from_utf8_lossy(&raw_name[..name_len]).into_owned();
        let read = |index: usize| -> Result<u32, PeError> {
            Ok(SECTION_LAYOUT[index].at(offset).read(data)? as u32)
        };
        Ok(SectionHeader {
            offset,
            name,
            virtual_size: read(0)?,
            virtual_address: read(1)?,
            size_of_raw_data: read(2)?,
            pointer_to_raw_data: read(3)?,
            pointer_to_relocations: read(4)?,
            pointer_to_line_numbers: read(5)?,
            characteristics: read(8)?,
        })
    }

    /// Returns the absolute field descriptor with the given name.
    pub fn field(&self, name: &str) -> Option<Field> {
        field::find(&SECTION_LAYOUT, name).map(|f| f.at(self.offset))
    }

    /// Converts an RVA inside this section to a file offset.
    pub fn rva_to_offset(&self, rva: u32) -> usize {
        (rva as usize + self.pointer_to_raw_data as usize)
            .saturating_sub(self.virtual_address as usize)
    }

    /// Returns the symbolic names of the set section flags.
    pub fn characteristic_names(&self) -> Vec<&'static str> {
        let mut names = flag_names(self.characteristics & !SECTION_ALIGN_MASK,
                                   &SECTION_CHARACTERISTICS);
        let align = (self.characteristics & SECTION_ALIGN_MASK) >> 20;
        if align != 0 && (align as usize) <= SECTION_ALIGNMENTS.len() {
            names.push(SECTION_ALIGNMENTS[align as usize - 1]);
        }
        names
    }
}

fn flag_names(value: u32, table: &[(u32, &'static str)]) -> Vec<&'static str> {
    table.iter()
        .filter(|&&(flag, _)| value & flag == flag)
        .map(|&(_, name)| name)
        .collect()
}

/// Returns the symbolic name of a COFF machine type.
pub fn machine_name(machine: u16) -> &'static str {
    match machine {
        0x0000 => "IMAGE_FILE_MACHINE_UNKNOWN",
        0x014c => "IMAGE_FILE_MACHINE_I386",
        0x0162 => "IMAGE_FILE_MACHINE_R3000",
        0x0166 => "IMAGE_FILE_MACHINE_R4000",
        0x0168 => "IMAGE_FILE_MACHINE_R10000",
        0x0169 => "IMAGE_FILE_MACHINE_WCEMIPSV2",
        0x0184 => "IMAGE_FILE_MACHINE_ALPHA",
        0x01a2 => "IMAGE_FILE_MACHINE_SH3",
        0x01a3 => "IMAGE_FILE_MACHINE_SH3DSP",
        0x01a4 => "IMAGE_FILE_MACHINE_SH3E",
        0x01a6 => "IMAGE_FILE_MACHINE_SH4",
        0x01a8 => "IMAGE_FILE_MACHINE_SH5",
        0x01c0 => "IMAGE_FILE_MACHINE_ARM",
        0x01c2 => "IMAGE_FILE_MACHINE_THUMB",
        0x01c4 => "IMAGE_FILE_MACHINE_ARMNT",
        0x01d3 => "IMAGE_FILE_MACHINE_AM33",
        0x01f0 => "IMAGE_FILE_MACHINE_POWERPC",
        0x01f1 => "IMAGE_FILE_MACHINE_POWERPCFP",
        0x0200 => "IMAGE_FILE_MACHINE_IA64",
        0x0266 => "IMAGE_FILE_MACHINE_MIPS16",
        0x0284 => "IMAGE_FILE_MACHINE_ALPHA64",
        0x0366 => "IMAGE_FILE_MACHINE_MIPSFPU",
        0x0466 => "IMAGE_FILE_MACHINE_MIPSFPU16",
        0x0520 => "IMAGE_FILE_MACHINE_TRICORE",
        0x0cef => "IMAGE_FILE_MACHINE_CEF",
        0x0ebc => "IMAGE_FILE_MACHINE_EBC",
        0x8664 => "IMAGE_FILE_MACHINE_AMD64",
        0x9041 => "IMAGE_FILE_MACHINE_M32R",
        0xaa64 => "IMAGE_FILE_MACHINE_ARM64",
        0xc0ee => "IMAGE_FILE_MACHINE_CEE",
        _ => "IMAGE_FILE_MACHINE_UNRECOGNIZED",
    }
}

/// Returns the symbolic name of an optional header subsystem value.
pub fn subsystem_name(subsystem: u16) -> &'static str {
    match subsystem {
        0 => "IMAGE_SUBSYSTEM_UNKNOWN",
        1 => "IMAGE_SUBSYSTEM_NATIVE",
        2 => "IMAGE_SUBSYSTEM_WINDOWS_GUI",
        3 => "IMAGE_SUBSYSTEM_WINDOWS_CUI",
        5 => "IMAGE_SUBSYSTEM_OS2_CUI",
        7 => "IMAGE_SUBSYSTEM_POSIX_CUI",
        8 => "IMAGE_SUBSYSTEM_NATIVE_WINDOWS",
        9 => "IMAGE_SUBSYSTEM_WINDOWS_CE_GUI",
        10 => "IMAGE_SUBSYSTEM_EFI_APPLICATION",
        11 => "IMAGE_SUBSYSTEM_EFI_BOOT_SERVICE_DRIVER",
        12 => "IMAGE_SUBSYSTEM_EFI_RUNTIME_DRIVER",
        13 => "IMAGE_SUBSYSTEM_EFI_ROM",
        14 => "IMAGE_SUBSYSTEM_XBOX",
        16 => "IMAGE_SUBSYSTEM_WINDOWS_BOOT_APPLICATION",
        _ => "IMAGE_SUBSYSTEM_UNRECOGNIZED",
    }
}

const FILE_CHARACTERISTICS: [(u32, &str); 16] = [
    (0x0001, "IMAGE_FILE_RELOCS_STRIPPED"),
    (0x0002, "IMAGE_FILE_EXECUTABLE_IMAGE"),
    (0x0004, "IMAGE_FILE_LINE_NUMS_STRIPPED"),
    (0x0008, "IMAGE_FILE_LOCAL_SYMS_STRIPPED"),
    (0x0010, "IMAGE_FILE_AGGRESIVE_WS_TRIM"),
    (0x0020, "IMAGE_FILE_LARGE_ADDRESS_AWARE"),
    (0x0040, "IMAGE_FILE_16BIT_MACHINE"),
    (0x0080, "IMAGE_FILE_BYTES_REVERSED_LO"),
    (0x0100, "IMAGE_FILE_32BIT_MACHINE"),
    (0x0200, "IMAGE_FILE_DEBUG_STRIPPED"),
    (0x0400, "IMAGE_FILE_REMOVABLE_RUN_FROM_SWAP"),
    (0x0800, "IMAGE_FILE_NET_RUN_FROM_SWAP"),
    (0x1000, "IMAGE_FILE_SYSTEM"),
    (0x2000, "IMAGE_FILE_DLL"),
    (0x4000, "IMAGE_FILE_UP_SYSTEM_ONLY"),
    (0x8000, "IMAGE_FILE_BYTES_REVERSED_HI"),
];

const DLL_CHARACTERISTICS: [(u32, &str); 11] = [
    (0x0020, "IMAGE_DLLCHARACTERISTICS_HIGH_ENTROPY_VA"),
    (0x0040, "IMAGE_DLLCHARACTERISTICS_DYNAMIC_BASE"),
    (0x0080, "IMAGE_DLLCHARACTERISTICS_FORCE_INTEGRITY"),
    (0x0100, "IMAGE_DLLCHARACTERISTICS_NX_COMPAT"),
    (0x0200, "IMAGE_DLLCHARACTERISTICS_NO_ISOLATION"),
    (0x0400, "IMAGE_DLLCHARACTERISTICS_NO_SEH"),
    (0x0800, "IMAGE_DLLCHARACTERISTICS_NO_BIND"),
    (0x1000, "IMAGE_DLLCHARACTERISTICS_APPCONTAINER"),
    (0x2000, "IMAGE_DLLCHARACTERISTICS_WDM_DRIVER"),
    (0x4000, "IMAGE_DLLCHARACTERISTICS_GUARD_CF"),
    (0x8000, "IMAGE_DLLCHARACTERISTICS_TERMINAL_SERVER_AWARE"),
];

const SECTION_ALIGN_MASK: u32 = 0x00F0_0000;

const SECTION_ALIGNMENTS: [&str; 14] = [
    "IMAGE_SCN_ALIGN_1BYTES",
    "IMAGE_SCN_ALIGN_2BYTES",
    "IMAGE_SCN_ALIGN_4BYTES",
    "IMAGE_SCN_ALIGN_8BYTES",
    "IMAGE_SCN_ALIGN_16BYTES",
    "IMAGE_SCN_ALIGN_32BYTES",
    "IMAGE_SCN_ALIGN_64BYTES",
    "IMAGE_SCN_ALIGN_128BYTES",
    "IMAGE_SCN_ALIGN_256BYTES",
    "IMAGE_SCN_ALIGN_512BYTES",
    "IMAGE_SCN_ALIGN_1024BYTES",
    "IMAGE_SCN_ALIGN_2048BYTES",
    "IMAGE_SCN_ALIGN_4096BYTES",
    "IMAGE_SCN_ALIGN_8192BYTES",
];

const SECTION_CHARACTERISTICS: [(u32, &str); 22] = [
    (0x0000_0008, "IMAGE_SCN_TYPE_NO_PAD"),
    (0x0000_0020, "IMAGE_SCN_CNT_CODE"),
    (0x0000_0040, "IMAGE_SCN_CNT_INITIALIZED_DATA"),
    (0x0000_0080, "IMAGE_SCN_CNT_UNINITIALIZED_DATA"),
    (0x0000_0100, "IMAGE_SCN_LNK_OTHER"),
    (0x0000_0200, "IMAGE_SCN_LNK_INFO"),
    (0x0000_0800, "IMAGE_SCN_LNK_REMOVE"),
    (0x0000_1000, "IMAGE_SCN_LNK_COMDAT"),
    (0x0000_4000, "IMAGE_SCN_NO_DEFER_SPEC_EXC"),
    (0x0000_8000, "IMAGE_SCN_GPREL"),
    (0x0002_0000, "IMAGE_SCN_MEM_PURGEABLE"),
    (0x0004_0000, "IMAGE_SCN_MEM_LOCKED"),
    (0x0008_0000, "IMAGE_SCN_MEM_PRELOAD"),
    (0x0100_0000, "IMAGE_SCN_LNK_NRELOC_OVFL"),
    (0x0200_0000, "IMAGE_SCN_MEM_DISCARDABLE"),
    (0x0400_0000, "IMAGE_SCN_MEM_NOT_CACHED"),
    (0x0800_0000, "IMAGE_SCN_MEM_NOT_PAGED"),
    (0x1000_0000, "IMAGE_SCN_MEM_SHARED"),
    (0x2000_0000, "IMAGE_SCN_MEM_EXECUTE"),
    (0x4000_0000, "IMAGE_SCN_MEM_READ"),
    (0x8000_0000, "IMAGE_SCN_MEM_WRITE"),
    (0x0001_0000, "IMAGE_SCN_MEM_SYSHEAP"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dos_header_requires_mz() {
        let mut data = vec![0u8; 64];
        assert!(matches!(DosHeader::parse(&data),
                         Err(PeError::InvalidSignature)));
        data[0] = b'M';
        data[1] = b'Z';
        data[0x3C] = 0x80;
        assert_eq!(DosHeader::parse(&data).unwrap().pe_header_offset, 0x80);
        assert!(matches!(DosHeader::parse(&data[..10]),
                         Err(PeError::InvalidSignature)));
    }

    #[test]
    fn coff_header_requires_pe_signature() {
        let mut data = vec![0u8; 32];
        assert!(matches!(CoffHeader::parse(&data, 0),
                         Err(PeError::InvalidPeSignature)));
        data[..4].copy_from_slice(b"PE\0\0");
        data[4] = 0x64;
        data[5] = 0x86;
        data[6] = 3;
        data[22] = 0x22;
        let coff = CoffHeader::parse(&data, 0).unwrap();
        assert_eq!(coff.machine_name(), "IMAGE_FILE_MACHINE_AMD64");
        assert_eq!(coff.number_of_sections, 3);
        assert_eq!(coff.characteristic_names(),
                   vec!["IMAGE_FILE_EXECUTABLE_IMAGE",
                        "IMAGE_FILE_LARGE_ADDRESS_AWARE"]);
        assert_eq!(coff.field("Characteristics").unwrap().offset, 22);
    }

    #[test]
    fn optional_magic_selects_layout() {
        assert!(matches!(OptionalHeaderKind::from_magic(0x10b),
                         Ok(OptionalHeaderKind::Pe32)));
        assert!(matches!(OptionalHeaderKind::from_magic(0x20b),
                         Ok(OptionalHeaderKind::Pe32Plus)));
        assert!(matches!(OptionalHeaderKind::from_magic(0x107),
                         Err(PeError::InvalidOptionalMagic(0x107))));
        let pe32 = OptionalHeaderKind::Pe32.layout();
        let plus = OptionalHeaderKind::Pe32Plus.layout();
        assert_eq!(field::find(pe32, "ImageBase"),
                   Some(Field::new("ImageBase", 28, 4)));
        assert_eq!(field::find(plus, "ImageBase"),
                   Some(Field::new("ImageBase", 24, 8)));
        assert_eq!(field::find(plus, "BaseOfData"), None);
        assert_eq!(field::find(plus, "NumberOfRvaAndSizes").unwrap().offset,
                   108);
    }

    #[test]
    fn parse_pe32_plus_optional_header() {
        let mut data = vec![0u8; 112 + 16 * 8];
        data[0] = 0x0b;
        data[1] = 0x02;
        data[24..32].copy_from_slice(&0x1_4000_0000u64.to_le_bytes());
        data[68] = 2;
        data[108] = 16;
        let resource = 112 + 2 * 8;
        data[resource..resource + 4].copy_from_slice(&0x3000u32.to_le_bytes());
        data[resource + 4..resource + 8].copy_from_slice(&0x200u32
            .to_le_bytes());
        let header = OptionalHeader::parse(&data, 0).unwrap();
        assert_eq!(header.kind, OptionalHeaderKind::Pe32Plus);
        assert_eq!(header.image_base, 0x1_4000_0000);
        assert_eq!(header.subsystem_name(), "IMAGE_SUBSYSTEM_WINDOWS_GUI");
        let directory = header.resource_directory().unwrap();
        assert_eq!(directory.name, "Resource");
        assert_eq!((directory.virtual_address, directory.size),
                   (0x3000, 0x200));
    }

    #[test]
    fn section_header_names_and_flags() {
        let mut data = vec![0u8; 40];
        data[..5].copy_from_slice(b".rsrc");
        data[12..16].copy_from_slice(&0x2000u32.to_le_bytes());
        data[20..24].copy_from_slice(&0x400u32.to_le_bytes());
        data[36..40].copy_from_slice(&0x4030_0040u32.to_le_bytes());
        let section = SectionHeader::parse(&data, 0).unwrap();
        assert_eq!(section.name, ".rsrc");
        assert_eq!(section.rva_to_offset(0x2010), 0x410);
        assert_eq!(section.characteristic_names(),
                   vec!["IMAGE_SCN_CNT_INITIALIZED_DATA",
                        "IMAGE_SCN_MEM_READ",
                        "IMAGE_SCN_ALIGN_4BYTES"]);
    }
}
