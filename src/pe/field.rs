//! Little-endian integer fields addressed by offset into the file buffer.
//!
//! Header structures keep their absolute offset and a static table of
//! [`Field`] layouts; a field is read or rewritten by rebasing its layout
//! onto that offset.

use byteorder::{ByteOrder, LittleEndian};

use super::PeError;

/// A named integer field of 1 to 8 bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
    /// Symbolic field name, as in the PE/COFF documentation.
    pub name: &'static str,
    /// Byte offset, relative to the owning structure until rebased.
    pub offset: usize,
    /// Field width in bytes.
    pub size: usize,
}

impl Field {
    /// Describes a field at `offset` with the given width.
    pub const fn new(name: &'static str, offset: usize, size: usize) -> Field {
        Field { name, offset, size }
    }

    /// Returns this field moved forward by `base` bytes.
    pub fn at(self, base: usize) -> Field {
        Field { offset: base + self.offset, ..self }
    }

    /// Returns the offset one past the field's last byte.
    pub fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Returns the raw bytes of the field.
    pub fn bytes<'a>(&self, data: &'a [u8]) -> Result<&'a [u8], PeError> {
        check_bounds(data, self.offset, self.size)?;
        Ok(&data[self.offset..self.end()])
    }

    /// Reads the field as an unsigned integer.
    pub fn read(&self, data: &[u8]) -> Result<u64, PeError> {
        Ok(LittleEndian::read_uint(self.bytes(data)?, self.size))
    }

    /// Overwrites the field in place.  Fails if `value` does not fit in the
    /// field's width.
    pub fn write(&self, data: &mut [u8], value: u64) -> Result<(), PeError> {
        if self.size < 8 && value >> (self.size * 8) != 0 {
            return Err(PeError::FieldOverflow {
                name: self.name,
                value,
                size: self.size,
            });
        }
        check_bounds(data, self.offset, self.size)?;
        LittleEndian::write_uint(&mut data[self.offset..self.end()],
                                 value,
                                 self.size);
        Ok(())
    }
}

/// Finds a field by name in a layout table.
pub fn find(layout: &[Field], name: &str) -> Option<Field> {
    layout.iter().find(|field| field.name == name).cloned()
}

/// Fails with `OutOfBounds` unless `data[offset..offset + size]` exists.
pub fn check_bounds(data: &[u8], offset: usize, size: usize)
                    -> Result<(), PeError> {
    match offset.checked_add(size) {
        Some(end) if end <= data.len() => Ok(()),
        _ => Err(PeError::OutOfBounds { offset, size, len: data.len() }),
    }
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16, PeError> {
    check_bounds(data, offset, 2)?;
    Ok(LittleEndian::read_u16(&data[offset..]))
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> Result<u32, PeError> {
    check_bounds(data, offset, 4)?;
    Ok(LittleEndian::read_u32(&data[offset..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_little_endian_widths() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
        assert_eq!(Field::new("a", 0, 1).read(&data).unwrap(), 0x01);
        assert_eq!(Field::new("b", 1, 2).read(&data).unwrap(), 0x0302);
        assert_eq!(Field::new("c", 0, 4).read(&data).unwrap(), 0x04030201);
        assert_eq!(Field::new("d", 1, 8).read(&data).unwrap(),
                   0x0908070605040302);
    }

    #[test]
    fn rebased_field() {
        let field = Field::new("Size", 4, 4).at(16);
        assert_eq!(field.offset, 20);
        assert_eq!(field.end(), 24);
    }

    #[test]
    fn write_in_place() {
        let mut data = vec![0u8; 6];
        Field::new("x", 2, 2).write(&mut data, 0xBEEF).unwrap();
        assert_eq!(data, vec![0, 0, 0xEF, 0xBE, 0, 0]);
    }

    #[test]
    fn write_rejects_wide_values() {
        let mut data = vec![0u8; 4];
        let err = Field::new("x", 0, 2).write(&mut data, 0x10000).unwrap_err();
        match err {
            PeError::FieldOverflow { name, size, .. } => {
                assert_eq!(name, "x");
                assert_eq!(size, 2);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(data, vec![0u8; 4]);
    }

    #[test]
    fn out_of_bounds() {
        let data = [0u8; 3];
        assert!(Field::new("x", 2, 2).read(&data).is_err());
        assert!(read_u32(&data, 0).is_err());
        assert!(check_bounds(&data, usize::max_value(), 2).is_err());
    }

    #[test]
    fn find_by_name() {
        const LAYOUT: [Field; 2] = [Field::new("A", 0, 2), Field::new("B", 2, 4)];
        assert_eq!(find(&LAYOUT, "B"), Some(Field::new("B", 2, 4)));
        assert_eq!(find(&LAYOUT, "C"), None);
    }
}
