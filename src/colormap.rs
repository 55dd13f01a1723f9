//! The fixed palettes used by the classic 4-bit and 8-bit icon types.

/// Palette for 4-bit indexed icons (`icm4`, `ics4`, `icl4`, `ich4`).
pub const COLORMAP_4: [[u8; 3]; 16] = [
    [0xFF, 0xFF, 0xFF], [0xFC, 0xF3, 0x05], [0xFF, 0x64, 0x02],
    [0xDD, 0x08, 0x06], [0xF2, 0x08, 0x84], [0x46, 0x00, 0xA5],
    [0x00, 0x00, 0xD4], [0x02, 0xAB, 0xEA], [0x1F, 0xB7, 0x14],
    [0x00, 0x64, 0x11], [0x56, 0x2C, 0x05], [0x90, 0x71, 0x3A],
    [0xC0, 0xC0, 0xC0], [0x80, 0x80, 0x80], [0x40, 0x40, 0x40],
    [0x00, 0x00, 0x00],
];

/// Palette for 8-bit indexed icons (`icm8`, `ics8`, `icl8`, `ich8`).  The
/// first 215 entries walk a 6x6x6 color cube, followed by red, green, blue and
/// gray ramps, and black.
pub const COLORMAP_8: [[u8; 3]; 256] = [
    [0xFF, 0xFF, 0xFF], [0xFF, 0xFF, 0xCC], [0xFF, 0xFF, 0x99],
    [0xFF, 0xFF, 0x66], [0xFF, 0xFF, 0x33], [0xFF, 0xFF, 0x00],
    [0xFF, 0xCC, 0xFF], [0xFF, 0xCC, 0xCC], [0xFF, 0xCC, 0x99],
    [0xFF, 0xCC, 0x66], [0xFF, 0xCC, 0x33], [0xFF, 0xCC, 0x00],
    [0xFF, 0x99, 0xFF], [0xFF, 0x99, 0xCC], [0xFF, 0x99, 0x99],
    [0xFF, 0x99, 0x66], [0xFF, 0x99, 0x33], [0xFF, 0x99, 0x00],
    [0xFF, 0x66, 0xFF], [0xFF, 0x66, 0xCC], [0xFF, 0x66, 0x99],
    [0xFF, 0x66, 0x66], [0xFF, 0x66, 0x33], [0xFF, 0x66, 0x00],
    [0xFF, 0x33, 0xFF], [0xFF, 0x33, 0xCC], [0xFF, 0x33, 0x99],
    [0xFF, 0x33, 0x66], [0xFF, 0x33, 0x33], [0xFF, 0x33, 0x00],
    [0xFF, 0x00, 0xFF], [0xFF, 0x00, 0xCC], [0xFF, 0x00, 0x99],
    [0xFF, 0x00, 0x66], [0xFF, 0x00, 0x33], [0xFF, 0x00, 0x00],
    [0xCC, 0xFF, 0xFF], [0xCC, 0xFF, 0xCC], [0xCC, 0xFF, 0x99],
    [0xCC, 0xFF, 0x66], [0xCC, 0xFF, 0x33], [0xCC, 0xFF, 0x00],
    [0xCC, 0xCC, 0xFF], [0xCC, 0xCC, 0xCC], [0xCC, 0xCC, 0x99],
    [0xCC, 0xCC, 0x66], [0xCC, 0xCC, 0x33], [0xCC, 0xCC, 0x00],
    [0xCC, 0x99, 0xFF], [0xCC, 0x99, 0xCC], [0xCC, 0x99, 0x99],
    [0xCC, 0x99, 0x66], [0xCC, 0x99, 0x33], [0xCC, 0x99, 0x00],
    [0xCC, 0x66, 0xFF], [0xCC, 0x66, 0xCC], [0xCC, 0x66, 0x99],
    [0xCC, 0x66, 0x66], [0xCC, 0x66, 0x33], [0xCC, 0x66, 0x00],
    [0xCC, 0x33, 0xFF], [0xCC, 0x33, 0xCC], [0xCC, 0x33, 0x99],
    [0xCC, 0x33, 0x66], [0xCC, 0x33, 0x33], [0xCC, 0x33, 0x00],
    [0xCC, 0x00, 0xFF], [0xCC, 0x00, 0xCC], [0xCC, 0x00, 0x99],
    [0xCC, 0x00, 0x66], [0xCC, 0x00, 0x33], [0xCC, 0x00, 0x00],
    [0x99, 0xFF, 0xFF], [0x99, 0xFF, 0xCC], [0x99, 0xFF, 0x99],
    [0x99, 0xFF, 0x66], [0x99, 0xFF, 0x33], [0x99, 0xFF, 0x00],
    [0x99, 0xCC, 0xFF], [0x99, 0xCC, 0xCC], [0x99, 0xCC, 0x99],
    [0x99, 0xCC, 0x66], [0x99, 0xCC, 0x33], [0x99, 0xCC, 0x00],
    [0x99, 0x99, 0xFF], [0x99, 0x99, 0xCC], [0x99, 0x99, 0x99],
    [0x99, 0x99, 0x66], [0x99, 0x99, 0x33], [0x99, 0x99, 0x00],
    [0x99, 0x66, 0xFF], [0x99, 0x66, 0xCC], [0x99, 0x66, 0x99],
    [0x99, 0x66, 0x66], [0x99, 0x66, 0x33], [0x99, 0x66, 0x00],
    [0x99, 0x33, 0xFF], [0x99, 0x33, 0xCC], [0x99, 0x33, 0x99],
    [0x99, 0x33, 0x66], [0x99, 0x33, 0x33], [0x99, 0x33, 0x00],
    [0x99, 0x00, 0xFF], [0x99, 0x00, 0xCC], [0x99, 0x00, 0x99],
    [0x99, 0x00, 0x66], [0x99, 0x00, 0x33], [0x99, 0x00, 0x00],
    [0x66, 0xFF, 0xFF], [0x66, 0xFF, 0xCC], [0x66, 0xFF, 0x99],
    [0x66, 0xFF, 0x66], [0x66, 0xFF, 0x33], [0x66, 0xFF, 0x00],
    [0x66, 0xCC, 0xFF], [0x66, 0xCC, 0xCC], [0x66, 0xCC, 0x99],
    [0x66, 0xCC, 0x66], [0x66, 0xCC, 0x33], [0x66, 0xCC, 0x00],
    [0x66, 0x99, 0xFF], [0x66, 0x99, 0xCC], [0x66, 0x99, 0x99],
    [0x66, 0x99, 0x66], [0x66, 0x99, 0x33], [0x66, 0x99, 0x00],
    [0x66, 0x66, 0xFF], [0x66, 0x66, 0xCC], [0x66, 0x66, 0x99],
    [0x66, 0x66, 0x66], [0x66, 0x66, 0x33], [0x66, 0x66, 0x00],
    [0x66, 0x33, 0xFF], [0x66, 0x33, 0xCC], [0x66, 0x33, 0x99],
    [0x66, 0x33, 0x66], [0x66, 0x33, 0x33], [0x66, 0x33, 0x00],
    [0x66, 0x00, 0xFF], [0x66, 0x00, 0xCC], [0x66, 0x00, 0x99],
    [0x66, 0x00, 0x66], [0x66, 0x00, 0x33], [0x66, 0x00, 0x00],
    [0x33, 0xFF, 0xFF], [0x33, 0xFF, 0xCC], [0x33, 0xFF, 0x99],
    [0x33, 0xFF, 0x66], [0x33, 0xFF, 0x33], [0x33, 0xFF, 0x00],
    [0x33, 0xCC, 0xFF], [0x33, 0xCC, 0xCC], [0x33, 0xCC, 0x99],
    [0x33, 0xCC, 0x66], [0x33, 0xCC, 0x33], [0x33, 0xCC, 0x00],
    [0x33, 0x99, 0xFF], [0x33, 0x99, 0xCC], [0x33, 0x99, 0x99],
    [0x33, 0x99, 0x66], [0x33, 0x99, 0x33], [0x33, 0x99, 0x00],
    [0x33, 0x66, 0xFF], [0x33, 0x66, 0xCC], [0x33, 0x66, 0x99],
    [0x33, 0x66, 0x66], [0x33, 0x66, 0x33], [0x33, 0x66, 0x00],
    [0x33, 0x33, 0xFF], [0x33, 0x33, 0xCC], [0x33, 0x33, 0x99],
    [0x33, 0x33, 0x66], [0x33, 0x33, 0x33], [0x33, 0x33, 0x00],
    [0x33, 0x00, 0xFF], [0x33, 0x00, 0xCC], [0x33, 0x00, 0x99],
    [0x33, 0x00, 0x66], [0x33, 0x00, 0x33], [0x33, 0x00, 0x00],
    [0x00, 0xFF, 0xFF], [0x00, 0xFF, 0xCC], [0x00, 0xFF, 0x99],
    [0x00, 0xFF, 0x66], [0x00, 0xFF, 0x33], [0x00, 0xFF, 0x00],
    [0x00, 0xCC, 0xFF], [0x00, 0xCC, 0xCC], [0x00, 0xCC, 0x99],
    [0x00, 0xCC, 0x66], [0x00, 0xCC, 0x33], [0x00, 0xCC, 0x00],
    [0x00, 0x99, 0xFF], [0x00, 0x99, 0xCC], [0x00, 0x99, 0x99],
    [0x00, 0x99, 0x66], [0x00, 0x99, 0x33], [0x00, 0x99, 0x00],
    [0x00, 0x66, 0xFF], [0x00, 0x66, 0xCC], [0x00, 0x66, 0x99],
    [0x00, 0x66, 0x66], [0x00, 0x66, 0x33], [0x00, 0x66, 0x00],
    [0x00, 0x33, 0xFF], [0x00, 0x33, 0xCC], [0x00, 0x33, 0x99],
    [0x00, 0x33, 0x66], [0x00, 0x33, 0x33], [0x00, 0x33, 0x00],
    [0x00, 0x00, 0xFF], [0x00, 0x00, 0xCC], [0x00, 0x00, 0x99],
    [0x00, 0x00, 0x66], [0x00, 0x00, 0x33], [0xEE, 0x00, 0x00],
    [0xDD, 0x00, 0x00], [0xBB, 0x00, 0x00], [0xAA, 0x00, 0x00],
    [0x88, 0x00, 0x00], [0x77, 0x00, 0x00], [0x55, 0x00, 0x00],
    [0x44, 0x00, 0x00], [0x22, 0x00, 0x00], [0x11, 0x00, 0x00],
    [0x00, 0xEE, 0x00], [0x00, 0xDD, 0x00], [0x00, 0xBB, 0x00],
    [0x00, 0xAA, 0x00], [0x00, 0x88, 0x00], [0x00, 0x77, 0x00],
    [0x00, 0x55, 0x00], [0x00, 0x44, 0x00], [0x00, 0x22, 0x00],
    [0x00, 0x11, 0x00], [0x00, 0x00, 0xEE], [0x00, 0x00, 0xDD],
    [0x00, 0x00, 0xBB], [0x00, 0x00, 0xAA], [0x00, 0x00, 0x88],
    [0x00, 0x00, 0x77], [0x00, 0x00, 0x55], [0x00, 0x00, 0x44],
    [0x00, 0x00, 0x22], [0x00, 0x00, 0x11], [0xEE, 0xEE, 0xEE],
    [0xDD, 0xDD, 0xDD], [0xBB, 0xBB, 0xBB], [0xAA, 0xAA, 0xAA],
    [0x88, 0x88, 0x88], [0x77, 0x77, 0x77], [0x55, 0x55, 0x55],
    [0x44, 0x44, 0x44], [0x22, 0x22, 0x22], [0x11, 0x11, 0x11],
    [0x00, 0x00, 0x00],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_start_white_and_end_black() {
        assert_eq!(COLORMAP_4[0], [0xFF, 0xFF, 0xFF]);
        assert_eq!(COLORMAP_4[15], [0x00, 0x00, 0x00]);
        assert_eq!(COLORMAP_8[0], [0xFF, 0xFF, 0xFF]);
        assert_eq!(COLORMAP_8[255], [0x00, 0x00, 0x00]);
    }

    #[test]
    fn color_cube_ordering() {
        assert_eq!(COLORMAP_8[35], [0xFF, 0x00, 0x00]);
        assert_eq!(COLORMAP_8[214], [0x00, 0x00, 0x33]);
        assert_eq!(COLORMAP_8[215], [0xEE, 0x00, 0x00]);
        assert_eq!(COLORMAP_8[245], [0xEE, 0xEE, 0xEE]);
    }
}
