//! 3x5 bitmap digits for the diagnostic overlay.

/// Glyph width in cells
pub const GLYPH_WIDTH: u32 = 3;
/// Glyph height in cells
pub const GLYPH_HEIGHT: u32 = 5;

// Each row is 3 bits, most significant bit on the left.
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Rows of the glyph for `c`, or `None` for characters without one.
pub fn glyph(c: char) -> Option<&'static [u8; 5]> {
    c.to_digit(10).map(|d| &DIGITS[d as usize])
}

/// Whether cell `(col, row)` of a glyph is lit.
pub fn is_lit(rows: &[u8; 5], col: u32, row: u32) -> bool {
    col < GLYPH_WIDTH && row < GLYPH_HEIGHT && rows[row as usize] & (0b100 >> col) != 0
}
