//! 5×7 pixel font for lowercase ASCII letters and digits.
//!
//! Each glyph is seven rows; the low five bits of a row are its pixels,
//! most significant bit leftmost. Letters use capital shapes.

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

type Glyph = [u8; GLYPH_HEIGHT as usize];

const LETTERS: [Glyph; 26] = [
    [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11], // a
    [0x1e, 0x11, 0x11, 0x1e, 0x11, 0x11, 0x1e], // b
    [0x0e, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0e], // c
    [0x1e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1e], // d
    [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x1f], // e
    [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x10], // f
    [0x0e, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0f], // g
    [0x11, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11], // h
    [0x0e, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0e], // i
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0c], // j
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // k
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1f], // l
    [0x11, 0x1b, 0x15, 0x15, 0x11, 0x11, 0x11], // m
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // n
    [0x0e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e], // o
    [0x1e, 0x11, 0x11, 0x1e, 0x10, 0x10, 0x10], // p
    [0x0e, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0d], // q
    [0x1e, 0x11, 0x11, 0x1e, 0x14, 0x12, 0x11], // r
    [0x0f, 0x10, 0x10, 0x0e, 0x01, 0x01, 0x1e], // s
    [0x1f, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // t
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e], // u
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0a, 0x04], // v
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0a], // w
    [0x11, 0x11, 0x0a, 0x04, 0x0a, 0x11, 0x11], // x
    [0x11, 0x11, 0x11, 0x0a, 0x04, 0x04, 0x04], // y
    [0x1f, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1f], // z
];

const DIGITS: [Glyph; 10] = [
    [0x0e, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0e],
    [0x04, 0x0c, 0x04, 0x04, 0x04, 0x04, 0x0e],
    [0x0e, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1f],
    [0x1f, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0e],
    [0x02, 0x06, 0x0a, 0x12, 0x1f, 0x02, 0x02],
    [0x1f, 0x10, 0x1e, 0x01, 0x01, 0x11, 0x0e],
    [0x06, 0x08, 0x10, 0x1e, 0x11, 0x11, 0x0e],
    [0x1f, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
    [0x0e, 0x11, 0x11, 0x0e, 0x11, 0x11, 0x0e],
    [0x0e, 0x11, 0x11, 0x0f, 0x01, 0x02, 0x0c],
];

/// Drawn for characters outside the font.
const MISSING: Glyph = [0x1f, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1f];

/// Look up the glyph of `c`, case-insensitively.
pub fn glyph(c: char) -> &'static Glyph {
    match c.to_ascii_lowercase() {
        l @ 'a'..='z' => &LETTERS[(l as u8 - b'a') as usize],
        d @ '0'..='9' => &DIGITS[(d as u8 - b'0') as usize],
        _ => &MISSING,
    }
}
