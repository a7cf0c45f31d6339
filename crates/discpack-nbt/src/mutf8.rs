//! Java's modified UTF-8, the string encoding of NBT.
//!
//! Differs from UTF-8 in two places: NUL is the two-byte `C0 80`, and
//! characters outside the BMP are written as a surrogate pair of three-byte
//! sequences.

use crate::error::NbtError;

pub(crate) fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        match c as u32 {
            0 => out.extend_from_slice(&[0xC0, 0x80]),
            0x10000..=u32::MAX => {
                let mut units = [0u16; 2];
                for &unit in c.encode_utf16(&mut units).iter() {
                    push_three_byte(&mut out, unit);
                }
            }
            _ => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out
}

fn push_three_byte(out: &mut Vec<u8>, unit: u16) {
    out.push(0xE0 | (unit >> 12) as u8);
    out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
    out.push(0x80 | (unit & 0x3F) as u8);
}

pub(crate) fn decode(bytes: &[u8]) -> Result<String, NbtError> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let (unit, width) = match b {
            0x01..=0x7F => (b as u16, 1),
            0xC0..=0xDF => {
                let b1 = continuation(bytes, i + 1)?;
                ((((b & 0x1F) as u16) << 6) | b1, 2)
            }
            0xE0..=0xEF => {
                let b1 = continuation(bytes, i + 1)?;
                let b2 = continuation(bytes, i + 2)?;
                ((((b & 0x0F) as u16) << 12) | (b1 << 6) | b2, 3)
            }
            _ => return Err(NbtError::InvalidUtf8),
        };
        units.push(unit);
        i += width;
    }
    String::from_utf16(&units).map_err(|_| NbtError::InvalidUtf8)
}

fn continuation(bytes: &[u8], at: usize) -> Result<u16, NbtError> {
    match bytes.get(at) {
        Some(&b) if b & 0xC0 == 0x80 => Ok((b & 0x3F) as u16),
        _ => Err(NbtError::InvalidUtf8),
    }
}
