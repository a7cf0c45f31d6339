//! Big-endian NBT read/write engine (Java Edition layout).
//!
//! Numbers are big-endian, strings are a u16 byte length followed by
//! modified UTF-8, list lengths are i32.

use bytes::{Buf, BufMut};

use crate::error::NbtError;
use crate::mutf8;
use crate::tag::{NbtCompound, NbtRoot, NbtTag};

/// Maximum nesting depth to prevent stack overflow.
pub(crate) const MAX_DEPTH: usize = 512;

// -----------------------------------------------------------------------
// Reading
// -----------------------------------------------------------------------

pub(crate) fn read_nbt(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    ensure_remaining(buf, 1)?;
    let tag_type = buf.get_u8();
    if tag_type != NbtTag::COMPOUND_ID {
        return Err(NbtError::ExpectedCompound { got: tag_type });
    }
    let name = read_string(buf)?;
    let compound = read_compound(buf, 0)?;
    Ok(NbtRoot { name, compound })
}

fn read_tag(buf: &mut impl Buf, tag_type: u8, depth: usize) -> Result<NbtTag, NbtError> {
    if depth > MAX_DEPTH {
        return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
    }

    match tag_type {
        NbtTag::BYTE_ID => {
            ensure_remaining(buf, 1)?;
            Ok(NbtTag::Byte(buf.get_i8()))
        }
        NbtTag::SHORT_ID => {
            ensure_remaining(buf, 2)?;
            Ok(NbtTag::Short(buf.get_i16()))
        }
        NbtTag::INT_ID => {
            ensure_remaining(buf, 4)?;
            Ok(NbtTag::Int(buf.get_i32()))
        }
        NbtTag::STRING_ID => Ok(NbtTag::String(read_string(buf)?)),
        NbtTag::LIST_ID => {
            ensure_remaining(buf, 5)?;
            let element_type = buf.get_u8();
            let len = buf.get_i32();
            if len < 0 {
                return Err(NbtError::NegativeLength(len));
            }
            let len = len as usize;
            // Only an empty list may use TAG_End as its element type.
            if element_type == NbtTag::END_ID && len > 0 {
                return Err(NbtError::UnknownTagType(element_type));
            }
            let mut list = Vec::with_capacity(len.min(buf.remaining()));
            for _ in 0..len {
                list.push(read_tag(buf, element_type, depth + 1)?);
            }
            Ok(NbtTag::List(list))
        }
        NbtTag::COMPOUND_ID => Ok(NbtTag::Compound(read_compound(buf, depth + 1)?)),
        other => Err(NbtError::UnknownTagType(other)),
    }
}

fn read_compound(buf: &mut impl Buf, depth: usize) -> Result<NbtCompound, NbtError> {
    if depth > MAX_DEPTH {
        return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
    }
    let mut map = NbtCompound::new();
    loop {
        ensure_remaining(buf, 1)?;
        let tag_type = buf.get_u8();
        if tag_type == NbtTag::END_ID {
            break;
        }
        let name = read_string(buf)?;
        let tag = read_tag(buf, tag_type, depth)?;
        map.insert(name, tag);
    }
    Ok(map)
}

fn read_string(buf: &mut impl Buf) -> Result<String, NbtError> {
    ensure_remaining(buf, 2)?;
    let len = buf.get_u16() as usize;
    ensure_remaining(buf, len)?;
    let data = buf.copy_to_bytes(len);
    mutf8::decode(&data)
}

fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), NbtError> {
    if buf.remaining() < needed {
        Err(NbtError::UnexpectedEof)
    } else {
        Ok(())
    }
}

// -----------------------------------------------------------------------
// Writing
// -----------------------------------------------------------------------

pub(crate) fn write_nbt(buf: &mut impl BufMut, root: &NbtRoot) -> Result<(), NbtError> {
    buf.put_u8(NbtTag::COMPOUND_ID);
    write_string(buf, &root.name)?;
    write_compound(buf, &root.compound)
}

fn write_tag(buf: &mut impl BufMut, tag: &NbtTag) -> Result<(), NbtError> {
    match tag {
        NbtTag::Byte(v) => buf.put_i8(*v),
        NbtTag::Short(v) => buf.put_i16(*v),
        NbtTag::Int(v) => buf.put_i32(*v),
        NbtTag::String(s) => write_string(buf, s)?,
        NbtTag::List(list) => {
            let element_type = list.first().map_or(NbtTag::END_ID, NbtTag::type_id);
            if let Some(other) = list.iter().find(|t| t.type_id() != element_type) {
                return Err(NbtError::MixedList {
                    first: element_type,
                    found: other.type_id(),
                });
            }
            buf.put_u8(element_type);
            buf.put_i32(list.len() as i32);
            for item in list {
                write_tag(buf, item)?;
            }
        }
        NbtTag::Compound(map) => write_compound(buf, map)?,
    }
    Ok(())
}

fn write_compound(buf: &mut impl BufMut, map: &NbtCompound) -> Result<(), NbtError> {
    for (name, tag) in map {
        buf.put_u8(tag.type_id());
        write_string(buf, name)?;
        write_tag(buf, tag)?;
    }
    buf.put_u8(NbtTag::END_ID);
    Ok(())
}

fn write_string(buf: &mut impl BufMut, s: &str) -> Result<(), NbtError> {
    let encoded = mutf8::encode(s);
    let len = u16::try_from(encoded.len()).map_err(|_| NbtError::StringTooLong {
        len: encoded.len(),
    })?;
    buf.put_u16(len);
    buf.put_slice(&encoded);
    Ok(())
}
