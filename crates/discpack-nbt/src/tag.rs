//! The tag kinds a structure template is made of.

use std::collections::BTreeMap;

/// Named children of a compound, ordered by name so a tree always encodes
/// to the same bytes.
pub type NbtCompound = BTreeMap<String, NbtTag>;

/// The top-level compound of a file. Structure files leave the name empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtRoot {
    pub name: String,
    pub compound: NbtCompound,
}

impl NbtRoot {
    pub fn new(name: impl Into<String>, compound: NbtCompound) -> Self {
        Self {
            name: name.into(),
            compound,
        }
    }
}

/// One node of the tree.
///
/// Only the kinds found in structure templates are modelled; any other type
/// id is rejected by the reader.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtTag {
    Byte(i8),
    Short(i16),
    Int(i32),
    String(String),
    List(Vec<NbtTag>),
    Compound(NbtCompound),
}

impl NbtTag {
    pub const END_ID: u8 = 0;
    pub const BYTE_ID: u8 = 1;
    pub const SHORT_ID: u8 = 2;
    pub const INT_ID: u8 = 3;
    pub const STRING_ID: u8 = 8;
    pub const LIST_ID: u8 = 9;
    pub const COMPOUND_ID: u8 = 10;

    /// The id written in front of this tag on the wire.
    pub fn type_id(&self) -> u8 {
        match self {
            NbtTag::Byte(_) => Self::BYTE_ID,
            NbtTag::Short(_) => Self::SHORT_ID,
            NbtTag::Int(_) => Self::INT_ID,
            NbtTag::String(_) => Self::STRING_ID,
            NbtTag::List(_) => Self::LIST_ID,
            NbtTag::Compound(_) => Self::COMPOUND_ID,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        NbtTag::String(value.into())
    }

    /// A list of `Int`s, the shape of `pos` and `size`.
    pub fn int_list(values: &[i32]) -> Self {
        NbtTag::List(values.iter().copied().map(NbtTag::Int).collect())
    }

    pub fn as_byte(&self) -> Option<i8> {
        if let NbtTag::Byte(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        if let NbtTag::Int(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        if let NbtTag::String(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[NbtTag]> {
        if let NbtTag::List(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_compound(&self) -> Option<&NbtCompound> {
        if let NbtTag::Compound(v) = self {
            Some(v)
        } else {
            None
        }
    }
}
