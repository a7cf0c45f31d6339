//! Layout parameters for the generated structure.
//!
//! Every value the pipeline depends on lives here and is passed into the
//! assembler explicitly, so building a document is a pure function of its
//! inputs.

use std::fmt;

use serde::Deserialize;

use crate::error::StructureError;

/// Slots in one chest block, and in one shulker box.
pub const SINGLE_CHEST_SLOTS: usize = 27;

/// Slots in a double chest.
pub const DOUBLE_CHEST_SLOTS: usize = 2 * SINGLE_CHEST_SLOTS;

/// DataVersion written by Minecraft Java 1.21.5.
pub const DEFAULT_DATA_VERSION: i32 = 4325;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub namespace: String,
    pub item_prefix: String,
    /// Items per shulker box.
    pub group_size: usize,
    /// Shulker boxes per double chest.
    pub chest_capacity: usize,
    pub data_version: i32,
    pub shulker_color: ShulkerColor,
    pub facing: Facing,
    pub placement: Placement,
    pub input: InputFormat,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            namespace: "minecraft".into(),
            item_prefix: "music_disc_".into(),
            group_size: SINGLE_CHEST_SLOTS,
            chest_capacity: DOUBLE_CHEST_SLOTS,
            data_version: DEFAULT_DATA_VERSION,
            shulker_color: ShulkerColor::default(),
            facing: Facing::default(),
            placement: Placement::default(),
            input: InputFormat::default(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), StructureError> {
        if self.group_size == 0 || self.group_size > SINGLE_CHEST_SLOTS {
            return Err(StructureError::InvalidLayout(format!(
                "group_size must be between 1 and {SINGLE_CHEST_SLOTS}, got {}",
                self.group_size
            )));
        }
        if self.chest_capacity == 0 || self.chest_capacity > DOUBLE_CHEST_SLOTS {
            return Err(StructureError::InvalidLayout(format!(
                "chest_capacity must be between 1 and {DOUBLE_CHEST_SLOTS}, got {}",
                self.chest_capacity
            )));
        }
        if self.chest_capacity % 2 != 0 {
            return Err(StructureError::InvalidLayout(format!(
                "chest_capacity must be even, got {}",
                self.chest_capacity
            )));
        }
        if self.namespace.is_empty() || self.namespace.contains(':') {
            return Err(StructureError::InvalidLayout(format!(
                "namespace must be non-empty and contain no ':', got {:?}",
                self.namespace
            )));
        }
        Ok(())
    }

    /// Slots in each half of the double chest.
    pub fn half_capacity(&self) -> usize {
        self.chest_capacity / 2
    }
}

/// The sixteen dye colors a shulker box can have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShulkerColor {
    White,
    Orange,
    Magenta,
    LightBlue,
    Yellow,
    Lime,
    Pink,
    Gray,
    LightGray,
    Cyan,
    #[default]
    Purple,
    Blue,
    Brown,
    Green,
    Red,
    Black,
}

impl ShulkerColor {
    pub const ALL: [ShulkerColor; 16] = [
        ShulkerColor::White,
        ShulkerColor::Orange,
        ShulkerColor::Magenta,
        ShulkerColor::LightBlue,
        ShulkerColor::Yellow,
        ShulkerColor::Lime,
        ShulkerColor::Pink,
        ShulkerColor::Gray,
        ShulkerColor::LightGray,
        ShulkerColor::Cyan,
        ShulkerColor::Purple,
        ShulkerColor::Blue,
        ShulkerColor::Brown,
        ShulkerColor::Green,
        ShulkerColor::Red,
        ShulkerColor::Black,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShulkerColor::White => "white",
            ShulkerColor::Orange => "orange",
            ShulkerColor::Magenta => "magenta",
            ShulkerColor::LightBlue => "light_blue",
            ShulkerColor::Yellow => "yellow",
            ShulkerColor::Lime => "lime",
            ShulkerColor::Pink => "pink",
            ShulkerColor::Gray => "gray",
            ShulkerColor::LightGray => "light_gray",
            ShulkerColor::Cyan => "cyan",
            ShulkerColor::Purple => "purple",
            ShulkerColor::Blue => "blue",
            ShulkerColor::Brown => "brown",
            ShulkerColor::Green => "green",
            ShulkerColor::Red => "red",
            ShulkerColor::Black => "black",
        }
    }

    /// Parse a dye name such as `light_blue`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for ShulkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction the double chest faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    #[default]
    North,
    South,
    East,
    West,
}

impl Facing {
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::South => "south",
            Facing::East => "east",
            Facing::West => "west",
        }
    }
}

/// How shulker boxes are spread over the two chest blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Every box goes into the second chest block, `Slot` = flat index.
    #[default]
    SecondChest,
    /// The first half of the flat indices fill the first chest block, the
    /// rest the second, each starting at slot 0.
    Split,
}

/// What the lines of the input file are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// One item name or id per line.
    #[default]
    Disc,
    /// Instruction mnemonics with macros, assembled into disc ids.
    Mnemonic,
}
