//! Assembling the double-chest structure template.
//!
//! The template is two chest blocks forming one double chest. The first
//! block (palette index 0, `type=left`) and the second (palette index 1,
//! `type=right`) hold the shulker boxes according to [`Placement`].

use std::collections::BTreeMap;

use discpack_nbt::{NbtCompound, NbtRoot, NbtTag};
use tracing::{debug, warn};

use crate::chunk::{occupied, Slot};
use crate::config::{Facing, LayoutConfig, Placement};
use crate::container::Container;
use crate::error::StructureError;

const CHEST_ID: &str = "minecraft:chest";

/// Which block of the double chest a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChestHalf {
    /// Block 0, palette `type=left`.
    First,
    /// Block 1, palette `type=right`.
    Second,
}

impl ChestHalf {
    fn block_index(self) -> usize {
        match self {
            ChestHalf::First => 0,
            ChestHalf::Second => 1,
        }
    }
}

/// Where a shulker box with a given flat index ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChestSlotAssignment {
    pub half: ChestHalf,
    pub slot: u8,
}

impl ChestSlotAssignment {
    /// Fill the first half, then the second. `None` past both halves.
    pub fn from_flat(index: usize, half_capacity: usize) -> Option<Self> {
        let (half, slot) = if index < half_capacity {
            (ChestHalf::First, index)
        } else if index < 2 * half_capacity {
            (ChestHalf::Second, index - half_capacity)
        } else {
            return None;
        };
        Some(Self {
            half,
            slot: u8::try_from(slot).ok()?,
        })
    }

    /// Everything in the second block, slot equal to the flat index.
    pub fn second_chest(index: usize) -> Option<Self> {
        Some(Self {
            half: ChestHalf::Second,
            slot: u8::try_from(index).ok()?,
        })
    }

    pub fn for_placement(placement: Placement, index: usize, half_capacity: usize) -> Option<Self> {
        match placement {
            Placement::SecondChest => Self::second_chest(index),
            Placement::Split => Self::from_flat(index, half_capacity),
        }
    }
}

/// A palette entry: block name plus its state properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockVariant {
    pub name: String,
    pub properties: BTreeMap<String, String>,
}

impl BlockVariant {
    fn chest_half(facing: Facing, kind: &str) -> Self {
        let properties = [
            ("facing", facing.as_str()),
            ("type", kind),
            ("waterlogged", "false"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            name: CHEST_ID.into(),
            properties,
        }
    }

    fn to_nbt(&self) -> NbtTag {
        let properties: NbtCompound = self
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), NbtTag::string(v.as_str())))
            .collect();
        let mut c = NbtCompound::new();
        c.insert("Name".into(), NbtTag::string(self.name.as_str()));
        c.insert("Properties".into(), NbtTag::Compound(properties));
        NbtTag::Compound(c)
    }
}

/// A shulker box in a chest slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChestItem {
    pub slot: u8,
    pub container: Container,
}

/// A positioned chest block with its inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub pos: [i32; 3],
    /// Index into the document palette.
    pub state: i32,
    pub items: Vec<ChestItem>,
}

impl BlockEntry {
    fn to_nbt(&self) -> NbtTag {
        let items = self
            .items
            .iter()
            .map(|item| item.container.to_chest_item(item.slot))
            .collect();

        let mut block_entity = NbtCompound::new();
        block_entity.insert("Items".into(), NbtTag::List(items));
        block_entity.insert("id".into(), NbtTag::string(CHEST_ID));

        let mut c = NbtCompound::new();
        c.insert("pos".into(), NbtTag::int_list(&self.pos));
        c.insert("state".into(), NbtTag::Int(self.state));
        c.insert("nbt".into(), NbtTag::Compound(block_entity));
        NbtTag::Compound(c)
    }
}

/// Counts gathered while assembling, for logging and reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureStats {
    pub groups: usize,
    pub containers: usize,
    pub items: usize,
    pub dropped_groups: usize,
    pub dropped_items: usize,
}

impl StructureStats {
    /// Identifiers seen, placed or dropped.
    pub fn total_items(&self) -> usize {
        self.items + self.dropped_items
    }
}

/// A structure template holding one double chest.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureDocument {
    pub data_version: i32,
    pub size: [i32; 3],
    pub blocks: Vec<BlockEntry>,
    pub palette: Vec<BlockVariant>,
    /// Always empty.
    pub entities: Vec<NbtCompound>,
    pub stats: StructureStats,
}

impl StructureDocument {
    /// Lay `groups` out over the double chest.
    ///
    /// Groups past `config.chest_capacity` are dropped with a warning. Groups
    /// with no items produce no shulker box but still use up their slot.
    pub fn build(groups: &[Vec<Slot>], config: &LayoutConfig) -> Result<Self, StructureError> {
        config.validate()?;

        let mut stats = StructureStats {
            groups: groups.len(),
            ..Default::default()
        };

        let kept = groups.len().min(config.chest_capacity);
        if kept < groups.len() {
            let dropped = &groups[kept..];
            stats.dropped_groups = dropped.len();
            stats.dropped_items = dropped.iter().map(|g| occupied(g)).sum();
            warn!(
                "Only {} shulker boxes fit in a double chest; dropping {} more holding {} items",
                config.chest_capacity, stats.dropped_groups, stats.dropped_items
            );
        }

        let (first_pos, second_pos, size) = chest_geometry(config.facing);
        let mut blocks = vec![
            BlockEntry {
                pos: first_pos,
                state: 0,
                items: Vec::new(),
            },
            BlockEntry {
                pos: second_pos,
                state: 1,
                items: Vec::new(),
            },
        ];

        for (index, group) in groups[..kept].iter().enumerate() {
            if occupied(group) == 0 {
                debug!(index, "skipping empty group");
                continue;
            }
            let container = Container::encode(group, config.shulker_color)?;
            let assignment =
                ChestSlotAssignment::for_placement(config.placement, index, config.half_capacity())
                    .ok_or_else(|| {
                        StructureError::InvalidLayout(format!("no chest slot for shulker box {index}"))
                    })?;

            debug!(
                index,
                slot = assignment.slot,
                items = container.items.len(),
                "placing {}",
                container.id
            );
            stats.containers += 1;
            stats.items += container.items.len();
            blocks[assignment.half.block_index()]
                .items
                .push(ChestItem {
                    slot: assignment.slot,
                    container,
                });
        }

        Ok(Self {
            data_version: config.data_version,
            size,
            blocks,
            palette: vec![
                BlockVariant::chest_half(config.facing, "left"),
                BlockVariant::chest_half(config.facing, "right"),
            ],
            entities: Vec::new(),
            stats,
        })
    }

    /// The document as the root compound of a structure file.
    pub fn to_nbt(&self) -> NbtRoot {
        let mut c = NbtCompound::new();
        c.insert("DataVersion".into(), NbtTag::Int(self.data_version));
        c.insert("size".into(), NbtTag::int_list(&self.size));
        c.insert(
            "entities".into(),
            NbtTag::List(self.entities.iter().cloned().map(NbtTag::Compound).collect()),
        );
        c.insert(
            "blocks".into(),
            NbtTag::List(self.blocks.iter().map(BlockEntry::to_nbt).collect()),
        );
        c.insert(
            "palette".into(),
            NbtTag::List(self.palette.iter().map(BlockVariant::to_nbt).collect()),
        );
        NbtRoot::new("", c)
    }
}

/// Positions of the `left` and `right` chest halves and the structure size.
///
/// A `left` half connects to the block clockwise of its facing, so the pair
/// runs along x when facing north/south and along z when facing east/west.
fn chest_geometry(facing: Facing) -> ([i32; 3], [i32; 3], [i32; 3]) {
    match facing {
        Facing::North => ([0, 0, 0], [1, 0, 0], [2, 1, 1]),
        Facing::South => ([1, 0, 0], [0, 0, 0], [2, 1, 1]),
        Facing::East => ([0, 0, 0], [0, 0, 1], [1, 1, 2]),
        Facing::West => ([0, 0, 1], [0, 0, 0], [1, 1, 2]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::chunk;
    use crate::identifier::{ItemId, Normalizer};

    fn ids(n: usize) -> Vec<ItemId> {
        let normalizer = Normalizer::default();
        (0..n).map(|i| normalizer.normalize(&format!("d{i}"))).collect()
    }

    fn build(n: usize, config: &LayoutConfig) -> StructureDocument {
        let groups = chunk(ids(n), config.group_size);
        StructureDocument::build(&groups, config).unwrap()
    }

    #[test]
    fn thirty_items_make_two_boxes_in_second_chest() {
        let doc = build(30, &LayoutConfig::default());

        assert!(doc.blocks[0].items.is_empty());
        let slots: Vec<u8> = doc.blocks[1].items.iter().map(|i| i.slot).collect();
        assert_eq!(slots, [0, 1]);
        assert_eq!(doc.blocks[1].items[0].container.items.len(), 27);
        assert_eq!(doc.blocks[1].items[1].container.items.len(), 3);
        assert_eq!(doc.palette.len(), 2);
        assert_eq!(doc.stats.containers, 2);
        assert_eq!(doc.stats.items, 30);
    }

    #[test]
    fn fixed_frame() {
        let doc = build(1, &LayoutConfig::default());
        assert_eq!(doc.data_version, 4325);
        assert_eq!(doc.size, [2, 1, 1]);
        assert_eq!(doc.blocks[0].pos, [0, 0, 0]);
        assert_eq!(doc.blocks[0].state, 0);
        assert_eq!(doc.blocks[1].pos, [1, 0, 0]);
        assert_eq!(doc.blocks[1].state, 1);
        assert_eq!(doc.palette[0].properties["type"], "left");
        assert_eq!(doc.palette[1].properties["type"], "right");
        assert!(doc.palette.iter().all(|p| p.properties["facing"] == "north"));
        assert!(doc.entities.is_empty());
    }

    #[test]
    fn truncates_past_capacity() {
        let doc = build(55 * 27, &LayoutConfig::default());
        assert_eq!(doc.blocks[1].items.len(), 54);
        assert_eq!(doc.blocks[1].items.last().unwrap().slot, 53);
        assert_eq!(doc.stats.groups, 55);
        assert_eq!(doc.stats.dropped_groups, 1);
        assert_eq!(doc.stats.dropped_items, 27);
    }

    #[test]
    fn empty_groups_keep_their_slot() {
        let n = Normalizer::default();
        let groups = vec![
            vec![Some(n.normalize("cat")), None],
            vec![None, None],
            vec![None, Some(n.normalize("13"))],
        ];
        let doc = StructureDocument::build(&groups, &LayoutConfig::default()).unwrap();
        let slots: Vec<u8> = doc.blocks[1].items.iter().map(|i| i.slot).collect();
        assert_eq!(slots, [0, 2]);
        assert_eq!(doc.blocks[1].items[1].container.items[0].slot, 1);
    }

    #[test]
    fn no_input_gives_empty_chests() {
        let doc = StructureDocument::build(&[], &LayoutConfig::default()).unwrap();
        assert!(doc.blocks.iter().all(|b| b.items.is_empty()));
        assert_eq!(doc.palette.len(), 2);
    }

    #[test]
    fn split_placement_fills_first_chest_first() {
        let config = LayoutConfig {
            placement: Placement::Split,
            ..Default::default()
        };
        let doc = build(29 * 27, &config);
        assert_eq!(doc.blocks[0].items.len(), 27);
        assert_eq!(doc.blocks[1].items.len(), 2);
        assert_eq!(doc.blocks[1].items[0].slot, 0);
        assert_eq!(doc.blocks[1].items[1].slot, 1);
    }

    #[test]
    fn slot_assignment() {
        assert_eq!(
            ChestSlotAssignment::from_flat(26, 27),
            Some(ChestSlotAssignment { half: ChestHalf::First, slot: 26 })
        );
        assert_eq!(
            ChestSlotAssignment::from_flat(27, 27),
            Some(ChestSlotAssignment { half: ChestHalf::Second, slot: 0 })
        );
        assert_eq!(ChestSlotAssignment::from_flat(54, 27), None);
        assert_eq!(
            ChestSlotAssignment::second_chest(40),
            Some(ChestSlotAssignment { half: ChestHalf::Second, slot: 40 })
        );
    }

    #[test]
    fn east_facing_runs_along_z() {
        let config = LayoutConfig {
            facing: Facing::East,
            ..Default::default()
        };
        let doc = build(1, &config);
        assert_eq!(doc.size, [1, 1, 2]);
        assert_eq!(doc.blocks[1].pos, [0, 0, 1]);
        assert_eq!(doc.palette[0].properties["facing"], "east");
    }

    #[test]
    fn invalid_config_rejected() {
        let config = LayoutConfig {
            group_size: 0,
            ..Default::default()
        };
        assert!(StructureDocument::build(&[], &config).is_err());
    }

    #[test]
    fn nbt_document_shape() {
        let root = build(3, &LayoutConfig::default()).to_nbt();
        let c = &root.compound;
        assert_eq!(root.name, "");
        assert_eq!(c["DataVersion"].as_int(), Some(4325));
        assert_eq!(c["entities"].as_list().map(<[_]>::len), Some(0));

        let blocks = c["blocks"].as_list().unwrap();
        assert_eq!(blocks.len(), 2);
        let first = blocks[0].as_compound().unwrap();
        let first_nbt = first["nbt"].as_compound().unwrap();
        assert_eq!(first_nbt["id"].as_string(), Some("minecraft:chest"));
        assert_eq!(first_nbt["Items"].as_list().map(<[_]>::len), Some(0));

        let second = blocks[1].as_compound().unwrap();
        assert_eq!(second["state"].as_int(), Some(1));
        let items = second["nbt"].as_compound().unwrap()["Items"].as_list().unwrap();
        assert_eq!(items.len(), 1);

        let palette = c["palette"].as_list().unwrap();
        let props = palette[1].as_compound().unwrap()["Properties"]
            .as_compound()
            .unwrap();
        assert_eq!(props["type"].as_string(), Some("right"));
        assert_eq!(props["waterlogged"].as_string(), Some("false"));
    }
}
