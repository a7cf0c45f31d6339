//! Item stacks and shulker-box containers, and their NBT item form.
//!
//! Items use the data-component layout introduced in Java 1.20.5: a shulker
//! box carries its contents under `components."minecraft:container"` as a
//! list of `{slot, item: {id, count}}` entries.

use discpack_nbt::{NbtCompound, NbtTag};

use crate::chunk::Slot;
use crate::config::{ShulkerColor, SINGLE_CHEST_SLOTS};
use crate::error::StructureError;
use crate::identifier::ItemId;

/// Component key holding a container item's contents.
pub const CONTAINER_COMPONENT: &str = "minecraft:container";

/// One item occupying one slot of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub id: ItemId,
    /// Always at least 1.
    pub count: i32,
    pub slot: usize,
}

impl ItemStack {
    /// A single item at `slot`.
    pub fn encode(id: ItemId, slot: usize) -> Self {
        Self { id, count: 1, slot }
    }

    /// `{count, id}` as stored inside a container entry.
    pub fn item_nbt(&self) -> NbtCompound {
        let mut item = NbtCompound::new();
        item.insert("count".into(), NbtTag::Int(self.count));
        item.insert("id".into(), NbtTag::string(self.id.as_str()));
        item
    }

    /// `{slot, item}` entry of a `minecraft:container` component.
    pub fn to_container_entry(&self) -> NbtTag {
        let mut entry = NbtCompound::new();
        entry.insert("item".into(), NbtTag::Compound(self.item_nbt()));
        entry.insert("slot".into(), NbtTag::Int(self.slot as i32));
        NbtTag::Compound(entry)
    }
}

/// Encode the item in `slot` at position `index`.
///
/// Padding slots carry no item; callers are expected to skip them.
pub fn encode_item_stack(slot: &Slot, index: usize) -> Result<ItemStack, StructureError> {
    match slot {
        Some(id) => Ok(ItemStack::encode(id.clone(), index)),
        None => Err(StructureError::EmptySlot { slot: index }),
    }
}

/// A shulker box and the stacks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: ItemId,
    pub color: ShulkerColor,
    /// Ordered by slot, slots unique.
    pub items: Vec<ItemStack>,
}

impl Container {
    /// Fill a shulker box from one group.
    ///
    /// Each stack keeps the position it had in the group, so an empty slot
    /// leaves a gap instead of shifting the items after it.
    pub fn encode(group: &[Slot], color: ShulkerColor) -> Result<Self, StructureError> {
        if group.len() > SINGLE_CHEST_SLOTS {
            return Err(StructureError::InvalidLayout(format!(
                "a shulker box holds {SINGLE_CHEST_SLOTS} stacks, got a group of {}",
                group.len()
            )));
        }

        let items = group
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, slot)| encode_item_stack(slot, index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: shulker_box_id(color),
            color,
            items,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The `components` compound of the shulker box item.
    pub fn components_nbt(&self) -> NbtCompound {
        let entries = self.items.iter().map(ItemStack::to_container_entry).collect();
        let mut components = NbtCompound::new();
        components.insert(CONTAINER_COMPONENT.into(), NbtTag::List(entries));
        components
    }

    /// The shulker box item: `{id, count, components}`.
    pub fn to_nbt(&self) -> NbtCompound {
        let mut item = NbtCompound::new();
        item.insert("count".into(), NbtTag::Int(1));
        item.insert("id".into(), NbtTag::string(self.id.as_str()));
        item.insert("components".into(), NbtTag::Compound(self.components_nbt()));
        item
    }

    /// The shulker box as an item sitting in chest slot `slot`.
    pub fn to_chest_item(&self, slot: u8) -> NbtTag {
        let mut item = self.to_nbt();
        item.insert("Slot".into(), NbtTag::Byte(slot as i8));
        NbtTag::Compound(item)
    }
}

fn shulker_box_id(color: ShulkerColor) -> ItemId {
    // Shulker boxes are vanilla items whatever namespace the contents use.
    ItemId(format!("minecraft:{color}_shulker_box"))
}
