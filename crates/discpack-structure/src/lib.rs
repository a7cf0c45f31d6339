//! Builds a Java Edition structure template holding a double chest full of
//! shulker boxes, from a flat list of item identifiers.
//!
//! raw tokens -> [`Normalizer`] -> [`chunk`] -> [`Container`] -> [`StructureDocument`]
//!
//! Mnemonic input goes through [`assemble`] instead of the normalizer.

pub mod assembly;
pub mod chunk;
pub mod config;
pub mod container;
pub mod error;
pub mod identifier;
pub mod structure;

pub use assembly::{assemble, Opcode};
pub use chunk::{chunk, Slot};
pub use config::{Facing, InputFormat, LayoutConfig, Placement, ShulkerColor};
pub use container::{encode_item_stack, Container, ItemStack};
pub use error::{AssemblyError, StructureError};
pub use identifier::{ItemId, Normalizer};
pub use structure::{
    BlockEntry, BlockVariant, ChestHalf, ChestItem, ChestSlotAssignment, StructureDocument,
    StructureStats,
};

use tracing::info;

/// Run the whole pipeline over newline-separated tokens.
pub fn build_from_text(text: &str, config: &LayoutConfig) -> Result<StructureDocument, StructureError> {
    config.validate()?;

    let ids = match config.input {
        InputFormat::Disc => Normalizer::from_config(config).normalize_lines(text),
        InputFormat::Mnemonic => {
            let program = assemble(text)?;
            info!("Assembled {} instructions", program.len());
            program.into_iter().map(Opcode::item_id).collect()
        }
    };
    info!("Loaded {} identifiers", ids.len());

    let groups = chunk(ids, config.group_size);
    info!("Split into {} shulker boxes", groups.len());

    StructureDocument::build(&groups, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_small_program() {
        let doc = build_from_text("13\ncat\n\nmusic_disc_blocks\n", &LayoutConfig::default()).unwrap();

        assert!(doc.blocks[0].items.is_empty());
        assert_eq!(doc.blocks[1].items.len(), 1);
        let chest_item = &doc.blocks[1].items[0];
        assert_eq!(chest_item.slot, 0);

        let stacks: Vec<(usize, &str)> = chest_item
            .container
            .items
            .iter()
            .map(|s| (s.slot, s.id.as_str()))
            .collect();
        assert_eq!(
            stacks,
            [
                (0, "minecraft:music_disc_13"),
                (1, "minecraft:music_disc_cat"),
                (2, "minecraft:music_disc_blocks"),
            ]
        );
    }

    #[test]
    fn blank_input_builds_empty_chest() {
        let doc = build_from_text("\n  \n", &LayoutConfig::default()).unwrap();
        assert_eq!(doc.stats.groups, 0);
        assert!(doc.blocks.iter().all(|b| b.items.is_empty()));
    }

    #[test]
    fn mnemonic_input_is_assembled() {
        let config = LayoutConfig {
            input: InputFormat::Mnemonic,
            ..Default::default()
        };
        let doc = build_from_text("LD ; load
OUT
", &config).unwrap();

        assert_eq!(doc.stats.groups, 1);
        assert_eq!(doc.stats.items, 27);
        let stacks = &doc.blocks[1].items[0].container.items;
        assert_eq!(stacks[0].id.as_str(), "minecraft:music_disc_chirp");
        assert_eq!(stacks[1].id.as_str(), "minecraft:music_disc_mall");
        assert_eq!(stacks[26].id.as_str(), "minecraft:music_disc_13");
    }

    #[test]
    fn assembly_errors_surface() {
        let config = LayoutConfig {
            input: InputFormat::Mnemonic,
            ..Default::default()
        };
        assert!(matches!(
            build_from_text("LD
HALT
", &config),
            Err(StructureError::Assembly(AssemblyError::UnknownInstruction { line: 2, .. }))
        ));
    }

    #[test]
    fn config_errors_surface() {
        let config = LayoutConfig {
            chest_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            build_from_text("cat", &config),
            Err(StructureError::InvalidLayout(_))
        ));
    }
}
