//! Item identifier normalization.
//!
//! Input tokens may be bare names (`cat`), prefixed names (`music_disc_cat`)
//! or fully qualified ids (`minecraft:music_disc_cat`). Everything leaving
//! this module is fully qualified.

use std::fmt;

use crate::config::LayoutConfig;

/// A fully qualified item identifier, `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(pub(crate) String);

impl ItemId {
    /// Accept an id that already carries a namespace.
    pub fn parse_qualified(raw: &str) -> Option<Self> {
        let (namespace, path) = raw.split_once(':')?;
        if namespace.is_empty() || path.is_empty() {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const VANILLA_NAMESPACE: &str = "minecraft";

/// Applies the default namespace and item prefix to raw tokens.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// `namespace:` including the separator.
    qualifier: String,
    prefix: String,
    /// Ids from other namespaces pass through untouched. Off for the vanilla
    /// namespace, where every token not starting with `minecraft:` is a name.
    keep_foreign: bool,
}

impl Normalizer {
    pub fn new(namespace: &str, prefix: &str) -> Self {
        Self {
            qualifier: format!("{namespace}:"),
            prefix: prefix.to_string(),
            keep_foreign: namespace != VANILLA_NAMESPACE,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(&config.namespace, &config.item_prefix)
    }

    /// Qualify a single non-empty token.
    ///
    /// 1. Already starts with the namespace: unchanged.
    /// 2. Under a non-vanilla namespace, an id qualified with any other
    ///    namespace: unchanged, so vanilla discs can be mixed in.
    /// 3. Starts with the prefix: namespace prepended.
    /// 4. Otherwise namespace and prefix prepended.
    pub fn normalize(&self, token: &str) -> ItemId {
        if token.starts_with(&self.qualifier) {
            return ItemId(token.to_string());
        }
        if self.keep_foreign {
            if let Some(id) = ItemId::parse_qualified(token) {
                return id;
            }
        }
        if token.starts_with(&self.prefix) {
            ItemId(format!("{}{token}", self.qualifier))
        } else {
            ItemId(format!("{}{}{token}", self.qualifier, self.prefix))
        }
    }

    /// Normalize one token per line, trimming whitespace and skipping blank lines.
    pub fn normalize_lines(&self, text: &str) -> Vec<ItemId> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.normalize(line))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}
