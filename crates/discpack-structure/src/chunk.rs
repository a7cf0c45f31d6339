//! Splitting a flat identifier list into shulker-sized groups.

use crate::identifier::ItemId;

/// One position inside a group. `None` marks a padded, empty slot.
pub type Slot = Option<ItemId>;

/// Split `ids` into groups of exactly `group_size` slots.
///
/// Group `i` holds the ids at flat indices `[i * group_size, (i + 1) * group_size)`;
/// the last group is padded with empty slots. Order is preserved and nothing
/// is deduplicated.
///
/// # Panics
///
/// Panics if `group_size` is zero. [`LayoutConfig::validate`](crate::LayoutConfig::validate)
/// rules that out before the pipeline gets here.
pub fn chunk(ids: Vec<ItemId>, group_size: usize) -> Vec<Vec<Slot>> {
    assert!(group_size > 0, "group size must be non-zero");

    let mut groups = Vec::with_capacity(ids.len().div_ceil(group_size));
    let mut current: Vec<Slot> = Vec::with_capacity(group_size);
    for id in ids {
        current.push(Some(id));
        if current.len() == group_size {
            groups.push(std::mem::replace(&mut current, Vec::with_capacity(group_size)));
        }
    }
    if !current.is_empty() {
        current.resize(group_size, None);
        groups.push(current);
    }
    groups
}

/// Number of occupied slots in a group.
pub fn occupied(group: &[Slot]) -> usize {
    group.iter().filter(|slot| slot.is_some()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Normalizer;

    fn ids(n: usize) -> Vec<ItemId> {
        let normalizer = Normalizer::default();
        (0..n).map(|i| normalizer.normalize(&i.to_string())).collect()
    }

    #[test]
    fn empty_input_gives_no_groups() {
        assert!(chunk(Vec::new(), 27).is_empty());
    }

    #[test]
    fn group_counts_and_padding() {
        for (len, size) in [(1, 27), (27, 27), (28, 27), (30, 27), (54, 27), (10, 4)] {
            let groups = chunk(ids(len), size);
            assert_eq!(groups.len(), len.div_ceil(size), "len {len} size {size}");
            assert!(groups.iter().all(|g| g.len() == size));

            let expected_last = if len % size == 0 { size } else { len % size };
            assert_eq!(occupied(groups.last().unwrap()), expected_last);
        }
    }

    #[test]
    fn positional_grouping() {
        let input = ids(30);
        let groups = chunk(input.clone(), 27);
        assert_eq!(groups[0][0].as_ref(), Some(&input[0]));
        assert_eq!(groups[0][26].as_ref(), Some(&input[26]));
        assert_eq!(groups[1][0].as_ref(), Some(&input[27]));
        assert_eq!(groups[1][2].as_ref(), Some(&input[29]));
        assert!(groups[1][3..].iter().all(Option::is_none));
    }

    #[test]
    fn duplicates_are_kept() {
        let n = Normalizer::default();
        let groups = chunk(vec![n.normalize("cat"), n.normalize("cat")], 27);
        assert_eq!(occupied(&groups[0]), 2);
        assert_eq!(groups[0][0], groups[0][1]);
    }

    #[test]
    #[should_panic(expected = "group size must be non-zero")]
    fn zero_group_size_panics() {
        chunk(ids(3), 0);
    }
}
