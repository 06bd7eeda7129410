//! Canonical child ordering for packed groups
//!
//! Groups are sorted to speed up loading. A group's own filename selects a
//! sort list from [`SORT_CATALOGUE`]; the list's patterns partition child
//! names into ordered classes, and names within a class (or matching no
//! pattern at all) fall back to lexicographic order. All comparisons work
//! on ASCII-lowercased names.

use std::cmp::Ordering;
use std::sync::LazyLock;

use glob::Pattern;
use tracing::trace;

use crate::components::SORT_CATALOGUE;

/// The catalogue with every glob compiled once, lowercased for
/// case-insensitive matching.
static CATALOGUE: LazyLock<Vec<(Pattern, Vec<Pattern>)>> = LazyLock::new(|| {
    SORT_CATALOGUE
        .iter()
        .map(|&(group, list)| {
            let group = Pattern::new(&group.to_ascii_lowercase()).expect("valid catalogue glob");
            let children = list
                .split('|')
                .map(|p| Pattern::new(&p.to_ascii_lowercase()).expect("valid catalogue glob"))
                .collect();
            (group, children)
        })
        .collect()
});

/// Comparator producing the canonical order of children within one group.
#[derive(Debug, Clone, Copy)]
pub struct SortOrder {
    list: Option<&'static [Pattern]>,
}

impl SortOrder {
    /// Select the sort list for a group named `group_name`.
    ///
    /// Groups without a catalogue match (plain directories, unknown
    /// extensions) sort their children lexicographically.
    pub fn for_group(group_name: &str) -> Self {
        let name = group_name.to_ascii_lowercase();
        let list = CATALOGUE
            .iter()
            .find(|(group, _)| group.matches(&name))
            .map(|(_, children)| children.as_slice());
        trace!(group = group_name, classified = list.is_some(), "selected sort list");
        Self { list }
    }

    /// Compare two child names.
    ///
    /// Walks the patterns in list order: the first pattern matching exactly
    /// one of the names decides. Names in the same pattern class, and names
    /// matching no pattern, compare lexicographically — which also places
    /// all unclassified names after every classified one.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let a = a.to_ascii_lowercase();
        let b = b.to_ascii_lowercase();
        if let Some(list) = self.list {
            for pattern in list {
                let match_a = pattern.matches(&a);
                let match_b = pattern.matches(&b);
                if match_a != match_b {
                    return if match_a { Ordering::Less } else { Ordering::Greater };
                }
                if match_a {
                    // Same class.
                    break;
                }
            }
        }
        a.cmp(&b)
    }

    /// Sort a slice of names in place.
    pub fn sort<S: AsRef<str>>(&self, names: &mut [S]) {
        names.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}
