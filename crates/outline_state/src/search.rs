//! Name search over the whole tree.
//!
//! Matching is a case-insensitive substring test. A non-empty query flattens
//! the hierarchy: matching records are listed on their own, without the
//! ancestors that would normally frame them.

use std::ops::Range;

use crate::{ObjectId, TreeStore};

/// What the outline should show for the current query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterResult {
    /// No query: show the normal tree view.
    FullTree,
    /// Flat list of matches in display order; empty means "no results".
    Matches(Vec<ObjectId>),
}

impl FilterResult {
    pub fn is_full_tree(&self) -> bool {
        matches!(self, FilterResult::FullTree)
    }

    pub fn matches(&self) -> Option<&[ObjectId]> {
        match self {
            FilterResult::FullTree => None,
            FilterResult::Matches(ids) => Some(ids),
        }
    }
}

pub fn filter(store: &TreeStore, query: &str) -> FilterResult {
    if query.is_empty() {
        return FilterResult::FullTree;
    }

    let needle = fold_case(query);
    let matches = store
        .iter()
        .filter(|(_, record)| fold_case(record.name()).contains(&needle))
        .map(|(id, _)| id)
        .collect();

    FilterResult::Matches(matches)
}

/// Byte span of the first case-insensitive occurrence of `query` in `name`.
///
/// The span always falls on char boundaries of `name`, even where lowercasing
/// changes a character's encoded length.
pub fn highlight(query: &str, name: &str) -> Option<Range<usize>> {
    if query.is_empty() {
        return None;
    }

    let needle = fold_case(query);
    // For every byte of the folded name, the byte range of the original char it came from.
    let mut folded = String::with_capacity(name.len());
    let mut origin: Vec<Range<usize>> = Vec::with_capacity(name.len());
    for (start, ch) in name.char_indices() {
        let source = start..start + ch.len_utf8();
        for lower in ch.to_lowercase() {
            folded.push(lower);
            origin.extend(std::iter::repeat(source.clone()).take(lower.len_utf8()));
        }
    }

    let hit = folded.find(&needle)?;
    let last = hit + needle.len() - 1;
    Some(origin[hit].start..origin[last].end)
}

fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}
