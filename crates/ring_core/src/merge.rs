use crate::{DocumentTree, Mapping};

/// Folds `incoming` into `accumulator`.
///
/// Absent keys are inserted, nested mappings are merged recursively, sequences
/// are unioned and every other combination is overwritten by `incoming`.
/// The merge is total: kind mismatches never fail.
pub fn merge(mut accumulator: Mapping, incoming: Mapping) -> Mapping {
    for (key, value) in incoming {
        match accumulator.get_mut(&key) {
            Some(existing) => {
                let current = std::mem::take(existing);
                *existing = merge_values(current, value);
            }
            None => {
                accumulator.insert(key, value);
            }
        }
    }
    accumulator
}

/// Combines two values found under the same key.
pub(crate) fn merge_values(current: DocumentTree, incoming: DocumentTree) -> DocumentTree {
    match (current, incoming) {
        (DocumentTree::Mapping(current), DocumentTree::Mapping(incoming)) => {
            DocumentTree::Mapping(merge(current, incoming))
        }
        (DocumentTree::Sequence(current), DocumentTree::Sequence(incoming)) => {
            DocumentTree::Sequence(sequence_union(current, incoming))
        }
        (_, incoming) => incoming,
    }
}

/// Keeps `current` as is, then appends each incoming element that is not
/// deep-equal to an element already collected.
fn sequence_union(current: Vec<DocumentTree>, incoming: Vec<DocumentTree>) -> Vec<DocumentTree> {
    let mut union = current;
    for element in incoming {
        if !union.contains(&element) {
            union.push(element);
        }
    }
    union
}
