use crate::merge::merge_values;
use crate::{DocumentTree, Mapping, Scalar};

/// Keys whose scalar values are always emitted as quoted YAML strings.
pub const QUOTED_FIELDS: [&str; 2] = ["$ref", "description"];

/// Post-merge pass: stringifies every mapping key and marks the scalars under
/// [`QUOTED_FIELDS`] for quoting, at any depth.
///
/// Keys that collide once stringified (YAML `200` next to JSON `"200"`) are
/// combined with the merge rule, the later entry acting as the incoming value.
pub fn annotate(root: Mapping) -> Mapping {
    annotate_mapping(root)
}

fn annotate_mapping(mapping: Mapping) -> Mapping {
    let mut annotated = Mapping::with_capacity(mapping.len());
    for (key, value) in mapping {
        let name = key.to_key_string();
        let value = match value {
            DocumentTree::Scalar(scalar) if QUOTED_FIELDS.contains(&name.as_str()) => {
                DocumentTree::Scalar(quote(scalar))
            }
            other => annotate_tree(other),
        };
        let key = Scalar::String(name);
        match annotated.get_mut(&key) {
            Some(existing) => {
                let current = std::mem::take(existing);
                *existing = merge_values(current, value);
            }
            None => {
                annotated.insert(key, value);
            }
        }
    }
    annotated
}

fn annotate_tree(tree: DocumentTree) -> DocumentTree {
    match tree {
        DocumentTree::Mapping(mapping) => DocumentTree::Mapping(annotate_mapping(mapping)),
        DocumentTree::Sequence(items) => {
            DocumentTree::Sequence(items.into_iter().map(annotate_tree).collect())
        }
        scalar @ DocumentTree::Scalar(_) => scalar,
    }
}

fn quote(scalar: Scalar) -> Scalar {
    match scalar {
        Scalar::Null => Scalar::Null,
        Scalar::String(text) | Scalar::Quoted(text) => Scalar::Quoted(text),
        other => Scalar::Quoted(other.to_key_string()),
    }
}
