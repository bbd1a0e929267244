use crate::{DocFormat, DocumentTree, Mapping, ParseError, Scalar};

/// Decodes a source payload into a mapping.
///
/// `Ok(None)` means the format is unknown and the source takes no part in the merge.
/// An empty or `null` document decodes to an empty mapping.
pub fn parse(bytes: &[u8], format: DocFormat) -> Result<Option<Mapping>, ParseError> {
    match format {
        DocFormat::Yaml => parse_yaml(bytes).map(Some),
        DocFormat::Json => parse_json(bytes).map(Some),
        DocFormat::Unknown => Ok(None),
    }
}

pub fn parse_yaml(bytes: &[u8]) -> Result<Mapping, ParseError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Mapping::new());
    }
    let mut value: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
    value.apply_merge()?;
    match from_yaml(value)? {
        DocumentTree::Mapping(mapping) => Ok(mapping),
        DocumentTree::Scalar(Scalar::Null) => Ok(Mapping::new()),
        other => Err(ParseError::RootNotMapping {
            found: kind_name(&other),
        }),
    }
}

pub fn parse_json(bytes: &[u8]) -> Result<Mapping, ParseError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    match DocumentTree::from(value) {
        DocumentTree::Mapping(mapping) => Ok(mapping),
        DocumentTree::Scalar(Scalar::Null) => Ok(Mapping::new()),
        other => Err(ParseError::RootNotMapping {
            found: kind_name(&other),
        }),
    }
}

fn kind_name(tree: &DocumentTree) -> &'static str {
    match tree {
        DocumentTree::Mapping(_) => "a mapping",
        DocumentTree::Sequence(_) => "a sequence",
        DocumentTree::Scalar(_) => "a scalar",
    }
}

fn from_yaml(value: serde_yaml::Value) -> Result<DocumentTree, ParseError> {
    use serde_yaml::Value;

    let tree: DocumentTree = match value {
        Value::Null => Scalar::Null.into(),
        Value::Bool(flag) => Scalar::Bool(flag).into(),
        Value::Number(number) => yaml_number(&number).into(),
        Value::String(text) => Scalar::String(text).into(),
        Value::Sequence(items) => DocumentTree::Sequence(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(entries) => {
            let mut mapping = Mapping::with_capacity(entries.len());
            for (key, value) in entries {
                let key = match from_yaml(key)? {
                    DocumentTree::Scalar(scalar) => scalar,
                    other => {
                        return Err(ParseError::ComplexKey {
                            found: kind_name(&other),
                        })
                    }
                };
                mapping.insert(key, from_yaml(value)?);
            }
            DocumentTree::Mapping(mapping)
        }
        Value::Tagged(tagged) => from_yaml(tagged.value)?,
    };
    Ok(tree)
}

fn yaml_number(number: &serde_yaml::Number) -> Scalar {
    if let Some(value) = number.as_i64() {
        Scalar::Int(value)
    } else if let Some(value) = number.as_u64() {
        Scalar::unsigned(value)
    } else {
        Scalar::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}

impl From<serde_json::Value> for DocumentTree {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Scalar::Null.into(),
            Value::Bool(flag) => Scalar::Bool(flag).into(),
            Value::Number(number) => json_number(&number).into(),
            Value::String(text) => Scalar::String(text).into(),
            Value::Array(items) => {
                DocumentTree::Sequence(items.into_iter().map(DocumentTree::from).collect())
            }
            Value::Object(entries) => DocumentTree::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, DocumentTree::from(value)))
                    .collect(),
            ),
        }
    }
}

fn json_number(number: &serde_json::Number) -> Scalar {
    if let Some(value) = number.as_i64() {
        Scalar::Int(value)
    } else if let Some(value) = number.as_u64() {
        Scalar::unsigned(value)
    } else {
        Scalar::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}
