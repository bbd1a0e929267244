/// Format a source declares through the suffix of its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Yaml,
    Json,
    Unknown,
}

impl DocFormat {
    /// Classifies a location by suffix, ignoring any query string or fragment.
    pub fn from_location(location: &str) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_ascii_lowercase();
        if path.ends_with(".yml") || path.ends_with(".yaml") {
            DocFormat::Yaml
        } else if path.ends_with(".json") {
            DocFormat::Json
        } else {
            DocFormat::Unknown
        }
    }
}

/// One configured source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub location: String,
    pub format: DocFormat,
}

impl SourceDescriptor {
    pub fn new(location: impl Into<String>) -> Self {
        let location = location.into();
        let format = DocFormat::from_location(&location);
        Self { location, format }
    }
}
