use std::fmt;

/// A dot separated path such as `address.city`.
///
/// Each segment names a key one object level deeper. Segments are taken
/// literally: `""` is a single empty segment and `a..b` has an empty
/// middle segment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct JsonPath {
    segments: Vec<String>,
}

impl JsonPath {
    fn new(segments: Vec<String>) -> Self {
        JsonPath {
            segments
        }
    }

    pub fn parse(path_str: &str) -> Self {
        let segments = path_str.split('.').map(String::from).collect();
        JsonPath::new(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Splits into the parent segments and the target key.
    pub fn split_last(&self) -> (&[String], &str) {
        match self.segments.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&[], ""),
        }
    }

    /// The path formed by the first `depth` segments.
    pub fn prefix(&self, depth: usize) -> String {
        let depth = depth.min(self.segments.len());
        self.segments[..depth].join(".")
    }

    pub fn parent(&self) -> String {
        self.prefix(self.segments.len().saturating_sub(1))
    }
}

impl From<&str> for JsonPath {
    fn from(path_str: &str) -> Self {
        JsonPath::parse(path_str)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
