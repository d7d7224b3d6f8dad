use std::fmt;

/// An ordered list of key segments addressing a value in nested tables.
///
/// `["server", "tls", "cert"]` addresses `cert` inside the `tls` table inside
/// the `server` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a path from the legacy comma-joined form, e.g. `"server, port"`.
    ///
    /// Each segment is trimmed. Leading and trailing commas are dropped, so
    /// `"server, port,"` is `["server", "port"]` and `","` is an empty path.
    /// A doubled comma inside the string still yields an empty segment:
    /// `"a,,b"` is `["a", "", "b"]`.
    pub fn from_joined(joined: &str) -> Self {
        let joined = joined.trim_matches(|c: char| c == ',' || c.is_whitespace());
        if joined.is_empty() {
            return Self::default();
        }
        Self::new(joined.split(',').map(str::trim))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl AsRef<[String]> for KeyPath {
    fn as_ref(&self) -> &[String] {
        &self.segments
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
