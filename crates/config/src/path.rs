use relative_path::Component;
use relative_path::RelativePath;
use relative_path::RelativePathBuf;

/// A normalized path relative to the project root.
///
/// Absolute paths and paths that climb out of the root are rejected when parsed.
#[derive(Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct RelPath(RelativePathBuf);

impl RelPath {
    /// The project root itself.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_unchecked<S: AsRef<str>>(value: S) -> Self {
        Self(RelativePathBuf::from(value.as_ref()).normalize())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_path(&self) -> &RelativePath {
        self.0.as_relative_path()
    }

    pub fn is_root(&self) -> bool {
        self.0.as_str().is_empty()
    }

    /// Resolve against the project root on disk.
    pub fn to_path(&self, root: &std::path::Path) -> std::path::PathBuf {
        self.0.to_path(root)
    }

    pub fn join(&self, other: &str) -> Result<Self, &'static str> {
        Self::try_from(self.0.join(other).as_str())
    }

    pub fn into_inner(self) -> RelativePathBuf {
        self.0
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            ".".fmt(f)
        } else {
            self.0.fmt(f)
        }
    }
}

impl AsRef<str> for RelPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::ops::Deref for RelPath {
    type Target = RelativePath;

    fn deref(&self) -> &RelativePath {
        self.as_path()
    }
}

impl TryFrom<&str> for RelPath {
    type Error = &'static str;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // `RelativePathBuf` would quietly treat these as relative
        if value.starts_with('/') || value.starts_with('\\') || has_drive_prefix(value) {
            return Err("Absolute paths are not supported");
        }
        let normalized = RelativePathBuf::from(value).normalize();
        if normalized
            .components()
            .next()
            .is_some_and(|c| c == Component::ParentDir)
        {
            return Err("Path escapes the project root");
        }
        Ok(Self(normalized))
    }
}

impl TryFrom<String> for RelPath {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<RelPath> for String {
    fn from(value: RelPath) -> Self {
        value.to_string()
    }
}

fn has_drive_prefix(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}
