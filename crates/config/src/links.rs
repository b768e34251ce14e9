use liquid_core::model::KString;

/// A `(label, URL)` pair rendered as a blogroll or social entry.
///
/// Written as a two element sequence, e.g. `[github, "https://github.com/avisiedo"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Link(pub KString, pub String);

impl Link {
    pub fn new(label: impl Into<KString>, url: impl Into<String>) -> Self {
        Self(label.into(), url.into())
    }

    pub fn label(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &str {
        self.1.as_str()
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.label(), self.url())
    }
}
