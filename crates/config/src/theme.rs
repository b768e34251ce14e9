use liquid_core::model::KString;

/// Options handed to the theme's templates untouched.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct ThemeOptions {
    /// Banner image, relative to the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_cover: Option<crate::RelPath>,
    /// Stylesheet name inside the theme's `static/css` directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scheme_css: Option<KString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<crate::RelPath>,
    #[serde(flatten)]
    pub extra: liquid_core::Object,
}

impl ThemeOptions {
    pub const CSS_DIR: &'static str = "static/css";

    pub fn is_empty(&self) -> bool {
        self.header_cover.is_none()
            && self.color_scheme_css.is_none()
            && self.favicon.is_none()
            && self.extra.is_empty()
    }
}
