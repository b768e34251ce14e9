use std::fmt;
use std::num::NonZeroU32;
use std::path;

use liquid_core::model::KString;

use super::*;

pub const CONFIG_FILENAMES: &[&str] = &["blogconf.yml", "blogconf.toml"];

/// Settings for one blog, as read by the generator.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct SiteConfig {
    /// Directory holding the configuration file; every path setting resolves under it.
    #[serde(skip)]
    pub root: path::PathBuf,
    pub site_name: KString,
    pub site_url: String,
    pub content_path: RelPath,
    pub static_paths: Vec<RelPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<KString>,
    pub default_language: KString,
    pub plugin_search_paths: Vec<RelPath>,
    pub enabled_plugins: Vec<KString>,
    pub feeds: Feeds,
    pub blogroll_links: Vec<Link>,
    pub social_links: Vec<Link>,
    pub show_social_on_index_header: bool,
    pub pagination_size: Option<NonZeroU32>,
    pub relative_urls: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_path: Option<RelPath>,
    #[serde(skip_serializing_if = "ThemeOptions::is_empty")]
    pub theme_options: ThemeOptions,
}

impl Default for SiteConfig {
    fn default() -> SiteConfig {
        SiteConfig {
            root: Default::default(),
            site_name: "A Pelican Blog".into(),
            site_url: Default::default(),
            content_path: RelPath::new(),
            static_paths: vec![RelPath::from_unchecked("images")],
            timezone: None,
            default_language: "en".into(),
            plugin_search_paths: Default::default(),
            enabled_plugins: Default::default(),
            feeds: Default::default(),
            blogroll_links: Default::default(),
            social_links: Default::default(),
            show_social_on_index_header: false,
            pagination_size: None,
            relative_urls: false,
            theme_path: None,
            theme_options: Default::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<SiteConfig> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<SiteConfig> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut config = Self::from_str_with_format(&content, Format::from_path(&path))
            .map_err(|e| e.context_with(|c| c.insert("Path", path.display().to_string())))?;

        let mut root = path;
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }
        config.root = root;

        Ok(config)
    }

    /// Parse configuration text; the result is rooted at the current directory.
    pub fn from_str_with_format(content: &str, format: Format) -> Result<SiteConfig> {
        let mut config = if content.trim().is_empty() {
            SiteConfig::default()
        } else {
            match format {
                Format::Yaml => serde_yaml::from_str(content)
                    .map_err(|e| Status::new("Failed to parse config").with_source(e))?,
                Format::Toml => toml::from_str(content)
                    .map_err(|e| Status::new("Failed to parse config").with_source(e))?,
            }
        };
        config.root = path::Path::new(".").to_owned();
        Ok(config)
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<SiteConfig> {
        Self::from_cwd_internal(cwd.into())
    }

    fn from_cwd_internal(cwd: path::PathBuf) -> Result<SiteConfig> {
        let file_path = find_project_file(&cwd, CONFIG_FILENAMES);
        let config = file_path
            .map(|p| {
                log::debug!("Using config file `{}`", p.display());
                Self::from_file(&p)
            })
            .unwrap_or_else(|| {
                log::warn!(
                    "No {} file found in current directory, using default config.",
                    CONFIG_FILENAMES.join(" or ")
                );
                let config = SiteConfig {
                    root: cwd,
                    ..Default::default()
                };
                Ok(config)
            })?;
        Ok(config)
    }

    pub fn resolve(&self, rel: &RelPath) -> path::PathBuf {
        rel.to_path(&self.root)
    }

    /// Directory the theme's stylesheets live in, when a theme is set.
    pub fn theme_css_dir(&self) -> Option<path::PathBuf> {
        self.theme_path
            .as_ref()
            .map(|theme| self.resolve(theme).join(ThemeOptions::CSS_DIR))
    }
}

impl fmt::Display for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", converted.trim_end())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Toml,
}

impl Format {
    pub fn from_path(path: &path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P, names: &[&str]) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), names)
}

fn find_project_file_internal(dir: path::PathBuf, names: &[&str]) -> Option<path::PathBuf> {
    let mut dir = dir;
    loop {
        if let Some(found) = names.iter().map(|n| dir.join(n)).find(|p| p.exists()) {
            return Some(found);
        }
        if !dir.pop() {
            return None;
        }
    }
}
