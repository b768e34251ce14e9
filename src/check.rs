//! Static checks of a loaded configuration against the project tree.
//!
//! Findings are collected into a [`Report`] rather than returned as errors, so one run lists
//! every problem.

use std::fmt;
use std::path;

use blogconf_config::Link;
use blogconf_config::RelPath;
use blogconf_config::SiteConfig;
use itertools::Itertools;
use liquid_core::model::KString;

use crate::plugins;

static TIMEZONE: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
    regex::Regex::new(r"^(UTC|GMT|[A-Z][A-Za-z_+-]*(/[A-Za-z0-9_+-]+){1,2})$").unwrap()
});

static LANGUAGE: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
    regex::Regex::new(r"^[a-z]{2,3}([-_][A-Za-z]{2,4})?$").unwrap()
});

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => "warning".fmt(f),
            Severity::Error => "error".fmt(f),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Setting name the finding is about, e.g. `STATIC_PATHS`.
    pub setting: KString,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.setting, self.message)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn error(&mut self, setting: &'static str, message: impl Into<String>) {
        self.push(Severity::Error, setting, message.into());
    }

    pub fn warning(&mut self, setting: &'static str, message: impl Into<String>) {
        self.push(Severity::Warning, setting, message.into());
    }

    fn push(&mut self, severity: Severity, setting: &'static str, message: String) {
        log::trace!("{severity}: {setting}: {message}");
        self.diagnostics.push(Diagnostic {
            severity,
            setting: KString::from_static(setting),
            message,
        });
    }

    /// No errors; warnings are allowed.
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn for_setting<'s>(&'s self, setting: &'s str) -> impl Iterator<Item = &'s Diagnostic> {
        self.iter().filter(move |d| d.setting.as_str() == setting)
    }
}

impl<'r> IntoIterator for &'r Report {
    type Item = &'r Diagnostic;
    type IntoIter = std::slice::Iter<'r, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

/// Run every check against `config`.
pub fn check_site(config: &SiteConfig) -> Report {
    let mut report = Report::new();
    check_site_url(config, &mut report);
    check_paths(config, &mut report);
    check_timezone(config, &mut report);
    check_language(config, &mut report);
    check_plugins(config, &mut report);
    check_links("LINKS", &config.blogroll_links, &mut report);
    check_links("SOCIAL", &config.social_links, &mut report);
    check_theme(config, &mut report);
    report
}

fn check_site_url(config: &SiteConfig, report: &mut Report) {
    let site_url = config.site_url.as_str();
    if site_url.is_empty() {
        report.warning("SITEURL", "not set; absolute links cannot be generated");
        return;
    }
    match url::Url::parse(site_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            if site_url.ends_with('/') {
                report.warning("SITEURL", format!("`{site_url}` should not end with `/`"));
            }
        }
        Ok(url) => report.error(
            "SITEURL",
            format!("`{site_url}` must be an http(s) URL, found scheme `{}`", url.scheme()),
        ),
        Err(e) => report.error("SITEURL", format!("`{site_url}` is not a valid URL: {e}")),
    }
}

fn check_paths(config: &SiteConfig, report: &mut Report) {
    let root = canonical_root(config);
    let root = root.as_deref();

    if let Some(path) = existing(config, root, "PATH", &config.content_path, report) {
        if !path.is_dir() {
            report.error(
                "PATH",
                format!("`{}` is not a directory", config.content_path),
            );
        }
    }

    for static_path in config.static_paths.iter().duplicates() {
        let count = config.static_paths.iter().filter(|p| *p == static_path).count();
        report.warning("STATIC_PATHS", format!("`{static_path}` is listed {count} times"));
    }
    for static_path in config.static_paths.iter().unique() {
        existing(config, root, "STATIC_PATHS", static_path, report);
    }

    for search_path in &config.plugin_search_paths {
        if let Some(path) = existing(config, root, "PLUGIN_PATHS", search_path, report) {
            if !path.is_dir() {
                report.error(
                    "PLUGIN_PATHS",
                    format!("`{search_path}` is not a directory"),
                );
            }
        }
    }

    if let Some(cover) = &config.theme_options.header_cover {
        existing(config, root, "HEADER_COVER", cover, report);
    }
    if let Some(favicon) = &config.theme_options.favicon {
        existing(config, root, "FAVICON", favicon, report);
    }
}

fn check_theme(config: &SiteConfig, report: &mut Report) {
    let root = canonical_root(config);
    let root = root.as_deref();
    let theme = config
        .theme_path
        .as_ref()
        .and_then(|theme| existing(config, root, "THEME", theme, report));

    if let Some(theme) = &theme {
        if !theme.is_dir() {
            report.error("THEME", "is not a directory");
        } else if !theme.join("templates").is_dir() {
            report.warning("THEME", "has no `templates` directory");
        }
    }

    let Some(css) = &config.theme_options.color_scheme_css else {
        return;
    };
    if config.theme_path.is_none() {
        report.warning(
            "COLOR_SCHEME_CSS",
            format!("`{css}` is set but THEME is not; the bundled theme ignores it"),
        );
        return;
    }
    if theme.is_none() {
        // Already reported as a missing THEME
        return;
    }
    let Some(css_dir) = config.theme_css_dir() else {
        return;
    };
    let stylesheet = css_dir.join(css.as_str());
    if !stylesheet.is_file() {
        report.error(
            "COLOR_SCHEME_CSS",
            format!(
                "`{css}` not found in {}",
                blogconf_config::ThemeOptions::CSS_DIR
            ),
        );
    }
}

fn check_timezone(config: &SiteConfig, report: &mut Report) {
    match &config.timezone {
        None => report.warning("TIMEZONE", "not set; the generator assumes UTC"),
        Some(tz) if !TIMEZONE.is_match(tz) => {
            report.error("TIMEZONE", format!("`{tz}` is not an IANA timezone name"));
        }
        Some(_) => {}
    }
}

fn check_language(config: &SiteConfig, report: &mut Report) {
    let lang = config.default_language.as_str();
    if !LANGUAGE.is_match(lang) {
        report.error("DEFAULT_LANG", format!("`{lang}` is not an ISO language code"));
    }
}

fn check_plugins(config: &SiteConfig, report: &mut Report) {
    for name in config.enabled_plugins.iter().duplicates() {
        let count = config.enabled_plugins.iter().filter(|n| *n == name).count();
        report.warning("PLUGINS", format!("`{name}` is listed {count} times"));
    }
    for name in config.enabled_plugins.iter().unique() {
        if name.trim().is_empty() {
            report.error("PLUGINS", "empty plugin name");
            continue;
        }
        match plugins::locate(config, name) {
            Some(plugin) => log::debug!("Plugin `{}` found at {:?}", name, plugin.path),
            None => {
                let searched = if config.plugin_search_paths.is_empty() {
                    "no PLUGIN_PATHS configured".to_owned()
                } else {
                    format!(
                        "searched {}",
                        config.plugin_search_paths.iter().map(|p| format!("`{p}`")).join(", ")
                    )
                };
                report.error("PLUGINS", format!("`{name}` not found ({searched})"));
            }
        }
    }
}

fn check_links(setting: &'static str, links: &[Link], report: &mut Report) {
    for (index, link) in links.iter().enumerate() {
        if link.label().trim().is_empty() {
            report.error(setting, format!("entry {index} has an empty label"));
        }
        match url::Url::parse(link.url()) {
            Ok(url) if url.cannot_be_a_base() || url.has_host() => {}
            Ok(_) => report.error(
                setting,
                format!("`{}` for `{}` has no host", link.url(), link.label()),
            ),
            Err(e) => report.error(
                setting,
                format!("`{}` for `{}` is not a valid URL: {e}", link.url(), link.label()),
            ),
        }
    }
}

fn canonical_root(config: &SiteConfig) -> Option<path::PathBuf> {
    dunce::canonicalize(&config.root).ok()
}

/// Resolve `rel`, reporting it when missing or when a link leads out of the root.
fn existing(
    config: &SiteConfig,
    root: Option<&path::Path>,
    setting: &'static str,
    rel: &RelPath,
    report: &mut Report,
) -> Option<path::PathBuf> {
    let path = config.resolve(rel);
    let Ok(canonical) = dunce::canonicalize(&path) else {
        report.error(setting, format!("`{rel}` does not exist"));
        return None;
    };
    if let Some(root) = root {
        if !canonical.starts_with(root) {
            report.error(setting, format!("`{rel}` resolves outside the project root"));
            return None;
        }
    }
    Some(path)
}

#[cfg(test)]
mod test {
    use super::*;

    fn blog() -> SiteConfig {
        SiteConfig::from_file("tests/fixtures/blog/blogconf.yml").unwrap()
    }

    fn broken() -> SiteConfig {
        SiteConfig::from_file("tests/fixtures/broken/blogconf.yml").unwrap()
    }

    fn messages<'r>(report: &'r Report, setting: &'r str) -> Vec<&'r str> {
        report
            .for_setting(setting)
            .map(|d| d.message.as_str())
            .collect()
    }

    #[test]
    fn blog_is_clean() {
        let report = check_site(&blog());
        assert!(report.is_empty(), "{report:#?}");
        assert!(report.is_ok());
    }

    #[test]
    fn broken_has_errors() {
        let report = check_site(&broken());
        assert!(!report.is_ok());
    }

    #[test]
    fn missing_static_path() {
        let report = check_site(&broken());
        assert_eq!(
            messages(&report, "STATIC_PATHS"),
            ["`static` is listed 2 times", "`images` does not exist"]
        );
    }

    #[test]
    fn missing_plugin() {
        let report = check_site(&broken());
        assert_eq!(
            messages(&report, "PLUGINS"),
            ["`sitemap` not found (searched `plugins`)"]
        );
    }

    #[test]
    fn missing_content_dir() {
        let report = check_site(&broken());
        assert_eq!(messages(&report, "PATH"), ["`posts` does not exist"]);
    }

    #[test]
    fn malformed_links() {
        let report = check_site(&broken());
        let actual = messages(&report, "SOCIAL");
        assert_eq!(actual.len(), 2);
        assert_eq!(actual[0], "entry 0 has an empty label");
        assert!(actual[1].starts_with("`not a url` for `twitter` is not a valid URL"));
    }

    #[test]
    fn bad_timezone_and_language() {
        let report = check_site(&broken());
        assert_eq!(
            messages(&report, "TIMEZONE"),
            ["`Madrid time` is not an IANA timezone name"]
        );
        assert_eq!(
            messages(&report, "DEFAULT_LANG"),
            ["`English` is not an ISO language code"]
        );
    }

    #[test]
    fn missing_theme_skips_stylesheet() {
        let report = check_site(&broken());
        assert_eq!(messages(&report, "THEME"), ["`templates/missing-theme` does not exist"]);
        assert_eq!(messages(&report, "COLOR_SCHEME_CSS"), Vec::<&str>::new());
    }

    #[test]
    fn site_url_scheme() {
        let report = check_site(&broken());
        assert_eq!(
            messages(&report, "SITEURL"),
            ["`ftp://example.com/blog` must be an http(s) URL, found scheme `ftp`"]
        );
    }

    #[test]
    fn empty_site_url_warns() {
        let config = SiteConfig {
            site_url: String::new(),
            ..blog()
        };
        let report = check_site(&config);
        assert!(report.is_ok());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn trailing_slash_warns() {
        let config = SiteConfig {
            site_url: "https://avisiedo.github.io/blog/".to_owned(),
            ..blog()
        };
        let report = check_site(&config);
        assert!(report.is_ok());
        assert_eq!(
            messages(&report, "SITEURL"),
            ["`https://avisiedo.github.io/blog/` should not end with `/`"]
        );
    }

    #[test]
    fn stylesheet_without_theme_warns() {
        let mut config = blog();
        config.theme_path = None;
        let report = check_site(&config);
        assert!(report.is_ok());
        assert_eq!(messages(&report, "COLOR_SCHEME_CSS").len(), 1);
    }

    #[test]
    fn timezone_names() {
        for tz in ["UTC", "Europe/Madrid", "America/Argentina/Buenos_Aires", "Etc/GMT+1"] {
            assert!(TIMEZONE.is_match(tz), "{tz}");
        }
        for tz in ["", "europe/madrid", "Europe/", "CET time"] {
            assert!(!TIMEZONE.is_match(tz), "{tz}");
        }
    }

    #[test]
    fn language_codes() {
        for lang in ["en", "es", "pt-BR", "zh_Hant", "ast"] {
            assert!(LANGUAGE.is_match(lang), "{lang}");
        }
        for lang in ["", "EN", "english", "e"] {
            assert!(!LANGUAGE.is_match(lang), "{lang}");
        }
    }

    const PROJECT: &str = "\
site_url: https://example.com/blog
content_path: content
static_paths: [static]
timezone: UTC
plugin_search_paths: [plugins]
theme_path: theme
theme_options:
  header_cover: static/cover.jpg
  color_scheme_css: monokai.css
  favicon: favicon.ico
";

    fn touch(root: &path::Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    /// A complete project in `root`; tests remove pieces to break it.
    fn project(root: &path::Path) -> SiteConfig {
        std::fs::create_dir_all(root.join("content")).unwrap();
        std::fs::create_dir_all(root.join("plugins")).unwrap();
        std::fs::create_dir_all(root.join("theme/templates")).unwrap();
        touch(root, "static/cover.jpg");
        touch(root, "favicon.ico");
        touch(root, "theme/static/css/monokai.css");
        std::fs::write(root.join("blogconf.yml"), PROJECT).unwrap();
        SiteConfig::from_file(root.join("blogconf.yml")).unwrap()
    }

    #[test]
    fn project_is_clean() {
        let root = tempfile::tempdir().unwrap();
        let report = check_site(&project(root.path()));
        assert!(report.is_empty(), "{report:#?}");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_out_of_root() {
        let root = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let config = project(root.path());
        std::fs::remove_dir_all(root.path().join("static")).unwrap();
        std::os::unix::fs::symlink(outside.path(), root.path().join("static")).unwrap();
        touch(outside.path(), "cover.jpg");

        let report = check_site(&config);
        assert_eq!(
            messages(&report, "STATIC_PATHS"),
            ["`static` resolves outside the project root"]
        );
        assert_eq!(
            messages(&report, "HEADER_COVER"),
            ["`static/cover.jpg` resolves outside the project root"]
        );
    }

    #[test]
    fn missing_header_cover_and_favicon() {
        let root = tempfile::tempdir().unwrap();
        let config = project(root.path());
        std::fs::remove_file(root.path().join("static/cover.jpg")).unwrap();
        std::fs::remove_file(root.path().join("favicon.ico")).unwrap();

        let report = check_site(&config);
        assert_eq!(
            messages(&report, "HEADER_COVER"),
            ["`static/cover.jpg` does not exist"]
        );
        assert_eq!(messages(&report, "FAVICON"), ["`favicon.ico` does not exist"]);
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn missing_stylesheet_in_theme() {
        let root = tempfile::tempdir().unwrap();
        let config = project(root.path());
        std::fs::remove_file(root.path().join("theme/static/css/monokai.css")).unwrap();

        let report = check_site(&config);
        assert_eq!(
            messages(&report, "COLOR_SCHEME_CSS"),
            ["`monokai.css` not found in static/css"]
        );
        assert_eq!(messages(&report, "THEME"), Vec::<&str>::new());
    }

    #[test]
    fn theme_without_templates() {
        let root = tempfile::tempdir().unwrap();
        let config = project(root.path());
        std::fs::remove_dir(root.path().join("theme/templates")).unwrap();

        let report = check_site(&config);
        assert!(report.is_ok());
        assert_eq!(
            messages(&report, "THEME"),
            ["has no `templates` directory"]
        );
    }

    #[test]
    fn theme_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        let config = project(root.path());
        std::fs::remove_dir_all(root.path().join("theme")).unwrap();
        touch(root.path(), "theme");

        let report = check_site(&config);
        assert_eq!(messages(&report, "THEME"), ["is not a directory"]);
    }

    #[test]
    fn content_and_plugin_paths_are_files() {
        let root = tempfile::tempdir().unwrap();
        let config = project(root.path());
        std::fs::remove_dir(root.path().join("content")).unwrap();
        std::fs::remove_dir(root.path().join("plugins")).unwrap();
        touch(root.path(), "content");
        touch(root.path(), "plugins");

        let report = check_site(&config);
        assert_eq!(messages(&report, "PATH"), ["`content` is not a directory"]);
        assert_eq!(
            messages(&report, "PLUGIN_PATHS"),
            ["`plugins` is not a directory"]
        );
    }

    #[test]
    fn diagnostic_display() {
        let mut report = Report::new();
        report.error("PLUGINS", "`seo` not found");
        let actual = report.iter().next().unwrap().to_string();
        assert_eq!(actual, "error: PLUGINS: `seo` not found");
    }
}
