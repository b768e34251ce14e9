use liquid_core::model::KString;
use liquid_core::Object;
use liquid_core::Value;

use super::*;

/// Setting names the generator reads, paired with the field holding the value.
pub const SETTING_NAMES: &[(&str, &str)] = &[
    ("site_name", "SITENAME"),
    ("site_url", "SITEURL"),
    ("content_path", "PATH"),
    ("static_paths", "STATIC_PATHS"),
    ("timezone", "TIMEZONE"),
    ("default_language", "DEFAULT_LANG"),
    ("plugin_search_paths", "PLUGIN_PATHS"),
    ("enabled_plugins", "PLUGINS"),
    ("blogroll_links", "LINKS"),
    ("social_links", "SOCIAL"),
    (
        "show_social_on_index_header",
        "SHOW_SOCIAL_ON_INDEX_PAGE_HEADER",
    ),
    ("pagination_size", "DEFAULT_PAGINATION"),
    ("relative_urls", "RELATIVE_URLS"),
    ("theme_path", "THEME"),
];

/// Map a field name or setting name onto the setting name.
pub fn setting_name(name: &str) -> KString {
    let lower = name.to_ascii_lowercase();
    if let Some((_, setting)) = SETTING_NAMES.iter().find(|(field, _)| *field == lower) {
        return KString::from_static(*setting);
    }
    if let Some(kind) = FeedKind::ALL.into_iter().find(|k| k.key() == lower) {
        return KString::from_static(kind.setting_name());
    }
    KString::from(name.to_ascii_uppercase())
}

impl SiteConfig {
    /// The configuration as the read-only name/value mapping themes see.
    pub fn settings(&self) -> Object {
        let mut settings = Object::new();

        settings.insert("SITENAME".into(), Value::scalar(self.site_name.to_string()));
        settings.insert("SITEURL".into(), Value::scalar(self.site_url.clone()));
        settings.insert("PATH".into(), path_value(&self.content_path));
        settings.insert("STATIC_PATHS".into(), paths_value(&self.static_paths));
        settings.insert(
            "TIMEZONE".into(),
            self.timezone
                .as_ref()
                .map(|tz| Value::scalar(tz.to_string()))
                .unwrap_or(Value::Nil),
        );
        settings.insert(
            "DEFAULT_LANG".into(),
            Value::scalar(self.default_language.to_string()),
        );
        settings.insert(
            "PLUGIN_PATHS".into(),
            paths_value(&self.plugin_search_paths),
        );
        settings.insert(
            "PLUGINS".into(),
            Value::Array(
                self.enabled_plugins
                    .iter()
                    .map(|p| Value::scalar(p.to_string()))
                    .collect(),
            ),
        );
        for (kind, template) in self.feeds.iter() {
            settings.insert(
                kind.setting_name().into(),
                template.map(path_value).unwrap_or(Value::Nil),
            );
        }
        settings.insert("LINKS".into(), links_value(&self.blogroll_links));
        settings.insert("SOCIAL".into(), links_value(&self.social_links));
        settings.insert(
            "SHOW_SOCIAL_ON_INDEX_PAGE_HEADER".into(),
            Value::scalar(self.show_social_on_index_header),
        );
        settings.insert(
            "DEFAULT_PAGINATION".into(),
            self.pagination_size
                .map(|n| Value::scalar(i64::from(n.get())))
                .unwrap_or(Value::Nil),
        );
        settings.insert("RELATIVE_URLS".into(), Value::scalar(self.relative_urls));
        settings.insert(
            "THEME".into(),
            self.theme_path
                .as_ref()
                .map(path_value)
                .unwrap_or(Value::Nil),
        );

        settings.insert(
            "HEADER_COVER".into(),
            self.theme_options
                .header_cover
                .as_ref()
                .map(path_value)
                .unwrap_or(Value::Nil),
        );
        settings.insert(
            "COLOR_SCHEME_CSS".into(),
            self.theme_options
                .color_scheme_css
                .as_ref()
                .map(|css| Value::scalar(css.to_string()))
                .unwrap_or(Value::Nil),
        );
        settings.insert(
            "FAVICON".into(),
            self.theme_options
                .favicon
                .as_ref()
                .map(path_value)
                .unwrap_or(Value::Nil),
        );
        for (key, value) in self.theme_options.extra.iter() {
            let name = KString::from(key.to_ascii_uppercase());
            if settings.contains_key(name.as_str()) {
                log::warn!("Theme option `{key}` shadows setting {name}, ignoring it");
                continue;
            }
            settings.insert(name, value.clone());
        }

        settings
    }

    /// Look up one setting, e.g. `SITENAME` or `site_name`.
    ///
    /// Disabled feeds and unset optional settings read as nil; unknown names are `None`.
    /// The `feeds` and `theme_options` field names read as the whole group.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name.to_ascii_lowercase().as_str() {
            "feeds" => return Some(Value::Object(self.feeds_object())),
            "theme_options" => return Some(Value::Object(self.theme_object())),
            _ => {}
        }
        let key = setting_name(name);
        self.settings().get(key.as_str()).cloned()
    }

    fn feeds_object(&self) -> Object {
        self.feeds
            .iter()
            .map(|(kind, template)| {
                (
                    KString::from_static(kind.key()),
                    template.map(path_value).unwrap_or(Value::Nil),
                )
            })
            .collect()
    }

    fn theme_object(&self) -> Object {
        let theme = &self.theme_options;
        let mut object = theme.extra.clone();
        object.insert(
            "header_cover".into(),
            theme.header_cover.as_ref().map(path_value).unwrap_or(Value::Nil),
        );
        object.insert(
            "color_scheme_css".into(),
            theme
                .color_scheme_css
                .as_ref()
                .map(|css| Value::scalar(css.to_string()))
                .unwrap_or(Value::Nil),
        );
        object.insert(
            "favicon".into(),
            theme.favicon.as_ref().map(path_value).unwrap_or(Value::Nil),
        );
        object
    }
}

fn path_value(path: &RelPath) -> Value {
    Value::scalar(path.to_string())
}

fn paths_value(paths: &[RelPath]) -> Value {
    Value::Array(paths.iter().map(path_value).collect())
}

fn links_value(links: &[Link]) -> Value {
    Value::Array(
        links
            .iter()
            .map(|l| {
                Value::Array(vec![
                    Value::scalar(l.label().to_owned()),
                    Value::scalar(l.url().to_owned()),
                ])
            })
            .collect(),
    )
}
