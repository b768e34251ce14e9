use crate::RelPath;

/// Kinds of syndication output the generator can produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    AllAtom,
    AllRss,
    CategoryAtom,
    CategoryRss,
    TranslationAtom,
    TranslationRss,
    AuthorAtom,
    AuthorRss,
    TagAtom,
    TagRss,
}

impl FeedKind {
    pub const ALL: [FeedKind; 10] = [
        FeedKind::AllAtom,
        FeedKind::AllRss,
        FeedKind::CategoryAtom,
        FeedKind::CategoryRss,
        FeedKind::TranslationAtom,
        FeedKind::TranslationRss,
        FeedKind::AuthorAtom,
        FeedKind::AuthorRss,
        FeedKind::TagAtom,
        FeedKind::TagRss,
    ];

    /// Key used in the configuration file.
    pub fn key(self) -> &'static str {
        match self {
            FeedKind::AllAtom => "all_atom",
            FeedKind::AllRss => "all_rss",
            FeedKind::CategoryAtom => "category_atom",
            FeedKind::CategoryRss => "category_rss",
            FeedKind::TranslationAtom => "translation_atom",
            FeedKind::TranslationRss => "translation_rss",
            FeedKind::AuthorAtom => "author_atom",
            FeedKind::AuthorRss => "author_rss",
            FeedKind::TagAtom => "tag_atom",
            FeedKind::TagRss => "tag_rss",
        }
    }

    /// Name the generator knows this setting by.
    pub fn setting_name(self) -> &'static str {
        match self {
            FeedKind::AllAtom => "FEED_ALL_ATOM",
            FeedKind::AllRss => "FEED_ALL_RSS",
            FeedKind::CategoryAtom => "CATEGORY_FEED_ATOM",
            FeedKind::CategoryRss => "CATEGORY_FEED_RSS",
            FeedKind::TranslationAtom => "TRANSLATION_FEED_ATOM",
            FeedKind::TranslationRss => "TRANSLATION_FEED_RSS",
            FeedKind::AuthorAtom => "AUTHOR_FEED_ATOM",
            FeedKind::AuthorRss => "AUTHOR_FEED_RSS",
            FeedKind::TagAtom => "TAG_FEED_ATOM",
            FeedKind::TagRss => "TAG_FEED_RSS",
        }
    }

    /// Path template the generator writes to when the setting is absent.
    pub fn default_template(self) -> Option<&'static str> {
        match self {
            FeedKind::AllAtom => Some("feeds/all.atom.xml"),
            FeedKind::CategoryAtom => Some("feeds/{slug}.atom.xml"),
            FeedKind::TranslationAtom => Some("feeds/all-{lang}.atom.xml"),
            FeedKind::AuthorAtom => Some("feeds/{slug}.atom.xml"),
            FeedKind::AuthorRss => Some("feeds/{slug}.rss.xml"),
            FeedKind::AllRss
            | FeedKind::CategoryRss
            | FeedKind::TranslationRss
            | FeedKind::TagAtom
            | FeedKind::TagRss => None,
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.key().fmt(f)
    }
}

/// Output path template per feed kind; `None` disables the kind.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Feeds {
    #[serde(deserialize_with = "feed_toggle")]
    pub all_atom: Option<RelPath>,
    #[serde(deserialize_with = "feed_toggle")]
    pub all_rss: Option<RelPath>,
    #[serde(deserialize_with = "feed_toggle")]
    pub category_atom: Option<RelPath>,
    #[serde(deserialize_with = "feed_toggle")]
    pub category_rss: Option<RelPath>,
    #[serde(deserialize_with = "feed_toggle")]
    pub translation_atom: Option<RelPath>,
    #[serde(deserialize_with = "feed_toggle")]
    pub translation_rss: Option<RelPath>,
    #[serde(deserialize_with = "feed_toggle")]
    pub author_atom: Option<RelPath>,
    #[serde(deserialize_with = "feed_toggle")]
    pub author_rss: Option<RelPath>,
    #[serde(deserialize_with = "feed_toggle")]
    pub tag_atom: Option<RelPath>,
    #[serde(deserialize_with = "feed_toggle")]
    pub tag_rss: Option<RelPath>,
}

impl Default for Feeds {
    fn default() -> Self {
        let template = |kind: FeedKind| kind.default_template().map(RelPath::from_unchecked);
        Self {
            all_atom: template(FeedKind::AllAtom),
            all_rss: template(FeedKind::AllRss),
            category_atom: template(FeedKind::CategoryAtom),
            category_rss: template(FeedKind::CategoryRss),
            translation_atom: template(FeedKind::TranslationAtom),
            translation_rss: template(FeedKind::TranslationRss),
            author_atom: template(FeedKind::AuthorAtom),
            author_rss: template(FeedKind::AuthorRss),
            tag_atom: template(FeedKind::TagAtom),
            tag_rss: template(FeedKind::TagRss),
        }
    }
}

impl Feeds {
    /// Every kind switched off.
    pub fn disabled() -> Self {
        Self {
            all_atom: None,
            all_rss: None,
            category_atom: None,
            category_rss: None,
            translation_atom: None,
            translation_rss: None,
            author_atom: None,
            author_rss: None,
            tag_atom: None,
            tag_rss: None,
        }
    }

    pub fn get(&self, kind: FeedKind) -> Option<&RelPath> {
        match kind {
            FeedKind::AllAtom => self.all_atom.as_ref(),
            FeedKind::AllRss => self.all_rss.as_ref(),
            FeedKind::CategoryAtom => self.category_atom.as_ref(),
            FeedKind::CategoryRss => self.category_rss.as_ref(),
            FeedKind::TranslationAtom => self.translation_atom.as_ref(),
            FeedKind::TranslationRss => self.translation_rss.as_ref(),
            FeedKind::AuthorAtom => self.author_atom.as_ref(),
            FeedKind::AuthorRss => self.author_rss.as_ref(),
            FeedKind::TagAtom => self.tag_atom.as_ref(),
            FeedKind::TagRss => self.tag_rss.as_ref(),
        }
    }

    pub fn is_enabled(&self, kind: FeedKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeedKind, Option<&RelPath>)> + '_ {
        FeedKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn enabled(&self) -> impl Iterator<Item = (FeedKind, &RelPath)> + '_ {
        self.iter()
            .filter_map(|(kind, template)| template.map(|t| (kind, t)))
    }

    pub fn disabled_kinds(&self) -> impl Iterator<Item = FeedKind> + '_ {
        self.iter()
            .filter(|(_, template)| template.is_none())
            .map(|(kind, _)| kind)
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Toggle {
    Template(RelPath),
    Flag(bool),
}

// TOML has no null, so `false` disables a feed as well.
fn feed_toggle<'de, D>(deserializer: D) -> Result<Option<RelPath>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    match Option::<Toggle>::deserialize(deserializer)? {
        None | Some(Toggle::Flag(false)) => Ok(None),
        Some(Toggle::Template(template)) => Ok(Some(template)),
        Some(Toggle::Flag(true)) => Err(serde::de::Error::custom(
            "expected a feed path template, `false` or null",
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn absent_keeps_default() {
        let actual: Feeds = serde_yaml::from_str("all_rss: feeds/all.rss.xml").unwrap();
        assert_eq!(
            actual.all_atom,
            Some(RelPath::from_unchecked("feeds/all.atom.xml"))
        );
        assert_eq!(
            actual.all_rss,
            Some(RelPath::from_unchecked("feeds/all.rss.xml"))
        );
    }

    #[test]
    fn null_disables() {
        let actual: Feeds = serde_yaml::from_str("all_atom: null\nauthor_rss: ~").unwrap();
        assert_eq!(actual.all_atom, None);
        assert_eq!(actual.author_rss, None);
        assert!(actual.is_enabled(FeedKind::CategoryAtom));
    }

    #[test]
    fn false_disables() {
        let actual: Feeds = toml::from_str("category_atom = false").unwrap();
        assert_eq!(actual.category_atom, None);
    }

    #[test]
    fn true_is_rejected() {
        let actual: Result<Feeds, _> = serde_yaml::from_str("all_atom: true");
        assert!(actual.is_err());
    }

    #[test]
    fn disabled_kinds_in_order() {
        let feeds = Feeds {
            all_atom: Some(RelPath::from_unchecked("feeds/all.atom.xml")),
            ..Feeds::disabled()
        };
        let actual: Vec<_> = feeds.disabled_kinds().collect();
        assert_eq!(actual.len(), FeedKind::ALL.len() - 1);
        assert_eq!(actual[0], FeedKind::AllRss);
    }
}
