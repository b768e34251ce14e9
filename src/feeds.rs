use std::path;

use blogconf_config::FeedKind;
use blogconf_config::SiteConfig;
use relative_path::RelativePathBuf;

use crate::error::*;

static PLACEHOLDER: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"\{[a-z_]+\}").unwrap());

/// A built file the generator should not have written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrayFeed {
    pub kind: FeedKind,
    pub path: RelativePathBuf,
}

impl std::fmt::Display for StrayFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} is disabled)", self.path, self.kind.setting_name())
    }
}

/// Look through a built site for feeds the configuration switches off.
///
/// A file counts when it matches the default location of a disabled feed kind and no enabled
/// kind claims it.
pub fn audit_output(config: &SiteConfig, dest: &path::Path) -> Result<Vec<StrayFeed>> {
    if !dest.is_dir() {
        anyhow::bail!("Output directory {} does not exist", dest.display());
    }

    let disabled = config
        .feeds
        .disabled_kinds()
        .filter_map(|kind| kind.default_template().map(|t| (kind, t)))
        .map(|(kind, template)| {
            let matcher = matcher(dest, [template])?;
            Ok((kind, literal_prefix(template), matcher))
        })
        .collect::<Result<Vec<_>>>()?;
    if disabled.is_empty() {
        log::debug!("No disabled feed has a default location");
        return Ok(Vec::new());
    }
    let enabled = matcher(
        dest,
        config.feeds.enabled().map(|(_, template)| template.as_str()),
    )?;

    let output = blogconf_core::Source::new(dest, [])?;
    let mut stray = Vec::new();
    for file in output.iter() {
        if enabled
            .matched_path_or_any_parents(&file.abs_path, false)
            .is_ignore()
        {
            continue;
        }
        // Most specific template wins, e.g. `all-{lang}` over `{slug}`
        let kind = disabled
            .iter()
            .filter(|(_, _, m)| {
                m.matched_path_or_any_parents(&file.abs_path, false)
                    .is_ignore()
            })
            .min_by_key(|(_, prefix, _)| std::cmp::Reverse(*prefix))
            .map(|(kind, _, _)| *kind);
        if let Some(kind) = kind {
            log::debug!("{} matches disabled {}", file.rel_path, kind.setting_name());
            stray.push(StrayFeed {
                kind,
                path: file.rel_path,
            });
        }
    }
    Ok(stray)
}

/// Glob for the files a path template expands to; placeholders match within one segment.
pub fn template_glob(template: &str) -> String {
    let glob = PLACEHOLDER.replace_all(template, "*");
    format!("/{}", glob.trim_start_matches('/'))
}

/// Length of the template before its first placeholder.
fn literal_prefix(template: &str) -> usize {
    template.find('{').unwrap_or(template.len())
}

fn matcher<'t>(
    dest: &path::Path,
    templates: impl IntoIterator<Item = &'t str>,
) -> Result<ignore::gitignore::Gitignore> {
    let mut builder = ignore::gitignore::GitignoreBuilder::new(dest);
    for template in templates {
        builder
            .add_line(None, &template_glob(template))
            .with_context(|| format!("Invalid feed template `{template}`"))?;
    }
    let matcher = builder.build()?;
    Ok(matcher)
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    fn touch(root: &path::Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn blog() -> SiteConfig {
        SiteConfig::from_file("tests/fixtures/blog/blogconf.yml").unwrap()
    }

    #[test]
    fn template_glob_placeholders() {
        assert_eq!(template_glob("feeds/{slug}.atom.xml"), "/feeds/*.atom.xml");
        assert_eq!(template_glob("feeds/all-{lang}.atom.xml"), "/feeds/all-*.atom.xml");
        assert_eq!(template_glob("/feeds/all.atom.xml"), "/feeds/all.atom.xml");
    }

    #[test]
    fn clean_output() {
        let dest = tempfile::tempdir().unwrap();
        touch(dest.path(), "index.html");
        touch(dest.path(), "posts/hello.html");
        touch(dest.path(), "theme/css/monokai.css");

        let actual = audit_output(&blog(), dest.path()).unwrap();
        assert_eq!(actual, Vec::new());
    }

    #[test]
    fn disabled_feeds_written() {
        let dest = tempfile::tempdir().unwrap();
        touch(dest.path(), "index.html");
        touch(dest.path(), "feeds/all.atom.xml");
        touch(dest.path(), "feeds/rust.rss.xml");
        touch(dest.path(), "feeds/all-es.atom.xml");

        let actual = audit_output(&blog(), dest.path()).unwrap();
        assert_eq!(
            actual,
            vec![
                StrayFeed {
                    kind: FeedKind::TranslationAtom,
                    path: RelativePathBuf::from("feeds/all-es.atom.xml"),
                },
                StrayFeed {
                    kind: FeedKind::AllAtom,
                    path: RelativePathBuf::from("feeds/all.atom.xml"),
                },
                StrayFeed {
                    kind: FeedKind::AuthorRss,
                    path: RelativePathBuf::from("feeds/rust.rss.xml"),
                },
            ]
        );
    }

    #[test]
    fn literal_prefix_before_placeholder() {
        assert_eq!(literal_prefix("feeds/{slug}.atom.xml"), 6);
        assert_eq!(literal_prefix("feeds/all-{lang}.atom.xml"), 10);
        assert_eq!(literal_prefix("feeds/all.atom.xml"), 18);
    }

    #[test]
    fn translation_feed_named_by_its_setting() {
        let dest = tempfile::tempdir().unwrap();
        touch(dest.path(), "feeds/all-es.atom.xml");

        let actual = audit_output(&blog(), dest.path()).unwrap();
        assert_eq!(actual.len(), 1);
        assert_eq!(
            actual[0].to_string(),
            "feeds/all-es.atom.xml (TRANSLATION_FEED_ATOM is disabled)"
        );
    }

    #[test]
    fn enabled_kind_claims_shared_location() {
        let dest = tempfile::tempdir().unwrap();
        touch(dest.path(), "feeds/rust.atom.xml");

        let mut config = blog();
        config.feeds.category_atom = Some(blogconf_config::RelPath::from_unchecked(
            "feeds/{slug}.atom.xml",
        ));
        let actual = audit_output(&config, dest.path()).unwrap();
        assert_eq!(actual, Vec::new());
    }

    #[test]
    fn defaults_have_nothing_disabled_to_find() {
        let dest = tempfile::tempdir().unwrap();
        touch(dest.path(), "feeds/all.atom.xml");

        let actual = audit_output(&SiteConfig::default(), dest.path()).unwrap();
        assert_eq!(actual, Vec::new());
    }

    #[test]
    fn missing_output() {
        let actual = audit_output(&blog(), path::Path::new("tests/fixtures/no-such-output"));
        assert!(actual.is_err());
    }
}
