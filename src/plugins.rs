use std::path;

use blogconf_config::RelPath;
use blogconf_config::SiteConfig;

use crate::error::*;

/// A plugin the generator would be able to load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plugin {
    pub name: String,
    pub search_path: RelPath,
    pub path: path::PathBuf,
}

/// Find `name` under the configured search paths, first search path wins.
///
/// A plugin is either a package directory `<search_path>/<name>/` or a module file
/// `<search_path>/<name>.<ext>`.  Dotted names map onto nested directories, so
/// `pelican.plugins.seo` is looked up as `pelican/plugins/seo`.
pub fn locate(config: &SiteConfig, name: &str) -> Option<Plugin> {
    let segments: Vec<_> = name.split('.').collect();
    if segments.iter().any(|s| s.is_empty() || is_hidden(s)) {
        return None;
    }
    let (leaf, parents) = segments.split_last()?;

    config.plugin_search_paths.iter().find_map(|search_path| {
        let mut dir = config.resolve(search_path);
        dir.extend(parents);
        let package = dir.join(leaf);
        if package.is_dir() {
            return Some(Plugin {
                name: name.to_owned(),
                search_path: search_path.clone(),
                path: package,
            });
        }
        module_file(&dir, leaf).map(|path| Plugin {
            name: name.to_owned(),
            search_path: search_path.clone(),
            path,
        })
    })
}

/// Every plugin available under the search paths, shadowed names dropped.
pub fn discover(config: &SiteConfig) -> Result<Vec<Plugin>> {
    let mut plugins: Vec<Plugin> = Vec::new();
    for search_path in &config.plugin_search_paths {
        let dir = config.resolve(search_path);
        if !dir.is_dir() {
            log::debug!("Skipping missing plugin path {:?}", dir);
            continue;
        }
        for entry in walkdir::WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry =
                entry.with_context(|| format!("Failed to read plugin path {}", dir.display()))?;
            let Some(name) = plugin_name(&entry) else {
                continue;
            };
            if plugins.iter().any(|p| p.name == name) {
                log::debug!("Plugin `{}` at {:?} is shadowed", name, entry.path());
                continue;
            }
            plugins.push(Plugin {
                name,
                search_path: search_path.clone(),
                path: entry.into_path(),
            });
        }
    }
    Ok(plugins)
}

fn plugin_name(entry: &walkdir::DirEntry) -> Option<String> {
    let file_name = entry.file_name().to_str()?;
    if is_hidden(file_name) {
        return None;
    }
    if entry.file_type().is_dir() {
        Some(file_name.to_owned())
    } else {
        let (stem, ext) = file_name.rsplit_once('.')?;
        (!stem.is_empty() && !ext.is_empty()).then(|| stem.to_owned())
    }
}

fn module_file(dir: &path::Path, stem: &str) -> Option<path::PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut candidates: Vec<_> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_stem().and_then(|s| s.to_str()) == Some(stem) && p.extension().is_some()
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

// Python leaves `__pycache__` next to modules
fn is_hidden(name: &str) -> bool {
    name.starts_with('.') || name.starts_with("__")
}

#[cfg(test)]
mod test {
    use super::*;

    fn blog() -> SiteConfig {
        SiteConfig::from_file("tests/fixtures/blog/blogconf.yml").unwrap()
    }

    #[test]
    fn locate_package_dir() {
        let actual = locate(&blog(), "seo").unwrap();
        assert_eq!(actual.search_path.as_str(), "plugins");
        assert!(actual.path.ends_with("plugins/seo"));
    }

    #[test]
    fn locate_module_file() {
        let actual = locate(&blog(), "readtime").unwrap();
        assert!(actual.path.ends_with("plugins/readtime.py"));
    }

    #[test]
    fn locate_every_enabled_plugin() {
        let config = blog();
        for name in &config.enabled_plugins {
            assert!(locate(&config, name).is_some(), "{name} not found");
        }
    }

    #[test]
    fn locate_missing() {
        assert_eq!(locate(&blog(), "sitemap"), None);
        assert_eq!(locate(&blog(), ""), None);
        assert_eq!(locate(&blog(), "seo."), None);
    }

    #[test]
    fn locate_pycache_is_not_a_plugin() {
        assert_eq!(locate(&blog(), "__pycache__"), None);
    }

    #[test]
    fn discover_sorted_by_name() {
        let actual: Vec<_> = discover(&blog())
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(actual, ["plantuml", "readtime", "seo"]);
    }

    #[test]
    fn discover_without_search_paths() {
        let config = SiteConfig::default();
        assert_eq!(discover(&config).unwrap(), Vec::new());
    }
}
