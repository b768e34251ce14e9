use std::fs;
use std::io::Write;
use std::path;

use crate::error::*;

const BLOGCONF_YML: &str = "\
# SITENAME
site_name: DevSensation
# SITEURL, without a trailing slash; leave empty while developing
site_url: https://avisiedo.github.io/blog

# PATH, where the articles and pages live
content_path: content
# STATIC_PATHS, copied verbatim into the output
static_paths: [static, images]

# TIMEZONE, an IANA name
timezone: Europe/Madrid

# DEFAULT_LANG
default_language: en

# PLUGIN_PATHS and PLUGINS
plugin_search_paths: [plugins]
enabled_plugins: []
# enabled_plugins: [seo, readtime, plantuml]

# Feed generation is usually not desired when developing
feeds:
  # FEED_ALL_ATOM
  all_atom: null
  # CATEGORY_FEED_ATOM
  category_atom: null
  # TRANSLATION_FEED_ATOM
  translation_atom: null
  # AUTHOR_FEED_ATOM
  author_atom: null
  # AUTHOR_FEED_RSS
  author_rss: null

# LINKS, the blogroll
blogroll_links:
  - [Pelican, \"https://getpelican.com/\"]
  - [Python.org, \"https://www.python.org/\"]
  - [Jinja2, \"https://palletsprojects.com/p/jinja/\"]

# SOCIAL
social_links:
  - [github, \"https://github.com/avisiedo\"]
# SHOW_SOCIAL_ON_INDEX_PAGE_HEADER
show_social_on_index_header: true

# DEFAULT_PAGINATION
pagination_size: 10

# RELATIVE_URLS, document-relative URLs are handy when developing
relative_urls: true

# THEME, relative to this file; the bundled theme is used when unset
# theme_path: ./templates/blog-theme
# theme_options:
#   header_cover: static/header-cover.jpg
#   color_scheme_css: monokai.css
#   favicon: favicon.ico
";

const HELLO_MD: &str = "\
Title: Hello World
Date: 2024-01-01 10:00

Welcome to the first post.
";

const DIRECTORIES: &[&str] = &["content", "static", "images", "plugins"];

pub fn create_new_project<P: AsRef<path::Path>>(dest: P) -> Result<()> {
    create_new_project_for_path(dest.as_ref())
}

pub fn create_new_project_for_path(dest: &path::Path) -> Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let config_path = dest.join(blogconf_config::CONFIG_FILENAMES[0]);
    create_file(&config_path, BLOGCONF_YML)?;

    for dir in DIRECTORIES {
        let dir = dest.join(dir);
        log::trace!("Creating directory {:?}", dir);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    create_file(&dest.join("content/hello-world.md"), HELLO_MD)?;

    Ok(())
}

fn create_file<P: AsRef<path::Path>>(path: P, content: &str) -> Result<()> {
    create_file_for_path(path.as_ref(), content)
}

fn create_file_for_path(path: &path::Path, content: &str) -> Result<()> {
    log::trace!("Creating file {:?}", path);

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Failed to create file {}", path.display()))?;

    file.write_all(content.as_bytes())?;

    Ok(())
}
