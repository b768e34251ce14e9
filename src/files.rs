use blogconf_config::SiteConfig;
use blogconf_core::Source;
use blogconf_core::SourcePath;
use itertools::Itertools;

use crate::error::*;

/// Files the generator copies verbatim into the output, in `STATIC_PATHS` order.
///
/// Dot-files are skipped and a file reachable through two entries is listed once.
pub fn static_files(config: &SiteConfig) -> Result<Vec<SourcePath>> {
    let source = Source::new(&config.root, [blogconf_core::HIDDEN])?;
    let files = config
        .static_paths
        .iter()
        .flat_map(|static_path| {
            let start = config.resolve(static_path);
            if !start.exists() {
                log::warn!("Static path `{}` does not exist", static_path);
            }
            source.iter_from(&start).collect::<Vec<_>>()
        })
        .unique_by(|f| f.rel_path.clone())
        .collect();
    Ok(files)
}

/// Source files under `PATH`.
pub fn content_files(config: &SiteConfig) -> Result<Vec<SourcePath>> {
    let source = Source::new(&config.root, [blogconf_core::HIDDEN])?;
    let start = config.resolve(&config.content_path);
    Ok(source.iter_from(&start).collect())
}
