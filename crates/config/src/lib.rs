//! Site configuration for a statically generated blog.
//!
//! The configuration is loaded once from `blogconf.yml` (or `blogconf.toml`) and never mutated
//! afterwards.  [`SiteConfig::settings`] exposes it as the flat name/value mapping the generator
//! and its theme consume.

mod config;
mod feeds;
mod links;
mod settings;
mod theme;

pub mod path;

pub use self::config::*;
pub use self::feeds::*;
pub use self::links::*;
pub use self::path::RelPath;
pub use self::settings::*;
pub use self::theme::*;

type Status = status::Status;
type Result<T, E = Status> = std::result::Result<T, E>;
