//! Load, inspect and statically check the configuration of a generated blog.
//!
//! The model itself lives in [`blogconf_config`]; this crate adds the checks that need the
//! filesystem: whether paths exist, whether plugins can be found, and whether a built site
//! honoured the feeds the configuration switches off.

pub mod check;
pub mod error;
pub mod feeds;
pub mod files;
pub mod new;
pub mod plugins;

pub use blogconf_config as config;
pub use blogconf_config::SiteConfig;

pub use crate::check::{Diagnostic, Report, Severity, check_site};
pub use crate::error::Error;
pub use crate::new::create_new_project;
