use std::io::Write;

use blogconf::SiteConfig;

use crate::error::*;

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config file to use [default: blogconf.yml, searched upwards]
    #[arg(short, long, value_name = "FILE")]
    config: Option<std::path::PathBuf>,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<SiteConfig> {
        let config = if let Some(config_path) = self.config.as_deref() {
            SiteConfig::from_file(config_path).with_context(|| {
                format!("Error reading config file {}", config_path.display())
            })?
        } else {
            let cwd = std::env::current_dir().context("Current directory is unavailable")?;
            SiteConfig::from_cwd(cwd)?
        };
        log::debug!("Project root: {}", config.root.display());

        Ok(config)
    }
}

pub(crate) fn init_logging(level: log::LevelFilter, colored: bool) {
    if level == log::LevelFilter::Off {
        return;
    }

    let palette = if colored {
        Palette::colored()
    } else {
        Palette::plain()
    };

    let mut builder = env_logger::Builder::new();
    builder.write_style(if colored {
        env_logger::WriteStyle::Always
    } else {
        env_logger::WriteStyle::Never
    });
    builder.filter(None, level);

    if level == log::LevelFilter::Trace {
        builder.format_timestamp_secs();
    } else {
        builder.format(move |f, record| {
            let style = match record.level() {
                log::Level::Error => palette.error,
                log::Level::Warn => palette.warn,
                log::Level::Info => return writeln!(f, "{}", record.args()),
                log::Level::Debug => palette.debug,
                log::Level::Trace => palette.trace,
            };
            let level = record.level().to_string().to_lowercase();
            writeln!(
                f,
                "{}{level}{}: {}",
                style.render(),
                style.render_reset(),
                record.args()
            )
        });
    }

    builder.init();
}

#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct Palette {
    pub(crate) error: anstyle::Style,
    pub(crate) warn: anstyle::Style,
    pub(crate) debug: anstyle::Style,
    pub(crate) trace: anstyle::Style,
}

impl Palette {
    pub(crate) fn colored() -> Self {
        Self {
            error: anstyle::AnsiColor::Red.on_default() | anstyle::Effects::BOLD,
            warn: anstyle::AnsiColor::Yellow.on_default(),
            debug: anstyle::AnsiColor::Blue.on_default(),
            trace: anstyle::AnsiColor::Cyan.on_default(),
        }
    }

    pub(crate) fn plain() -> Self {
        Self::default()
    }
}
