use std::io::Write as _;

use blogconf::Severity;

use crate::args;
use crate::error::*;

/// Check that the configured paths, plugins and links hold up
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CheckArgs {
    /// Fail on warnings as well
    #[arg(long)]
    pub(crate) deny_warnings: bool,

    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let report = blogconf::check_site(&config);

        let error = anstyle::AnsiColor::Red.on_default() | anstyle::Effects::BOLD;
        let warning = anstyle::AnsiColor::Yellow.on_default();
        let mut stdout = anstream::stdout().lock();
        for diagnostic in &report {
            let style = match diagnostic.severity {
                Severity::Error => error,
                Severity::Warning => warning,
            };
            writeln!(
                stdout,
                "{}{}{}: {}: {}",
                style.render(),
                diagnostic.severity,
                style.render_reset(),
                diagnostic.setting,
                diagnostic.message
            )?;
        }

        let errors = report.errors().count();
        let warnings = report.warnings().count();
        if errors == 0 && warnings == 0 {
            log::info!("No problems found");
            return Ok(());
        }
        writeln!(
            stdout,
            "{} {}, {} {}",
            errors,
            plural(errors, "error"),
            warnings,
            plural(warnings, "warning")
        )?;

        if errors != 0 || (self.deny_warnings && warnings != 0) {
            anyhow::bail!("Configuration check failed");
        }
        Ok(())
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_owned()
    } else {
        format!("{noun}s")
    }
}
