//! `sitenav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config};
use sitenav_core::LocaleNavigation;

use crate::error::CliError;
use crate::loader::load_site;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root for source checks (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Require a Markdown source file for every resolved page.
    #[arg(long)]
    verify_sources: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or declarations fail to load, or if
    /// any navigation violation is found.
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            verify_sources: self.verify_sources.then_some(true),
            cache_enabled: Some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let site = load_site(&config, version, false)?;

        for locale in site.locales() {
            output.info(&summary(locale));
            let hidden = locale.navbar.entries().len() - locale.navbar.visible().len();
            if hidden > 0 {
                output.warning(&format!(
                    "{}: {hidden} empty navbar menu(s) will be hidden",
                    locale.code
                ));
            }
        }

        output.success(&format!(
            "Navigation is valid: {} locale(s), {} page(s)",
            site.locales().len(),
            site.page_count()
        ));
        Ok(())
    }
}

/// One-line summary such as `en: 2 collections, 31 pages, 4 navbar links`.
fn summary(locale: &LocaleNavigation) -> String {
    format!(
        "{}: {} collections, {} pages, {} navbar links",
        locale.code,
        locale.resolved.collections().len(),
        locale.resolved.page_count(),
        locale.navbar.links().len(),
    )
}
