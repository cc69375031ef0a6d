//! `sitenav resolve` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config};
use sitenav_core::{LocaleNavigation, SiteNavigation};

use crate::error::CliError;
use crate::loader::load_site;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only print this locale.
    #[arg(short, long)]
    locale: Option<String>,

    /// Print the resolved navigation as JSON.
    #[arg(long)]
    json: bool,

    /// Disable caching.
    #[arg(long)]
    no_cache: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigation fails to load or validate, if the
    /// requested locale is not configured, or if writing to stdout fails.
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            cache_enabled: self.no_cache.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = load_site(&config, version, !self.no_cache)?;

        let locales = select_locales(&site, self.locale.as_deref())?;
        let mut stdout = std::io::stdout().lock();

        if self.json {
            match (self.locale.is_some(), locales.as_slice()) {
                (true, [locale]) => serde_json::to_writer_pretty(&mut stdout, locale)?,
                _ => serde_json::to_writer_pretty(&mut stdout, &site)?,
            }
            writeln!(stdout)?;
            return Ok(());
        }

        for locale in locales {
            output.heading(&format!("[{}]", locale.code));
            write_locale(&mut stdout, locale, &output)?;
        }
        Ok(())
    }
}

fn select_locales<'a>(
    site: &'a SiteNavigation,
    code: Option<&str>,
) -> Result<Vec<&'a LocaleNavigation>, CliError> {
    let Some(code) = code else {
        return Ok(site.locales().iter().collect());
    };
    site.locale(code).map(|l| vec![l]).ok_or_else(|| {
        CliError::Validation(format!(
            "unknown locale '{code}' (configured: {})",
            site.locale_codes().collect::<Vec<_>>().join(", ")
        ))
    })
}

/// Write pages of every collection as `path  ⟵  Group › Group`.
fn write_locale(
    out: &mut impl Write,
    locale: &LocaleNavigation,
    output: &Output,
) -> std::io::Result<()> {
    for collection in locale.resolved.collections() {
        writeln!(
            out,
            "{} {}",
            collection.link,
            output.dimmed(&format!("({} pages, source {})", collection.pages.len(), collection.dir))
        )?;
        for page in &collection.pages {
            writeln!(
                out,
                "  {}  ⟵  {}",
                page.absolute_path,
                page.group_chain.join(" › ")
            )?;
        }
    }
    Ok(())
}
