//! Site loading shared by commands.
//!
//! Reads every declaration file named by the config, builds the
//! [`SiteNavigation`] and consults the navigation cache.

use sitenav_config::Config;
use sitenav_core::{
    DeclarationFile, FileNavigationCache, FsContent, LinkPolicy, LoadError, LocaleDeclaration,
    NavigationCache, NullNavigationCache, SiteNavigation, fingerprint,
};

use crate::error::CliError;

/// Declaration files of one locale.
struct LocaleFiles<'a> {
    code: &'a str,
    link: &'a str,
    navbar: Option<DeclarationFile>,
    notes: Option<DeclarationFile>,
}

/// Load, resolve and validate the site described by `config`.
///
/// The cache is used only when `use_cache` is set, caching is enabled in the
/// config and source verification is off.
pub(crate) fn load_site(config: &Config, version: &str, use_cache: bool) -> Result<SiteNavigation, CliError> {
    if config.locales_resolved.is_empty() {
        return Err(CliError::Validation(
            "no locales configured, add a [[locales]] table to sitenav.toml".to_owned(),
        ));
    }

    let files = read_declarations(config)?;

    let docs = &config.docs_resolved;
    let cache: Box<dyn NavigationCache> = if use_cache && docs.cache_enabled && !docs.verify_sources {
        Box::new(FileNavigationCache::new(docs.cache_dir()))
    } else {
        Box::new(NullNavigationCache)
    };
    let key = site_fingerprint(config, version, &files);

    if let Some(site) = cache.get(&key) {
        tracing::debug!(fingerprint = %key, "Using cached navigation");
        return Ok(site);
    }

    let site = build_site(config, &files)?;
    cache.set(&key, &site);
    Ok(site)
}

fn read_declarations(config: &Config) -> Result<Vec<LocaleFiles<'_>>, CliError> {
    let mut failures = Vec::new();
    let mut read = |path: Option<&std::path::PathBuf>| {
        path.and_then(|path| {
            DeclarationFile::read(path)
                .map_err(|e| failures.push(e))
                .ok()
        })
    };

    let files: Vec<_> = config
        .locales_resolved
        .iter()
        .map(|locale| LocaleFiles {
            code: &locale.code,
            link: &locale.link,
            navbar: read(locale.navbar.as_ref()),
            notes: read(locale.notes.as_ref()),
        })
        .collect();

    if failures.is_empty() {
        Ok(files)
    } else {
        Err(CliError::Declarations(failures))
    }
}

fn build_site(config: &Config, files: &[LocaleFiles<'_>]) -> Result<SiteNavigation, CliError> {
    let mut failures: Vec<LoadError> = Vec::new();
    let mut builder = SiteNavigation::builder()
        .link_policy(LinkPolicy::new(&config.links.external_schemes));

    for locale in files {
        let mut declaration = LocaleDeclaration::new(locale.code).with_link(locale.link);
        if let Some(file) = &locale.navbar {
            match file.navbar() {
                Ok(navbar) => declaration = declaration.with_navbar(navbar),
                Err(e) => failures.push(e),
            }
        }
        if let Some(file) = &locale.notes {
            match file.notes() {
                Ok(notes) => declaration = declaration.with_notes(notes),
                Err(e) => failures.push(e),
            }
        }
        builder = builder.locale(declaration);
    }

    if !failures.is_empty() {
        return Err(CliError::Declarations(failures));
    }

    if config.docs_resolved.verify_sources {
        builder = builder.verify_sources(FsContent::new(&config.docs_resolved.source_dir));
    }

    Ok(builder.build()?)
}

/// Fingerprint of every input that affects the resolved navigation.
fn site_fingerprint(config: &Config, version: &str, files: &[LocaleFiles<'_>]) -> String {
    let mut settings = config.links.external_schemes.join(",");
    for locale in files {
        settings.push_str(&format!("|{}={}", locale.code, locale.link));
    }

    let declarations = files
        .iter()
        .flat_map(|locale| [locale.navbar.as_ref(), locale.notes.as_ref()])
        .flatten()
        .map(|file| (file.path().to_str().unwrap_or_default(), file.contents().as_bytes()));

    fingerprint(
        version,
        std::iter::once(("settings", settings.as_bytes())).chain(declarations),
    )
}
