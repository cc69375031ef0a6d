//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

struct UnsetVar(String);

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned unchanged, so a bare `$` in a path is
/// kept literally. `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| match std::env::var(name) {
        Ok(found) => Ok(Some(found)),
        Err(_) => Err(UnsetVar(name.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(inner) = value.as_deref() {
        *value = Some(expand_env(inner, field)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SITENAV_TEST_DOCS_ROOT", "/srv/docs");
        }
        let result = expand_env("${SITENAV_TEST_DOCS_ROOT}/en", "docs.source_dir").unwrap();
        assert_eq!(result, "/srv/docs/en");
        unsafe {
            std::env::remove_var("SITENAV_TEST_DOCS_ROOT");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SITENAV_TEST_UNSET_LOCALE");
        }
        let result = expand_env("nav/${SITENAV_TEST_UNSET_LOCALE:-en}/navbar.yaml", "locales[0].navbar").unwrap();
        assert_eq!(result, "nav/en/navbar.yaml");
    }

    #[test]
    fn test_expand_unset_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SITENAV_TEST_MISSING");
        }
        let err = expand_env("${SITENAV_TEST_MISSING}", "locales[1].notes").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("SITENAV_TEST_MISSING"));
        assert!(message.contains("locales[1].notes"));
    }

    #[test]
    fn test_bare_dollar_kept() {
        assert_eq!(expand_env("docs/$draft", "docs.source_dir").unwrap(), "docs/$draft");
    }

    #[test]
    fn test_expand_opt() {
        let mut none = None;
        expand_opt(&mut none, "locales[0].link").unwrap();
        assert_eq!(none, None);

        let mut some = Some("/en/".to_owned());
        expand_opt(&mut some, "locales[0].link").unwrap();
        assert_eq!(some.as_deref(), Some("/en/"));
    }
}
