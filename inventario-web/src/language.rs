use gloo_storage::{LocalStorage, Storage};
use std::collections::HashMap;

/// Language used until the user picks another one.
pub const DEFAULT_LANGUAGE: &str = "es";

/// `localStorage` key remembering the chosen language.
pub const LANGUAGE_KEY: &str = "inventario.language";

/// Information about a supported language
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub flag: &'static str,
    pub translation: &'static str,
    pub native_name: &'static str,
}

/// Get information about a supported language
pub fn get_language_info(code: &str) -> Option<LanguageInfo> {
    supported_languages().get(code).cloned()
}

/// Get a map of supported languages
pub fn supported_languages() -> HashMap<&'static str, LanguageInfo> {
    HashMap::from([
        (
            "es",
            LanguageInfo {
                code: "es",
                flag: "🇪🇨",
                translation: include_str!("../translations/es.json"),
                native_name: "Español",
            },
        ),
        (
            "en",
            LanguageInfo {
                code: "en",
                flag: "🇬🇧",
                translation: include_str!("../translations/en.json"),
                native_name: "English",
            },
        ),
    ])
}

/// The stored choice when it is still supported, otherwise the default.
pub fn resolve_language(stored: Option<&str>) -> &'static str {
    stored
        .and_then(get_language_info)
        .map_or(DEFAULT_LANGUAGE, |info| info.code)
}

/// Language to start with, as remembered by the language selector.
pub fn initial_language() -> &'static str {
    let stored: Option<String> = LocalStorage::get(LANGUAGE_KEY).ok();
    resolve_language(stored.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{
        BASIC_PASSWORD_MIN, Field, STRONG_PASSWORD_MIN, ValidationError,
    };
    use serde_json::Value;

    fn lookup<'a>(bundle: &'a Value, key: &str) -> Option<&'a Value> {
        key.split('.').try_fold(bundle, |node, part| node.get(part))
    }

    fn every_validation_error() -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = [
            Field::Name,
            Field::Email,
            Field::Role,
            Field::IdNumber,
            Field::Password,
            Field::CurrentPassword,
            Field::NewPassword,
            Field::Confirmation,
            Field::Token,
        ]
        .into_iter()
        .map(ValidationError::Required)
        .collect();
        errors.extend([
            ValidationError::InvalidEmail,
            ValidationError::InvalidPhone,
            ValidationError::InvalidIdNumber,
            ValidationError::PasswordTooShort { min: STRONG_PASSWORD_MIN },
            ValidationError::PasswordTooShort { min: BASIC_PASSWORD_MIN },
            ValidationError::PasswordsDoNotMatch,
            ValidationError::PasswordUnchanged,
            ValidationError::AvatarNotImage,
            ValidationError::AvatarTooLarge,
        ]);
        errors
    }

    #[test]
    fn default_language_is_supported() {
        assert!(get_language_info(DEFAULT_LANGUAGE).is_some());
    }

    #[test]
    fn stored_language_is_used_only_when_supported() {
        assert_eq!(resolve_language(Some("en")), "en");
        assert_eq!(resolve_language(Some("fr")), DEFAULT_LANGUAGE);
        assert_eq!(resolve_language(None), DEFAULT_LANGUAGE);
    }

    fn leaf_keys(node: &Value, prefix: &str, keys: &mut Vec<String>) {
        match node.as_object() {
            Some(map) => {
                for (name, child) in map {
                    let path = if prefix.is_empty() {
                        name.clone()
                    } else {
                        format!("{prefix}.{name}")
                    };
                    leaf_keys(child, &path, keys);
                }
            }
            None => keys.push(prefix.to_string()),
        }
    }

    #[test]
    fn bundles_share_the_same_keys() {
        let mut key_sets = supported_languages()
            .values()
            .map(|info| {
                let bundle: Value = serde_json::from_str(info.translation).unwrap();
                let mut keys = Vec::new();
                leaf_keys(&bundle, "", &mut keys);
                keys.sort();
                (info.code, keys)
            })
            .collect::<Vec<_>>();
        let (first_code, first) = key_sets.pop().unwrap();
        for (code, keys) in key_sets {
            assert_eq!(keys, first, "{code} and {first_code} differ");
        }
    }

    #[test]
    fn bundles_are_valid_json() {
        for info in supported_languages().values() {
            let parsed: Result<Value, _> = serde_json::from_str(info.translation);
            assert!(parsed.is_ok(), "{} bundle does not parse", info.code);
        }
    }

    #[test]
    fn every_validation_message_is_translated() {
        for info in supported_languages().values() {
            let bundle: Value = serde_json::from_str(info.translation).unwrap();
            for error in every_validation_error() {
                let key = error.i18n_key();
                assert!(
                    lookup(&bundle, &key).and_then(Value::as_str).is_some(),
                    "{} is missing {key}",
                    info.code
                );
            }
        }
    }

    #[test]
    fn generic_error_messages_are_translated() {
        for info in supported_languages().values() {
            let bundle: Value = serde_json::from_str(info.translation).unwrap();
            for key in ["errors.load_failed", "errors.request_failed"] {
                assert!(lookup(&bundle, key).is_some(), "{} is missing {key}", info.code);
            }
        }
    }
}
