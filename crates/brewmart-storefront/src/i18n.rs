//! Key-based translation lookup.
//!
//! Resources are a nested JSON object flattened to dotted keys
//! (`catalog.clear_search`). Values may contain `{{name}}` placeholders.
//! Plural forms live under `key_one` / `key_other` and are chosen by the
//! `count` passed to [`Translator::t_count`].

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::StorefrontError;

const BUNDLED_EN: &str = include_str!("../locales/en.json");

#[derive(Debug, Clone)]
pub struct Translator {
    locale: String,
    entries: HashMap<String, String>,
}

impl Translator {
    /// The English resources compiled into the crate.
    ///
    /// # Panics
    ///
    /// Never in practice: the bundled file is covered by tests.
    #[must_use]
    pub fn english() -> Self {
        Self::from_json_str("en", BUNDLED_EN).expect("bundled en.json is valid")
    }

    /// Loads resources from a JSON file. The locale is the file stem.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::LocaleIo`] if the file cannot be read, or a
    /// parse error if it is not a JSON object.
    pub fn from_path(path: &Path) -> Result<Self, StorefrontError> {
        let raw = std::fs::read_to_string(path).map_err(|e| StorefrontError::LocaleIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let locale = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom")
            .to_owned();
        Self::from_json_str(&locale, &raw)
    }

    /// Parses resources from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::LocaleParse`] for invalid JSON and
    /// [`StorefrontError::LocaleShape`] if the top level is not an object.
    pub fn from_json_str(locale: &str, json: &str) -> Result<Self, StorefrontError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| StorefrontError::LocaleParse {
                locale: locale.to_owned(),
                source: e,
            })?;
        if !value.is_object() {
            return Err(StorefrontError::LocaleShape {
                locale: locale.to_owned(),
            });
        }
        let mut entries = HashMap::new();
        flatten("", &value, &mut entries);
        Ok(Self {
            locale: locale.to_owned(),
            entries,
        })
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Looks up `key`. Missing keys resolve to the key itself.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_owned())
    }

    /// Looks up `key` and fills `{{name}}` placeholders from `params`.
    #[must_use]
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        interpolate(&self.t(key), params)
    }

    /// Pluralized lookup: `key_one` when `count == 1`, else `key_other`,
    /// falling back to the bare `key`. `{{count}}` is always available.
    #[must_use]
    pub fn t_count(&self, key: &str, count: usize, params: &[(&str, &str)]) -> String {
        let suffix = if count == 1 { "one" } else { "other" };
        let plural_key = format!("{key}_{suffix}");
        let template = self
            .entries
            .get(&plural_key)
            .or_else(|| self.entries.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_owned());

        let count = count.to_string();
        let mut all: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        all.push(("count", count.as_str()));
        all.extend_from_slice(params);
        interpolate(&template, &all)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&key, v, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_owned(), s.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix.to_owned(), other.to_string());
        }
    }
}

fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = template.to_owned();
    for (name, value) in params {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_english_parses() {
        let tr = Translator::english();
        assert_eq!(tr.locale(), "en");
        assert_eq!(tr.t("catalog.clear_search"), "Clear search");
    }

    #[test]
    fn missing_key_returns_key() {
        let tr = Translator::english();
        assert_eq!(tr.t("products.unknown_bean"), "products.unknown_bean");
    }

    #[test]
    fn plural_forms_are_selected_by_count() {
        let tr = Translator::english();
        assert_eq!(
            tr.t_count("catalog.results", 1, &[("query", "kenya")]),
            "1 result for \"kenya\""
        );
        assert_eq!(
            tr.t_count("catalog.results", 4, &[("query", "kenya")]),
            "4 results for \"kenya\""
        );
        assert_eq!(
            tr.t_count("catalog.results", 0, &[("query", "kenya")]),
            "0 results for \"kenya\""
        );
    }

    #[test]
    fn t_count_falls_back_to_bare_key() {
        let tr = Translator::from_json_str("xx", r#"{"n": "{{count}} things"}"#).unwrap();
        assert_eq!(tr.t_count("n", 3, &[]), "3 things");
    }

    #[test]
    fn t_with_interpolates_params() {
        let tr = Translator::english();
        assert_eq!(
            tr.t_with("catalog.empty_title", &[("query", "decaf")]),
            "No coffees match \"decaf\""
        );
    }

    #[test]
    fn nested_objects_flatten_to_dotted_keys() {
        let tr = Translator::from_json_str("xx", r#"{"a": {"b": {"c": "deep"}, "n": 3}}"#)
            .unwrap();
        assert_eq!(tr.t("a.b.c"), "deep");
        assert_eq!(tr.t("a.n"), "3");
    }

    #[test]
    fn non_object_resources_are_rejected() {
        let err = Translator::from_json_str("xx", "[1, 2]").unwrap_err();
        assert!(matches!(err, StorefrontError::LocaleShape { .. }));
        let err = Translator::from_json_str("xx", "{nope").unwrap_err();
        assert!(matches!(err, StorefrontError::LocaleParse { .. }));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = Translator::from_path(Path::new("/definitely/missing/fr.json")).unwrap_err();
        assert!(matches!(err, StorefrontError::LocaleIo { .. }));
    }
}
