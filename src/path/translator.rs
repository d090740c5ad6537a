//! Path translator: rewrites each static segment of a path for one locale.

use crate::config::TranslatorConfig;
use crate::error::TranslationError;
use crate::i18n::{Dictionary, Locale};
use regex::Regex;
use std::sync::OnceLock;

// A trailing optional group such as `(.:format)` is kept verbatim
static FINAL_OPTIONAL_REGEX: OnceLock<Regex> = OnceLock::new();
static TRANSLATABLE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Translates path patterns segment by segment through a [`Dictionary`].
pub struct PathTranslator<'a> {
    config: &'a TranslatorConfig,
    dictionary: &'a dyn Dictionary,
}

impl<'a> PathTranslator<'a> {
    pub fn new(config: &'a TranslatorConfig, dictionary: &'a dyn Dictionary) -> Self {
        Self { config, dictionary }
    }

    /// Translate `path` into `locale`.
    ///
    /// Parameters, globs and optional groups pass through unchanged. The
    /// locale prefix is added when the configuration asks for it. Lookups use
    /// the locale with its native marker stripped.
    ///
    /// # Returns
    /// * `Ok(String)` with the translated path
    /// * `Err(TranslationError::MissingTranslation)` for the first literal
    ///   segment the dictionary cannot translate
    pub fn translate(&self, path: &str, locale: &Locale) -> Result<String, TranslationError> {
        let regex =
            FINAL_OPTIONAL_REGEX.get_or_init(|| Regex::new(r"(\([^/]+\))$").unwrap());

        let (body, optional_tail) = match regex.find(path) {
            Some(m) => (&path[..m.start()], m.as_str()),
            None => (path, ""),
        };

        let mut segments = Vec::new();
        for segment in body.split('/') {
            let phrases = segment
                .split('.')
                .map(|phrase| self.translate_phrase(phrase, locale))
                .collect::<Result<Vec<_>, _>>()?;
            let translated = phrases.join(".");
            if !translated.is_empty() {
                segments.push(translated);
            }
        }

        if self.display_locale(locale) && !self.locale_param_present(body) {
            segments.insert(0, locale.path_segment());
        }

        Ok(format!("/{}{}", segments.join("/"), optional_tail).replace("/(/", "(/"))
    }

    fn translate_phrase(&self, phrase: &str, locale: &Locale) -> Result<String, TranslationError> {
        if phrase.is_empty() {
            return Ok(String::new());
        }

        if phrase.starts_with(':') {
            if let Some((param, rest)) = phrase.split_once('-') {
                return Ok(format!("{}-{}", param, self.translate_phrase(rest, locale)?));
            }
        }

        if phrase.starts_with('(') || phrase.starts_with('*') || phrase.contains(':') {
            return Ok(phrase.to_string());
        }

        let (phrase, appended) = match phrase.strip_suffix('(') {
            Some(stripped) => (stripped, "("),
            None => (phrase, ""),
        };

        let regex = TRANSLATABLE_REGEX.get_or_init(|| Regex::new(r"^[-_a-zA-Z0-9]+").unwrap());
        let Some(key) = regex.find(phrase) else {
            return Ok(format!("{}{}", phrase, appended));
        };

        let translated = self
            .dictionary
            .lookup(locale.sanitized(), key.as_str())
            .ok_or_else(|| TranslationError::MissingTranslation {
                locale: locale.to_string(),
                segment: key.as_str().to_string(),
            })?;

        Ok(format!("{}{}{}", translated, &phrase[key.end()..], appended))
    }

    fn display_locale(&self, locale: &Locale) -> bool {
        !self.config.hide_locale
            && !locale.is_native()
            && (*locale != self.config.default_locale || self.default_locale_requires_prefix())
    }

    // The canonical route owns the bare path whenever it is generated
    fn default_locale_requires_prefix(&self) -> bool {
        self.config.prefix_on_default_locale
            || self.config.generate_unlocalized_routes
            || self.config.generate_unnamed_unlocalized_routes
    }

    fn locale_param_present(&self, path: &str) -> bool {
        let param = format!(":{}", self.config.locale_param_key);
        path.split('/').any(|segment| segment == param)
    }
}
