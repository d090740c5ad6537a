use crate::i18n::Locale;
use anyhow::{bail, Context, Result};

/// Default name of the route parameter carrying the locale.
pub const DEFAULT_LOCALE_PARAM_KEY: &str = "locale";

/// Route translation settings, read once at route-definition time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    // Locales
    pub available_locales: Vec<Locale>,
    pub native_locales: Vec<Locale>,
    pub default_locale: Locale,
    pub locale_param_key: String,

    // Missing translations abort the route definition instead of skipping
    // the locale
    pub disable_fallback: bool,

    // Canonical (untranslated) route
    pub generate_unlocalized_routes: bool,
    pub generate_unnamed_unlocalized_routes: bool,

    // Host based locales
    pub verify_host_path_consistency: bool,
    pub host_locales: Vec<(String, Locale)>,

    // Locale prefix
    pub hide_locale: bool,
    pub prefix_on_default_locale: bool,
}

impl TranslatorConfig {
    /// Create a configuration with a single active locale and every switch off.
    pub fn new(default_locale: impl Into<Locale>) -> Self {
        let default_locale = default_locale.into();
        Self {
            available_locales: vec![default_locale.clone()],
            native_locales: Vec::new(),
            default_locale,
            locale_param_key: DEFAULT_LOCALE_PARAM_KEY.to_string(),
            disable_fallback: false,
            generate_unlocalized_routes: false,
            generate_unnamed_unlocalized_routes: false,
            verify_host_path_consistency: false,
            host_locales: Vec::new(),
            hide_locale: false,
            prefix_on_default_locale: false,
        }
    }

    pub fn with_available_locales<I, L>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Locale>,
    {
        self.available_locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Locales that also get a native variant, e.g. `es` for `native_es`.
    ///
    /// Tags that already carry the native marker are kept as given.
    pub fn with_native_locales<I, L>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Locale>,
    {
        self.native_locales = locales.into_iter().map(|l| native_variant(l.into())).collect();
        self
    }

    pub fn with_locale_param_key(mut self, key: impl Into<String>) -> Self {
        self.locale_param_key = key.into();
        self
    }

    pub fn with_disable_fallback(mut self, disable: bool) -> Self {
        self.disable_fallback = disable;
        self
    }

    pub fn with_generate_unlocalized_routes(mut self, generate: bool) -> Self {
        self.generate_unlocalized_routes = generate;
        self
    }

    pub fn with_generate_unnamed_unlocalized_routes(mut self, generate: bool) -> Self {
        self.generate_unnamed_unlocalized_routes = generate;
        self
    }

    pub fn with_verify_host_path_consistency(mut self, verify: bool) -> Self {
        self.verify_host_path_consistency = verify;
        self
    }

    /// Map host patterns (e.g. `*.es`, `de.example.com`) to locales, in
    /// priority order.
    pub fn with_host_locales<I, P, L>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: Into<Locale>,
    {
        self.host_locales = hosts
            .into_iter()
            .map(|(pattern, locale)| (pattern.into(), locale.into()))
            .collect();
        self
    }

    pub fn with_hide_locale(mut self, hide: bool) -> Self {
        self.hide_locale = hide;
        self
    }

    pub fn with_prefix_on_default_locale(mut self, prefix: bool) -> Self {
        self.prefix_on_default_locale = prefix;
        self
    }

    /// Whether host-based locale selection is configured.
    pub fn host_locales_enabled(&self) -> bool {
        !self.host_locales.is_empty()
    }

    /// Load the configuration from `ROUTE_*` environment variables.
    ///
    /// `ROUTE_DEFAULT_LOCALE` is required. Lists are comma separated and host
    /// locales are written as `pattern=locale` pairs.
    pub fn from_env() -> Result<Self> {
        let default_locale = std::env::var("ROUTE_DEFAULT_LOCALE")
            .context("ROUTE_DEFAULT_LOCALE not set")?;

        let available_locales = std::env::var("ROUTE_AVAILABLE_LOCALES")
            .map(|v| parse_list(&v).map(Locale::from).collect())
            .unwrap_or_else(|_| vec![Locale::new(default_locale.trim())]);

        let native_locales = std::env::var("ROUTE_NATIVE_LOCALES")
            .map(|v| parse_list(&v).map(|tag| native_variant(Locale::from(tag))).collect())
            .unwrap_or_default();

        let host_locales = match std::env::var("ROUTE_HOST_LOCALES") {
            Ok(v) => parse_host_locales(&v)?,
            Err(_) => Vec::new(),
        };

        let config = Self {
            available_locales,
            native_locales,
            default_locale: Locale::new(default_locale.trim()),
            locale_param_key: std::env::var("ROUTE_LOCALE_PARAM_KEY")
                .unwrap_or_else(|_| DEFAULT_LOCALE_PARAM_KEY.to_string()),
            disable_fallback: env_flag("ROUTE_DISABLE_FALLBACK")?,
            generate_unlocalized_routes: env_flag("ROUTE_GENERATE_UNLOCALIZED_ROUTES")?,
            generate_unnamed_unlocalized_routes: env_flag(
                "ROUTE_GENERATE_UNNAMED_UNLOCALIZED_ROUTES",
            )?,
            verify_host_path_consistency: env_flag("ROUTE_VERIFY_HOST_PATH_CONSISTENCY")?,
            host_locales,
            hide_locale: env_flag("ROUTE_HIDE_LOCALE")?,
            prefix_on_default_locale: env_flag("ROUTE_PREFIX_ON_DEFAULT_LOCALE")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce routable output.
    pub fn validate(&self) -> Result<()> {
        if self.default_locale.is_empty() {
            bail!("Default locale must not be empty");
        }
        if self.locale_param_key.is_empty() {
            bail!("Locale parameter key must not be empty");
        }
        if let Some(locale) = self.available_locales.iter().find(|l| l.is_empty()) {
            bail!("Available locales contain an empty entry: {:?}", locale);
        }
        Ok(())
    }
}

fn native_variant(locale: Locale) -> Locale {
    if locale.is_native() {
        locale
    } else {
        Locale::native(locale.as_str())
    }
}

fn parse_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_host_locales(value: &str) -> Result<Vec<(String, Locale)>> {
    parse_list(value)
        .map(|pair| {
            let (pattern, locale) = pair
                .split_once('=')
                .with_context(|| format!("Invalid host locale '{}'. Expected pattern=locale", pair))?;
            Ok((pattern.trim().to_string(), Locale::new(locale.trim())))
        })
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn env_flag(name: &str) -> Result<bool> {
    match std::env::var(name) {
        Ok(v) => parse_bool(&v).with_context(|| format!("{} must be a boolean, got '{}'", name, v)),
        Err(_) => Ok(false),
    }
}
