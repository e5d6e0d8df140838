//! JSON-backed translations with per-locale bundles and English fallback.

use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Locales shipped with the plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// German.
    De,
    /// English.
    En,
    /// Spanish.
    Es,
    /// French.
    Fr,
    /// Portuguese.
    Pt,
    /// Russian.
    Ru,
}

impl LocaleCode {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [Self::De, Self::En, Self::Es, Self::Fr, Self::Pt, Self::Ru]
    }

    /// Two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Pt => "pt",
            Self::Ru => "ru",
        }
    }

    /// Native-language label for pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::De => "Deutsch",
            Self::En => "English",
            Self::Es => "Español",
            Self::Fr => "Français",
            Self::Pt => "Português",
            Self::Ru => "Русский",
        }
    }

    /// Map a browser language tag (`pt-BR`, `de`) to a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let base = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all().into_iter().find(|locale| locale.code() == base)
    }
}

/// Locale used when nothing else matches.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Parsed translation tree for one locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Load the bundle for `locale`. Missing keys resolve through English.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree = serde_json::from_str(raw_locale(locale)).unwrap_or(Value::Null);
        Self { locale, tree }
    }

    /// Resolve a dotted path (`section.key`) with English fallback and caller default.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&EN_FALLBACK.tree, path))
            .unwrap_or_else(|| default.to_string())
    }

    /// Like [`Self::text`], then substitute `{{name}}` placeholders.
    #[must_use]
    pub fn text_with(&self, path: &str, default: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.text(path, default), |text, (name, value)| {
                text.replace(&format!("{{{{{name}}}}}"), value)
            })
    }

    /// Translate a message that is either a key or already display text.
    ///
    /// Server errors arrive as keys; unknown keys are shown verbatim.
    #[must_use]
    pub fn message(&self, key_or_text: &str) -> String {
        self.text(key_or_text, key_or_text)
    }
}

static EN_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::De => include_str!("../i18n/de.json"),
        LocaleCode::En => include_str!("../i18n/en.json"),
        LocaleCode::Es => include_str!("../i18n/es.json"),
        LocaleCode::Fr => include_str!("../i18n/fr.json"),
        LocaleCode::Pt => include_str!("../i18n/pt.json"),
        LocaleCode::Ru => include_str!("../i18n/ru.json"),
    }
}
