//! Language tag classification for `lang` attributes

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// ISO 639-1 language codes
static LANGUAGE_CODES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
        "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
        "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
        "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
        "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
        "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
        "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
        "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
        "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
        "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
        "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
        "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
        "yo", "za", "zh", "zu",
    ]
    .into_iter()
    .collect()
});

/// Outcome of checking a `lang` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LangClass {
    /// Well-formed and canonically cased
    Valid = 0,
    /// Unknown language or malformed region subtag
    InvalidSubtag = 1,
    /// Valid, but not written as `ll-RR`
    NonCanonicalCase = 2,
}

/// Classifies `lang` attribute values
pub trait LangClassifier: Send + Sync {
    fn classify(&self, lang: &str) -> LangClass;
}

impl<F> LangClassifier for F
where
    F: Fn(&str) -> LangClass + Send + Sync,
{
    fn classify(&self, lang: &str) -> LangClass {
        self(lang)
    }
}

/// Default classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLangClassifier;

impl LangClassifier for DefaultLangClassifier {
    fn classify(&self, lang: &str) -> LangClass {
        check_lang_attribute(lang)
    }
}

fn is_region_subtag(subtag: &str) -> bool {
    (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
        || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()))
}

/// Classify a language tag such as `en`, `en-US` or `pt-br`
pub fn check_lang_attribute(lang: &str) -> LangClass {
    let lang = lang.trim();
    if lang.is_empty() {
        return LangClass::Valid;
    }

    let mut subtags = lang.split('-');
    let language = subtags.next().unwrap_or_default();
    if !LANGUAGE_CODES.contains(language.to_lowercase().as_str()) {
        return LangClass::InvalidSubtag;
    }

    let region = subtags.next();
    if let Some(region) = region {
        if !is_region_subtag(region) {
            return LangClass::InvalidSubtag;
        }
    }

    let language_canonical = language == language.to_lowercase();
    let region_canonical = region.is_none_or(|r| r == r.to_uppercase());
    if language_canonical && region_canonical {
        LangClass::Valid
    } else {
        LangClass::NonCanonicalCase
    }
}
