use serde::{Deserialize, Serialize};

/// Locales the translation file carries
///
/// The first block of every translation tree is keyed by a two-letter
/// language code. Only the codes listed here receive insertions; any other
/// top-level key is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Thai (`th`)
    #[serde(rename = "th")]
    Thai,
    /// English (`en`)
    #[serde(rename = "en")]
    English,
}

impl Locale {
    /// Every supported locale, in file order
    pub const ALL: [Locale; 2] = [Locale::Thai, Locale::English];

    /// The two-letter code used as the block identifier in the file
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Thai => "th",
            Locale::English => "en",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Map a block identifier to a locale
///
/// Matching is exact: the identifier must be the bare code, as it appears
/// before the colon in the file.
///
/// # Examples
/// ```
/// use i18n_rewrite::{Locale, detect_locale};
/// assert_eq!(detect_locale("th"), Some(Locale::Thai));
/// assert_eq!(detect_locale("en"), Some(Locale::English));
/// assert_eq!(detect_locale("fr"), None);
/// ```
pub fn detect_locale(identifier: &str) -> Option<Locale> {
    match identifier {
        "th" => Some(Locale::Thai),
        "en" => Some(Locale::English),
        _ => None,
    }
}
