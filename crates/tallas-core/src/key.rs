//! Size label normalization and sizing-mode inference.
//!
//! Free-text size labels coming from the catalog (`"m cup 36"`, `"Única"`,
//! `"S-COPA-34"`) are folded into one canonical grammar:
//!
//! ```text
//! (UNICA | XS | S | M | L) [ "__COPA_" digits ]
//! ```
//!
//! Labels outside that grammar (numeric shoe sizes, `"XL"`, ...) pass through
//! uppercased and whitespace-collapsed so a size is never silently dropped.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::VariantError;

/// Canonical token for one-size-fits-all garments.
pub const UNIQUE_TOKEN: &str = "UNICA";

/// Cup sizes offered for every cup-mode product, before the ones found in
/// the product's own data are merged in.
pub const DEFAULT_CUP_SIZES: [u32; 2] = [34, 36];

const CUP_MARKER: &str = "__COPA_";

static CANONICAL_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(UNICA|XS|S|M|L)(?:__COPA_\d+)?$").expect("valid canonical key regex")
});
static BASE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(XS|S|M|L)(?:__COPA_\d+)?$").expect("valid base key regex"));
static CUP_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__COPA_(\d+)").expect("valid cup suffix regex"));
static CUP_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*CUP\s*").expect("valid cup word regex"));
static UNIQUE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"U\s*N\s*I\s*C\s*A").expect("valid unique word regex"));
static CUP_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"COPA[\s:_-]*(\d+)").expect("valid cup value regex"));
static LEADING_UNIQUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UNICA\b").expect("valid leading unique regex"));
static BASE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(XS|S|M|L)\b").expect("valid base word regex"));

/// Plain garment size axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BaseSize {
    Xs,
    S,
    M,
    L,
}

impl BaseSize {
    pub const ALL: [BaseSize; 4] = [BaseSize::Xs, BaseSize::S, BaseSize::M, BaseSize::L];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BaseSize::Xs => "XS",
            BaseSize::S => "S",
            BaseSize::M => "M",
            BaseSize::L => "L",
        }
    }
}

impl fmt::Display for BaseSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseSize {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "XS" => Ok(BaseSize::Xs),
            "S" => Ok(BaseSize::S),
            "M" => Ok(BaseSize::M),
            "L" => Ok(BaseSize::L),
            _ => Err(VariantError::UnknownSize(s.to_string())),
        }
    }
}

/// Which size axes a product uses. Always derived from the product's keys
/// through [`infer_mode`], never stored on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantMode {
    #[default]
    BaseSizeOnly,
    UniqueOnly,
    UniqueWithCup,
    BaseSizeWithCup,
}

impl VariantMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VariantMode::BaseSizeOnly => "base-size-only",
            VariantMode::UniqueOnly => "unique-only",
            VariantMode::UniqueWithCup => "unique-with-cup",
            VariantMode::BaseSizeWithCup => "base-size-with-cup",
        }
    }

    #[must_use]
    pub fn uses_cups(self) -> bool {
        matches!(
            self,
            VariantMode::UniqueWithCup | VariantMode::BaseSizeWithCup
        )
    }
}

impl fmt::Display for VariantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantMode {
    type Err = VariantError;

    /// Accepts the kebab/snake names plus the legacy screen tags
    /// (`XS_L`, `UNICA`, `UNICA_COPA`, `XS_L_COPA`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "base-size-only" | "xs-l" => Ok(VariantMode::BaseSizeOnly),
            "unique-only" | "unica" => Ok(VariantMode::UniqueOnly),
            "unique-with-cup" | "unica-copa" => Ok(VariantMode::UniqueWithCup),
            "base-size-with-cup" | "xs-l-copa" => Ok(VariantMode::BaseSizeWithCup),
            _ => Err(VariantError::UnknownMode(s.to_string())),
        }
    }
}

/// Canonical identifier of one sellable size/cup combination.
///
/// Built only through [`normalize`] or [`VariantKey::from_parts`]; inbound
/// serde data is normalized on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VariantKey(String);

impl VariantKey {
    /// Composes a key from its axes. `size = None` means the unique size.
    #[must_use]
    pub fn from_parts(size: Option<BaseSize>, cup: Option<u32>) -> Self {
        let head = size.map_or(UNIQUE_TOKEN, BaseSize::as_str);
        match cup {
            Some(cup) => VariantKey(format!("{head}{CUP_MARKER}{cup}")),
            None => VariantKey(head.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for `UNICA` and `UNICA__COPA_<n>`.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.0 == UNIQUE_TOKEN || self.0.starts_with(&format!("{UNIQUE_TOKEN}{CUP_MARKER}"))
    }

    #[must_use]
    pub fn has_cup(&self) -> bool {
        CUP_SUFFIX.is_match(&self.0)
    }

    /// `true` for `XS|S|M|L`, with or without a cup suffix.
    #[must_use]
    pub fn has_base_size(&self) -> bool {
        BASE_KEY.is_match(&self.0)
    }

    /// Cup number carried by the key, e.g. `36` for `M__COPA_36`.
    #[must_use]
    pub fn cup(&self) -> Option<u32> {
        CUP_SUFFIX
            .captures(&self.0)
            .and_then(|caps| caps[1].parse::<u32>().ok())
    }

    #[must_use]
    pub fn base_size(&self) -> Option<BaseSize> {
        BASE_KEY
            .captures(&self.0)
            .and_then(|caps| caps[1].parse::<BaseSize>().ok())
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VariantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for VariantKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VariantKey {
    fn from(raw: &str) -> Self {
        normalize(raw)
    }
}

impl<'de> Deserialize<'de> for VariantKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(normalize(&raw))
    }
}

/// Normalizes a free-text size label into its canonical [`VariantKey`].
///
/// Processing order: trim and uppercase, fold accented vowels, collapse
/// whitespace, rewrite `CUP` to the `COPA` marker, fold spellings of "única"
/// to `UNICA`. Then:
///
/// - cup numbers lose leading zeros, so `"copa 036"` and `"copa 36"` agree;
/// - a cup number plus a leading `UNICA` gives `UNICA__COPA_<n>`;
/// - a cup number plus a base size word gives `<SIZE>__COPA_<n>`;
/// - a leading `UNICA` with no cup gives `UNICA`;
/// - anything already canonical is returned unchanged;
/// - everything else passes through in its cleaned-up form.
///
/// Never fails, and `normalize(normalize(x).as_str()) == normalize(x)`.
#[must_use]
pub fn normalize(raw: &str) -> VariantKey {
    let text = collapse_whitespace(&fold_accents(&raw.trim().to_uppercase()));
    if CANONICAL_KEY.is_match(&text) {
        let text = CUP_SUFFIX.replace(&text, |caps: &regex::Captures<'_>| {
            format!("{CUP_MARKER}{}", trim_cup_digits(&caps[1]))
        });
        return VariantKey(text.into_owned());
    }

    let text = CUP_WORD.replace_all(&text, " COPA ");
    let text = collapse_whitespace(&UNIQUE_WORD.replace_all(&text, UNIQUE_TOKEN));

    if let Some(caps) = CUP_VALUE.captures(&text) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let digits = trim_cup_digits(&caps[1]);
        let rest = collapse_whitespace(&format!(
            "{} {}",
            &text[..whole.start],
            &text[whole.end..]
        ));

        if LEADING_UNIQUE.is_match(&rest) {
            return VariantKey(format!("{UNIQUE_TOKEN}{CUP_MARKER}{digits}"));
        }
        if let Some(size) = BASE_WORD.captures(&rest) {
            return VariantKey(format!("{}{CUP_MARKER}{digits}", &size[1]));
        }
    }

    if LEADING_UNIQUE.is_match(&text) {
        return VariantKey(UNIQUE_TOKEN.to_string());
    }

    VariantKey(text)
}

/// Infers the sizing mode of a product from the keys it currently has.
///
/// Unique+cup wins over unique, which wins over base+cup; everything else,
/// including an empty set, is [`VariantMode::BaseSizeOnly`].
pub fn infer_mode<'a, I>(keys: I) -> VariantMode
where
    I: IntoIterator<Item = &'a VariantKey>,
{
    let mut unique = false;
    let mut unique_with_cup = false;
    let mut base_with_cup = false;

    for key in keys {
        let has_cup = key.has_cup();
        if key.is_unique() {
            unique = true;
            unique_with_cup |= has_cup;
        } else if has_cup && key.has_base_size() {
            base_with_cup = true;
        }
    }

    if unique_with_cup {
        VariantMode::UniqueWithCup
    } else if unique {
        VariantMode::UniqueOnly
    } else if base_with_cup {
        VariantMode::BaseSizeWithCup
    } else {
        VariantMode::BaseSizeOnly
    }
}

/// Cup numbers present on a product's keys.
pub fn discover_cups<'a, I>(keys: I) -> BTreeSet<u32>
where
    I: IntoIterator<Item = &'a VariantKey>,
{
    keys.into_iter().filter_map(VariantKey::cup).collect()
}

/// Sorted, de-duplicated union of the configured default cups and the cups
/// discovered on a product.
#[must_use]
pub fn merged_cups(defaults: &[u32], discovered: &BTreeSet<u32>) -> Vec<u32> {
    defaults
        .iter()
        .copied()
        .chain(discovered.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `"036"` and `"36"` name the same cup.
fn trim_cup_digits(digits: &str) -> &str {
    match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    }
}

fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            other => other,
        })
        .collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "key_test.rs"]
mod tests;
