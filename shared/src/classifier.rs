//! Process-type inference from free-text product names
//!
//! Semi-product names come from upstream systems in mixed Spanish/English
//! with inconsistent casing and accents, so matching is done on a
//! lowercased, diacritic-stripped form of the name.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::ProcessType;

/// Keywords indicating tail-only, shell-on product
const SHELL_ON_KEYWORDS: &[&str] = &["sin cabeza", "headless", "shell", "cola", "tail"];

/// Keywords indicating whole, head-on product
const HEAD_ON_KEYWORDS: &[&str] = &["entero", "head on", "head-on", "con cabeza"];

/// Lowercase and strip diacritics: NFD decomposition with combining marks
/// filtered out. Pure, independent of any UI concern.
pub fn normalize_product_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Infer the process type from a product name.
///
/// Headless keywords win over the bare word "cabeza", so "cola sin cabeza"
/// classifies as shell-on. Missing, empty or unrecognized names default to
/// shell-on.
pub fn classify_product_name(name: Option<&str>) -> ProcessType {
    let Some(name) = name else {
        return ProcessType::ShellOn;
    };
    let normalized = normalize_product_name(name);
    if normalized.trim().is_empty() {
        return ProcessType::ShellOn;
    }

    if SHELL_ON_KEYWORDS.iter().any(|kw| normalized.contains(kw)) {
        return ProcessType::ShellOn;
    }
    if HEAD_ON_KEYWORDS.iter().any(|kw| normalized.contains(kw))
        || normalized.contains("cabeza")
    {
        return ProcessType::HeadOn;
    }
    ProcessType::ShellOn
}
