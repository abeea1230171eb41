//! URL slugs and pillar links.

use ciq_core::{LinkRecord, Role};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Turn keyword text into a URL path segment such as `/ao-dai-truyen-thong`.
///
/// Diacritics are stripped via NFD, `đ` becomes `d`, and anything outside
/// `[a-z0-9]`, whitespace and `-` is removed. Output always starts with `/`
/// and never has leading or trailing hyphens after it.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();

    let mut kept = String::with_capacity(lowered.len());
    for c in lowered.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'đ' => kept.push('d'),
            c if c.is_ascii_alphanumeric() || c == '-' => kept.push(c),
            c if c.is_whitespace() => kept.push(' '),
            _ => {}
        }
    }

    let joined = kept.split_whitespace().collect::<Vec<_>>().join("-");
    format!("/{}", joined.trim_matches('-'))
}

/// Link record for one keyword.
///
/// Supporting content links to the pillar with the pillar keyword as anchor.
#[must_use]
pub fn plan_link(keyword: &str, role: Role, pillar_keyword: &str) -> LinkRecord {
    let suggested_url = slugify(keyword);
    match role {
        Role::Pillar => LinkRecord {
            suggested_url,
            link_target_url: None,
            anchor_text: None,
        },
        Role::Supporting => LinkRecord {
            suggested_url,
            link_target_url: Some(slugify(pillar_keyword)),
            anchor_text: Some(pillar_keyword.to_string()),
        },
    }
}
