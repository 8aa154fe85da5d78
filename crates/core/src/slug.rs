//! Slug generation and collision resolution for pages and block types.

use crate::error::CoreError;

/// Longest slug base derived from a title; leaves room for `-N` suffixes.
pub const SLUG_BASE_MAX: usize = 200;

/// Column width of `pages.slug`.
pub const PAGE_SLUG_MAX: usize = 220;

/// Used when a title contains nothing slug-worthy (e.g. only punctuation).
pub const FALLBACK_SLUG: &str = "page";

/// Generate a URL-safe slug from a human-readable title.
///
/// Non-ASCII letters are transliterated to their closest ASCII form, ASCII
/// letters and digits are lowercased and kept, underscores are kept,
/// whitespace and hyphen runs become a single hyphen, everything else is
/// dropped. Leading and trailing hyphens and underscores are trimmed.
pub fn slugify(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii() || c.is_whitespace() {
            push_slug_char(&mut result, &mut pending_hyphen, c);
        } else {
            for t in ::slug::slugify(c.to_string()).chars() {
                push_slug_char(&mut result, &mut pending_hyphen, t);
            }
        }
    }

    result.trim_matches(['-', '_']).to_string()
}

fn push_slug_char(result: &mut String, pending_hyphen: &mut bool, c: char) {
    if c.is_ascii_alphanumeric() || c == '_' {
        if *pending_hyphen && !result.is_empty() {
            result.push('-');
        }
        *pending_hyphen = false;
        result.push(c.to_ascii_lowercase());
    } else if c.is_whitespace() || c == '-' {
        *pending_hyphen = true;
    }
}

/// Cut a slug to at most `max` bytes without leaving a dangling hyphen.
pub fn truncate_slug(slug: &str, max: usize) -> String {
    if slug.len() <= max {
        return slug.to_string();
    }
    // Slugs produced by `slugify` are ASCII, so any index is a char boundary.
    slug[..max].trim_end_matches('-').to_string()
}

/// Derive the base slug for a page title: slugify, truncate, fall back.
pub fn base_slug_for(title: &str) -> String {
    let base = truncate_slug(&slugify(title), SLUG_BASE_MAX);
    if base.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        base
    }
}

/// Slug for a registry entry such as a block type: the explicit slug when
/// one is given, else one derived from `name`. Either way the result must
/// pass [`validate_slug`], so a name with no letters or digits needs an
/// explicit slug.
pub fn explicit_or_derived(
    explicit: Option<&str>,
    name: &str,
    max_len: usize,
) -> Result<String, CoreError> {
    let slug = match explicit.map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => truncate_slug(&slugify(name), max_len),
    };
    if slug.is_empty() {
        return Err(CoreError::Validation(format!(
            "Cannot derive a slug from '{name}'; provide one explicitly"
        )));
    }
    validate_slug(&slug, max_len)?;
    Ok(slug)
}

/// Return the first of `base`, `base-1`, `base-2`, ... that is not taken.
pub fn resolve_unique_slug(base: &str, mut is_taken: impl FnMut(&str) -> bool) -> String {
    let mut candidate = base.to_string();
    let mut suffix: u32 = 1;
    while is_taken(&candidate) {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    candidate
}

/// Validate a user-supplied slug (non-empty, `[a-z0-9_-]` only, bounded length).
pub fn validate_slug(slug: &str, max_len: usize) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > max_len {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {max_len} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters, hyphens and underscores"
                .into(),
        ));
    }
    Ok(())
}
