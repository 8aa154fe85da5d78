//! Field rules for pages, block types, generic blocks and menu items.

use crate::error::CoreError;

pub const PAGE_TITLE_MAX: usize = 200;
pub const TEMPLATE_NAME_MAX: usize = 200;
pub const BLOCK_TYPE_NAME_MAX: usize = 100;
pub const BLOCK_TYPE_SLUG_MAX: usize = 120;
pub const BLOCK_TITLE_MAX: usize = 200;
pub const MENU_TITLE_MAX: usize = 150;
pub const MENU_SLUG_MAX: usize = 160;
pub const MENU_URL_MAX: usize = 255;

/// Canonical public path of a page.
pub fn page_path(slug: &str) -> String {
    format!("/pages/{slug}/")
}

/// A required, bounded, human-readable title.
pub fn validate_title(field: &str, title: &str, max: usize) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_max_len(field, title, max)
}

pub fn validate_max_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Template overrides are relative template paths, never absolute or escaping.
pub fn validate_template_name(name: &str) -> Result<(), CoreError> {
    validate_max_len("template_name", name, TEMPLATE_NAME_MAX)?;
    if name.starts_with('/') || name.split('/').any(|part| part == "..") {
        return Err(CoreError::Validation(format!(
            "template_name '{name}' must be a relative template path"
        )));
    }
    Ok(())
}

/// Sort orders are non-negative.
pub fn validate_sort_order(order: i32) -> Result<(), CoreError> {
    if order < 0 {
        return Err(CoreError::Validation(format!(
            "sort_order must not be negative, got {order}"
        )));
    }
    Ok(())
}
