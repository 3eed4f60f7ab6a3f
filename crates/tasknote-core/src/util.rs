//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Strip a `file://` scheme, returning the bare path portion.
///
/// Returns `None` for locators that use any other scheme.
pub fn file_locator_path(locator: &str) -> Option<&str> {
    if let Some(path) = locator.strip_prefix("file://") {
        return Some(path);
    }
    if locator.contains("://") {
        None
    } else {
        Some(locator)
    }
}
