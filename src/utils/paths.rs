use std::env;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Longest title slug kept in an output file name, in characters
const MAX_SLUG_CHARS: usize = 60;

/// Validates that a file's size is within `max_bytes`
///
/// Takes an open file handle to avoid TOCTOU (time-of-check-time-of-use)
/// race conditions where the file could be modified between the size check
/// and subsequent file operations.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than `max_bytes`
pub fn validate_file_size(file: &File, path: &Path, max_bytes: u64) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > max_bytes {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            max_bytes
        );
    }

    Ok(())
}

/// Turns a conversation title into a file-name-safe slug
///
/// Alphanumeric characters (any script) are kept, every other run of characters becomes
/// a single `_`, and the result is capped at 60 characters. Returns an empty string when
/// nothing usable remains.
///
/// # Examples
///
/// ```
/// use chat_archive_yaml::slugify_title;
///
/// assert_eq!(slugify_title("Rust: lifetimes / borrowing?"), "Rust_lifetimes_borrowing");
/// assert_eq!(slugify_title("..."), "");
/// ```
pub fn slugify_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len().min(MAX_SLUG_CHARS * 4));
    let mut pending_separator = false;
    let mut count = 0;

    for c in title.chars() {
        if count >= MAX_SLUG_CHARS {
            break;
        }
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                // A separator needs room for at least one more character after it
                if count + 1 >= MAX_SLUG_CHARS {
                    break;
                }
                slug.push('_');
                count += 1;
            }
            slug.push(c);
            count += 1;
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use chat_archive_yaml::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/exports");
/// // Returns "~/exports" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    if let Some(home) = home
        && !home.is_empty()
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }

    path.display().to_string()
}
