//! Upload filename sanitization.

/// Reduce a client-supplied filename to something safe to join onto the
/// upload directory.
///
/// - path separators (`/` and `\`) become spaces, so no component can
///   escape the directory
/// - runs of whitespace collapse to a single `_`
/// - anything outside `[A-Za-z0-9_.-]` is dropped (including non-ASCII)
/// - leading and trailing `.` and `_` are stripped
///
/// Returns `None` when nothing usable is left.
///
/// ```
/// use thermoprint::server::secure_filename;
///
/// assert_eq!(secure_filename("My cool photo.png").as_deref(), Some("My_cool_photo.png"));
/// assert_eq!(secure_filename("../../../etc/passwd").as_deref(), Some("etc_passwd"));
/// assert_eq!(secure_filename("../.."), None);
/// ```
pub fn secure_filename(name: &str) -> Option<String> {
    let separated: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = separated.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_pass_through() {
        assert_eq!(secure_filename("cat.jpg").as_deref(), Some("cat.jpg"));
        assert_eq!(secure_filename("IMG-2024_01.PNG").as_deref(), Some("IMG-2024_01.PNG"));
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(
            secure_filename("  my   holiday\tphoto .png ").as_deref(),
            Some("my_holiday_photo_.png")
        );
    }

    #[test]
    fn test_traversal_is_flattened() {
        assert_eq!(secure_filename("../../../etc/passwd").as_deref(), Some("etc_passwd"));
        assert_eq!(secure_filename("..\\..\\boot.ini").as_deref(), Some("boot.ini"));
        assert_eq!(secure_filename("/tmp/x.png").as_deref(), Some("tmp_x.png"));
    }

    #[test]
    fn test_disallowed_characters_dropped() {
        assert_eq!(secure_filename("a<b>c:d|e?.gif").as_deref(), Some("abcde.gif"));
        assert_eq!(secure_filename("naïve.png").as_deref(), Some("nave.png"));
    }

    #[test]
    fn test_hidden_files_lose_leading_dot() {
        assert_eq!(secure_filename(".bashrc").as_deref(), Some("bashrc"));
    }

    #[test]
    fn test_nothing_left() {
        assert_eq!(secure_filename(""), None);
        assert_eq!(secure_filename("..."), None);
        assert_eq!(secure_filename("日本語"), None);
        assert_eq!(secure_filename(" / "), None);
    }
}
