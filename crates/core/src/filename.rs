//! Download names for exported books.

use crate::format::ExportFormat;

/// Used when a title sanitizes to nothing.
pub const FALLBACK_FILENAME: &str = "book";

/// Turns a book title into a file stem that is safe inside a quoted header value.
///
/// Each run of whitespace becomes one `_`; quotes, backslashes and control
/// characters become `_` as well.
pub fn sanitize_filename(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c == '"' || c == '\\' || c.is_control() {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    if out.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        out
    }
}

/// `attachment; filename="{stem}.{ext}"` for `title`.
pub fn content_disposition(title: &str, format: ExportFormat) -> String {
    format!(
        "attachment; filename=\"{}.{}\"",
        sanitize_filename(title),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(sanitize_filename("My  Great\tBook"), "My_Great_Book");
        assert_eq!(sanitize_filename(" Lead"), "_Lead");
    }

    #[test]
    fn test_header_breaking_characters_are_replaced() {
        assert_eq!(sanitize_filename("Say \"hi\""), "Say__hi_");
        assert_eq!(sanitize_filename("a\\b\u{7}c"), "a_b_c");
    }

    #[test]
    fn test_empty_title_falls_back() {
        assert_eq!(sanitize_filename(""), "book");
        assert_eq!(content_disposition("", ExportFormat::Pdf), "attachment; filename=\"book.pdf\"");
    }

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("Atlas of Clouds", ExportFormat::Docx),
            "attachment; filename=\"Atlas_of_Clouds.docx\""
        );
    }
}
