//! Path utilities for splitting media paths into recognisable parts.
//!
//! Paths are treated as plain strings: both `/` and `\` separate segments so
//! that paths handed over from any platform split the same way. Offsets are
//! byte offsets into the string that was split.

/// Characters that separate path segments.
const SEPARATORS: &[char] = &['/', '\\'];

/// One segment of a split path, with its byte offset in the full path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Segment text, without separators.
    pub text: &'a str,
    /// Byte offset of `text` within the full path.
    pub start: usize,
}

/// A path split into directory segments and a final file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts<'a> {
    /// Non-empty directory segments, outermost first.
    pub directories: Vec<Segment<'a>>,
    /// The final segment.
    pub file_name: Segment<'a>,
}

/// Split a path on `/` and `\`.
///
/// # Examples
///
/// ```
/// use tvsort_common::paths::split_path;
///
/// let parts = split_path("/tv/Example Show/Example Show - 1x01.mkv");
/// assert_eq!(parts.directories.len(), 2);
/// assert_eq!(parts.directories[1].text, "Example Show");
/// assert_eq!(parts.file_name.text, "Example Show - 1x01.mkv");
/// assert_eq!(parts.file_name.start, 17);
/// ```
pub fn split_path(path: &str) -> PathParts<'_> {
    let name_start = path
        .rfind(SEPARATORS)
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut directories = Vec::new();
    let mut start = 0;
    for (i, ch) in path[..name_start].char_indices() {
        if SEPARATORS.contains(&ch) {
            if i > start {
                directories.push(Segment {
                    text: &path[start..i],
                    start,
                });
            }
            start = i + ch.len_utf8();
        }
    }

    PathParts {
        directories,
        file_name: Segment {
            text: &path[name_start..],
            start: name_start,
        },
    }
}

/// Remove a short suffix after the last `.`.
///
/// The suffix is only treated as an extension when it is non-empty and at
/// most `max_len` characters long.
///
/// # Examples
///
/// ```
/// use tvsort_common::paths::strip_extension;
///
/// assert_eq!(strip_extension("Episode.mkv", 4), "Episode");
/// assert_eq!(strip_extension("Episode.webm", 4), "Episode");
/// assert_eq!(strip_extension("Mr. Robot - Season Finale", 4), "Mr. Robot - Season Finale");
/// assert_eq!(strip_extension("trailing.", 4), "trailing.");
/// ```
pub fn strip_extension(name: &str, max_len: usize) -> &str {
    match name.rfind('.') {
        Some(dot) => {
            let suffix = &name[dot + 1..];
            let len = suffix.chars().count();
            if len > 0 && len <= max_len {
                &name[..dot]
            } else {
                name
            }
        }
        None => name,
    }
}
