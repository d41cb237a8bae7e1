//! Output file names computed from input names.

use crate::reconcile::normalize_name;

/// Used by the joiner when no better name can be derived.
pub const DEFAULT_JOINED_NAME: &str = "joined-document.pdf";

/// Shortest common prefix worth naming a joined file after.
const MIN_PREFIX_CHARS: usize = 3;

/// Name of the file written by the page editor: `report.pdf` becomes
/// `report-modified.pdf`.
pub fn edited_file_name(name: &str) -> String {
    format!("{}-modified.pdf", normalize_name(name))
}

/// Name of the file written by the joiner.
///
/// Two inputs give `<first>_<second>.pdf`. Otherwise the longest common
/// prefix of the input stems is used when it has at least three
/// characters, e.g. `chapter-1.pdf`, `chapter-2.pdf`, `chapter-3.pdf` give
/// `chapter--joined.pdf`.
pub fn joined_file_name<S: AsRef<str>>(names: &[S]) -> String {
    if let [first, second] = names {
        return format!(
            "{}_{}.pdf",
            normalize_name(first.as_ref()),
            normalize_name(second.as_ref())
        );
    }

    let prefix = common_prefix(names.iter().map(|name| normalize_name(name.as_ref())));

    if prefix.chars().count() >= MIN_PREFIX_CHARS {
        format!("{prefix}-joined.pdf")
    } else {
        DEFAULT_JOINED_NAME.to_string()
    }
}

/// Name of the file written by the selector: the stems of the first two
/// matched files joined by `_`, followed by `_joined.pdf`.
pub fn selection_file_name<S: AsRef<str>>(names: &[S]) -> String {
    let stems: Vec<&str> = names
        .iter()
        .take(2)
        .map(|name| normalize_name(name.as_ref()))
        .collect();

    format!("{}_joined.pdf", stems.join("_"))
}

fn common_prefix<'a>(mut names: impl Iterator<Item = &'a str>) -> &'a str {
    let Some(first) = names.next() else {
        return "";
    };

    let mut len = first.len();
    for name in names {
        len = first
            .char_indices()
            .zip(name.chars())
            .take_while(|((idx, a), b)| *idx < len && a == b)
            .map(|((idx, a), _)| idx + a.len_utf8())
            .last()
            .unwrap_or(0);
    }

    &first[..len]
}
