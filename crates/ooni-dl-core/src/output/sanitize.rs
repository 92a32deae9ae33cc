//! Check that an item index can be used as a file stem as-is.

/// Linux NAME_MAX minus room for the `.json.part` suffix.
const STEM_MAX: usize = 255 - ".json.part".len();

/// Returns `index` unchanged when `<index>.json` names a file directly inside
/// the output directory.
///
/// Rejects `""`, `"."`, `".."`, anything containing NUL, `/`, `\` or a control
/// character, and indexes too long for `<index>.json.part` to fit in NAME_MAX.
/// Nothing is rewritten, so two distinct indexes never share a file.
pub fn file_stem_for_index(index: &str) -> Option<&str> {
    if index.is_empty() || index == "." || index == ".." || index.len() > STEM_MAX {
        return None;
    }
    if index
        .chars()
        .any(|c| c == '\0' || c == '/' || c == '\\' || c.is_control())
    {
        return None;
    }
    Some(index)
}
