use std::path::{Path, PathBuf};

/// `<parent>/<stem>_<marker><suffix>`, next to `source`.
///
/// A missing leading dot on `suffix` is added.
pub fn sibling_with_marker(source: &Path, marker: &str, suffix: &str) -> PathBuf {
    let stem = file_stem(source);
    let name = format!("{stem}_{marker}{}", dotted(suffix));
    with_parent(source, name)
}

/// Like [`sibling_with_marker`], but whitespace in the stem becomes `_` and
/// an empty marker is omitted entirely.
pub fn generated_file_name(source: &Path, marker: &str, suffix: &str) -> PathBuf {
    let stem = file_stem(source)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let name = if marker.is_empty() {
        format!("{stem}{}", dotted(suffix))
    } else {
        format!("{stem}_{marker}{}", dotted(suffix))
    };
    with_parent(source, name)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn dotted(suffix: &str) -> String {
    if suffix.is_empty() || suffix.starts_with('.') {
        suffix.to_string()
    } else {
        format!(".{suffix}")
    }
}

fn with_parent(source: &Path, name: String) -> PathBuf {
    match source.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
