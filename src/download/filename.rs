//! Output filename derivation for downloaded emoji.

/// Builds the output filename for an emoji: `<name><extension>`.
///
/// The extension is everything from the last `.` of `url` through its end,
/// so `https://emoji.slack-edge.com/T1/squirrel/f35f40c0e0.png` yields
/// `.png`. When the URL has no `.`, or the last `.` sits before a `/`
/// (inside the host or a directory segment), the name is used as-is.
///
/// Names are sanitised first, so two emoji differing only in a path
/// separator (`a/b` and `a_b`) map to the same file. The download loop warns
/// when that happens and the later entry wins.
#[must_use]
pub fn output_filename(name: &str, url: &str) -> String {
    format!("{}{}", sanitize_name(name), extension_from_url(url))
}

pub(crate) fn extension_from_url(url: &str) -> &str {
    match url.rfind('.') {
        Some(index) if !url[index..].contains('/') => &url[index..],
        _ => "",
    }
}

/// Keeps emoji names from escaping the output directory. An empty name
/// becomes `_` so the result never resolves to the directory itself.
pub(crate) fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" => "_".to_string(),
        "." | ".." => cleaned.replace('.', "_"),
        _ => cleaned,
    }
}
