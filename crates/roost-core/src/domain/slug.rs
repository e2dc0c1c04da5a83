//! Package-name derivation.

/// Longest package name npm accepts.
pub const MAX_PACKAGE_NAME_LEN: usize = 214;

/// Derive an npm package name from a display name.
///
/// One leading `.` or `_` is stripped (a single pass: `"..x"` keeps its
/// second dot), whitespace runs become a single `-`, and the result is
/// lowercased and cut to [`MAX_PACKAGE_NAME_LEN`] characters.
pub fn slugify(name: &str) -> String {
    let stripped = name
        .strip_prefix('.')
        .or_else(|| name.strip_prefix('_'))
        .unwrap_or(name);

    let mut out = String::with_capacity(stripped.len());
    let mut in_space = false;
    for c in stripped.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }

    // Lowercasing can lengthen a string, so the cut comes last.
    out.to_lowercase().chars().take(MAX_PACKAGE_NAME_LEN).collect()
}
