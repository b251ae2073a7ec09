//! Pure path helpers shared by the domain and application layers.

/// Separator used when splitting and joining paths in [`positional_relative`].
pub const SEPARATOR: char = '/';

/// Compute `path` relative to `basepath` by positional segment comparison.
///
/// Both inputs are split on [`SEPARATOR`]. Walking the segments of `path`
/// pairwise with those of `basepath`, a segment survives only when it differs
/// from the `basepath` segment at the same index. Empty segments are dropped.
///
/// This is a positional filter, not a prefix strip: a later segment that
/// equals the basepath segment at its index is dropped as well, e.g.
/// `positional_relative("a/b/a", "a/x/a") == "b"`. No `.`/`..` handling.
pub fn positional_relative(path: &str, basepath: &str) -> String {
    let mut base = basepath.split(SEPARATOR);

    path.split(SEPARATOR)
        .filter(|segment| base.next() != Some(*segment))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}
