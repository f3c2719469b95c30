//! Identifier sharding.
//!
//! Large identifier spaces would otherwise put every blob of a space into a
//! single directory. [`shard`] splits the leading characters of an
//! identifier into fixed-width directory levels, so per-directory fanout is
//! bounded by the identifier alphabet raised to `segment_len`.

use std::path::{Component, Path, PathBuf};

/// Split `id` into at most `segments` directory levels of `segment_len`
/// characters each, followed by the unconsumed remainder.
///
/// Splitting stops early once the remainder is no longer than
/// `segment_len`, so the final component is never empty. Widths are counted
/// in characters, not bytes.
///
/// # Panics
///
/// Panics if `segment_len` is zero.
///
/// # Examples
///
/// ```
/// use spacestore_blob::shard;
///
/// assert_eq!(shard("4c510ada-c86b-4815-8820-42cdf82c3d51", 4, 2), "4c/51/0a/da/-c86b-4815-8820-42cdf82c3d51");
/// assert_eq!(shard("blobA", 4, 2), "bl/ob/A");
/// assert_eq!(shard("ab", 1, 2), "ab");
/// ```
pub fn shard(id: &str, segments: usize, segment_len: usize) -> String {
    assert!(segment_len > 0, "shard segment length must be positive");

    let mut out = String::with_capacity(id.len() + segments);
    let mut rest = id;
    for _ in 0..segments {
        // A char at index `segment_len` exists only if more than
        // `segment_len` characters remain.
        let Some((split, _)) = rest.char_indices().nth(segment_len) else {
            break;
        };
        out.push_str(&rest[..split]);
        out.push('/');
        rest = &rest[split..];
    }
    out.push_str(rest);
    out
}

/// Lexically resolve `relative` beneath `root`.
///
/// Root and prefix components are ignored, `.` is dropped and `..` pops at
/// most back to `root`. The result therefore never leaves `root`, whatever
/// characters the identifiers in `relative` contain.
pub fn confine(root: &Path, relative: &Path) -> PathBuf {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    let mut path = root.to_path_buf();
    path.extend(parts);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_full_segments_then_remainder() {
        assert_eq!(shard("abcdefghij", 4, 2), "ab/cd/ef/gh/ij");
        assert_eq!(shard("abcdefghijk", 4, 2), "ab/cd/ef/gh/ijk");
        assert_eq!(shard("space1", 1, 2), "sp/ace1");
    }

    #[test]
    fn short_identifiers_stop_early() {
        assert_eq!(shard("blobA", 4, 2), "bl/ob/A");
        assert_eq!(shard("abc", 1, 2), "ab/c");
        assert_eq!(shard("ab", 1, 2), "ab");
        assert_eq!(shard("a", 4, 2), "a");
        assert_eq!(shard("abcd", 4, 2), "ab/cd");
    }

    #[test]
    fn zero_segments_is_identity() {
        assert_eq!(shard("anything", 0, 3), "anything");
    }

    #[test]
    fn multibyte_characters_are_not_split() {
        assert_eq!(shard("äöüß", 1, 2), "äö/üß");
        assert_eq!(shard("日本語テキスト", 2, 3), "日本語/テキス/ト");
    }

    #[test]
    #[should_panic(expected = "segment length must be positive")]
    fn zero_segment_length_panics() {
        shard("abc", 1, 0);
    }

    #[test]
    fn confine_drops_traversal() {
        let root = Path::new("/store");
        assert_eq!(
            confine(root, Path::new("spaces/../../../etc/passwd")),
            PathBuf::from("/store/etc/passwd")
        );
        assert_eq!(
            confine(root, Path::new("/spaces/./a//b")),
            PathBuf::from("/store/spaces/a/b")
        );
        assert_eq!(confine(root, Path::new("..")), PathBuf::from("/store"));
    }

    proptest! {
        #[test]
        fn shard_is_deterministic(id in "\\PC{1,64}", segments in 0usize..6, len in 1usize..5) {
            prop_assert_eq!(shard(&id, segments, len), shard(&id, segments, len));
        }

        #[test]
        fn shard_preserves_characters(id in "[a-z0-9-]{1,64}", segments in 0usize..6, len in 1usize..5) {
            let sharded = shard(&id, segments, len);
            prop_assert_eq!(sharded.replace('/', ""), id);
            prop_assert!(!sharded.ends_with('/'));
        }

        #[test]
        fn confined_paths_stay_under_root(rel in "[a-z./]{0,40}") {
            let root = Path::new("/store");
            prop_assert!(confine(root, Path::new(&rel)).starts_with(root));
        }
    }
}
