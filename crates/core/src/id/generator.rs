use uuid::Uuid;

use super::source::{SystemSource, UuidSource};

/// Maximum number of tag characters kept in a tagged identifier.
pub const TAG_MAX_LEN: usize = 4;

/// Number of hex characters after the `_` in a tagged identifier.
pub const SUFFIX_LEN: usize = 21;

/// Length of an untagged identifier (a UUID without dashes).
pub const UUID_HEX_LEN: usize = 32;

/// Mints identifiers from a [`UuidSource`].
///
/// The generator holds no state of its own; every call draws a fresh value
/// from the source.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator<S = SystemSource> {
    source: S,
}

impl IdGenerator<SystemSource> {
    /// Generator backed by the process-wide random source.
    pub const fn system() -> Self {
        Self {
            source: SystemSource,
        }
    }
}

impl<S: UuidSource> IdGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns `<tag>_<suffix>`.
    ///
    /// The tag is cut to at most [`TAG_MAX_LEN`] characters and never padded,
    /// so an empty tag yields an identifier starting with `_`. The suffix is
    /// the first [`SUFFIX_LEN`] hex characters of a fresh UUID.
    pub fn generate(&self, tag: &str) -> String {
        let hex = hex_uuid(self.source.next_uuid());
        let tag = truncate_tag(tag);

        let mut id = String::with_capacity(tag.len() + 1 + SUFFIX_LEN);
        id.push_str(tag);
        id.push('_');
        id.push_str(&hex[..SUFFIX_LEN]);
        id
    }

    /// Returns the 32 lowercase hex characters of a fresh UUID.
    pub fn generate_uuid(&self) -> String {
        hex_uuid(self.source.next_uuid())
    }
}

/// Generates a tagged identifier from the process-wide random source.
///
/// # Examples
///
/// ```
/// let id = keel_core::id::generate("user");
/// assert!(id.starts_with("user_"));
/// assert_eq!(id.len(), 5 + keel_core::id::SUFFIX_LEN);
///
/// assert!(keel_core::id::generate("averylongtag").starts_with("aver_"));
/// ```
pub fn generate(tag: &str) -> String {
    IdGenerator::system().generate(tag)
}

/// Generates an untagged 32-character identifier from the process-wide
/// random source.
pub fn generate_uuid() -> String {
    IdGenerator::system().generate_uuid()
}

/// Splits a tagged identifier into its tag and suffix.
///
/// Returns `None` unless the input has the exact shape produced by
/// [`generate`]. Tags may themselves contain `_`; the suffix never does.
///
/// # Examples
///
/// ```
/// use keel_core::id::split_id;
///
/// assert_eq!(
///     split_id("user_0123456789abcdef01234"),
///     Some(("user", "0123456789abcdef01234"))
/// );
/// assert_eq!(split_id("user_XYZ"), None);
/// ```
pub fn split_id(id: &str) -> Option<(&str, &str)> {
    let (tag, suffix) = id.rsplit_once('_')?;
    if tag.chars().count() > TAG_MAX_LEN || !is_lower_hex(suffix, SUFFIX_LEN) {
        return None;
    }
    Some((tag, suffix))
}

/// Returns true if `id` is a well-formed tagged identifier.
pub fn is_valid_id(id: &str) -> bool {
    split_id(id).is_some()
}

fn hex_uuid(uuid: Uuid) -> String {
    // The simple form is the hyphenated form with its four dashes removed.
    uuid.simple().to_string()
}

fn truncate_tag(tag: &str) -> &str {
    match tag.char_indices().nth(TAG_MAX_LEN) {
        Some((end, _)) => &tag[..end],
        None => tag,
    }
}

fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;
    use crate::id::SeededSource;

    /// Hands out a fixed list of UUIDs in order, wrapping around.
    struct FixedSource {
        values: Vec<Uuid>,
        next: AtomicUsize,
    }

    impl FixedSource {
        fn new(values: &[&str]) -> Self {
            Self {
                values: values
                    .iter()
                    .map(|v| Uuid::parse_str(v).unwrap())
                    .collect(),
                next: AtomicUsize::new(0),
            }
        }
    }

    impl UuidSource for FixedSource {
        fn next_uuid(&self) -> Uuid {
            let i = self.next.fetch_add(1, Ordering::SeqCst);
            self.values[i % self.values.len()]
        }
    }

    fn fixed() -> IdGenerator<FixedSource> {
        IdGenerator::new(FixedSource::new(&["550e8400-e29b-41d4-a716-446655440000"]))
    }

    fn assert_tagged(id: &str, expected_prefix: &str) {
        assert!(
            id.starts_with(expected_prefix),
            "expected prefix {expected_prefix}, got {id}"
        );
        let suffix = &id[expected_prefix.len()..];
        assert!(is_lower_hex(suffix, SUFFIX_LEN), "bad suffix in {id}");
    }

    #[test]
    fn test_generate_exact_format() {
        assert_eq!(fixed().generate("user"), "user_550e8400e29b41d4a7164");
    }

    #[test]
    fn test_generate_uuid_exact_format() {
        assert_eq!(fixed().generate_uuid(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn test_generate_prefixes() {
        let cases = [
            ("user", "user_"),
            ("verylongprefix", "very_"),
            ("averylongtag", "aver_"),
            ("u", "u_"),
            ("", "_"),
            ("serv", "serv_"),
        ];

        for (tag, expected_prefix) in cases {
            let id = generate(tag);
            assert_tagged(&id, expected_prefix);
            assert_eq!(id.len(), expected_prefix.len() + SUFFIX_LEN);
        }
    }

    #[test]
    fn test_generate_truncates_by_character() {
        let id = fixed().generate("ñandú");
        assert_eq!(id, "ñand_550e8400e29b41d4a7164");
    }

    #[test]
    fn test_generate_matches_user_pattern() {
        let id = generate("user");
        assert_tagged(&id, "user_");
        assert!(is_valid_id(&id));
    }

    #[test]
    fn test_generate_uniqueness() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate("user")).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_generate_uuid_format() {
        let uuid = generate_uuid();
        assert_eq!(uuid.len(), UUID_HEX_LEN);
        assert!(is_lower_hex(&uuid, UUID_HEX_LEN));
    }

    #[test]
    fn test_generate_uuid_uniqueness() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_uuid()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_generate_concurrently() {
        let generator = IdGenerator::system();
        let ids: HashSet<String> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| (0..1_250).map(|_| generator.generate("conc")).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let a = IdGenerator::new(SeededSource::new(7));
        let b = IdGenerator::new(SeededSource::new(7));

        assert_eq!(a.generate("sess"), b.generate("sess"));
        assert_eq!(a.generate_uuid(), b.generate_uuid());
    }

    #[test]
    fn test_suffix_carries_version_nibble() {
        // Character 12 of a v4 UUID's hex form is always '4'.
        let id = IdGenerator::new(SeededSource::new(3)).generate("");
        assert_eq!(&id[13..14], "4");
    }

    #[test]
    fn test_split_id() {
        assert_eq!(
            split_id("user_550e8400e29b41d4a7164"),
            Some(("user", "550e8400e29b41d4a7164"))
        );
        assert_eq!(split_id("_550e8400e29b41d4a7164"), Some(("", "550e8400e29b41d4a7164")));
        assert_eq!(
            split_id("a_b_550e8400e29b41d4a7164"),
            Some(("a_b", "550e8400e29b41d4a7164"))
        );
    }

    #[test]
    fn test_split_id_rejects_malformed() {
        assert_eq!(split_id("user550e8400e29b41d4a7164"), None);
        assert_eq!(split_id("users_550e8400e29b41d4a7164"), None);
        assert_eq!(split_id("user_550E8400E29B41D4A7164"), None);
        assert_eq!(split_id("user_550e8400e29b41d4a716"), None);
        assert_eq!(split_id("user_550e8400e29b41d4a71640"), None);
        assert_eq!(split_id(""), None);
    }
}
