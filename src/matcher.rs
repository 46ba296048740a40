//! Key equality strategies.
//!
//! A [`FixedMap`](crate::FixedMap) never hashes or orders its keys; it only
//! asks whether a probe key matches a stored key. The strategy answering that
//! question is chosen when the map is built and cannot change afterwards.

/// Decides whether two keys refer to the same map entry.
///
/// Implemented for [`NativeEq`], [`AsciiCaseInsensitive`] and for every
/// closure or function with the signature `Fn(&K, &K) -> bool`.
///
/// The map scans occupied slots from index 0 upward and stops at the first
/// match, so a strategy whose equivalence classes overlap resolves to the
/// earliest inserted key.
pub trait KeyMatcher<K: ?Sized> {
    /// Returns `true` if `probe` matches the key stored in a slot.
    fn matches(&self, probe: &K, stored: &K) -> bool;
}

/// Matches keys with their `PartialEq` implementation. This is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeEq;

impl<K: PartialEq + ?Sized> KeyMatcher<K> for NativeEq {
    #[inline]
    fn matches(&self, probe: &K, stored: &K) -> bool {
        probe == stored
    }
}

/// Matches string-like keys ignoring ASCII case.
///
/// ```rust
/// use fixedmap::{AsciiCaseInsensitive, FixedMap};
///
/// let mut map = FixedMap::<&str, u8, 4, _>::with_matcher(AsciiCaseInsensitive);
/// map.insert("foo", 1).unwrap();
/// assert!(map.contains(&"FOO"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsciiCaseInsensitive;

impl<K: AsRef<str> + ?Sized> KeyMatcher<K> for AsciiCaseInsensitive {
    #[inline]
    fn matches(&self, probe: &K, stored: &K) -> bool {
        probe.as_ref().eq_ignore_ascii_case(stored.as_ref())
    }
}

impl<K: ?Sized, F> KeyMatcher<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn matches(&self, probe: &K, stored: &K) -> bool {
        self(probe, stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_eq_uses_partial_eq() {
        assert!(NativeEq.matches(&3, &3));
        assert!(!NativeEq.matches(&3, &4));
        assert!(NativeEq.matches("abc", "abc"));
    }

    #[test]
    fn ascii_case_insensitive() {
        assert!(AsciiCaseInsensitive.matches(&"Foo", &"fOO"));
        assert!(!AsciiCaseInsensitive.matches(&"foo", &"bar"));
        assert!(AsciiCaseInsensitive.matches(&String::from("HeLLo"), &String::from("hello")));
    }

    #[test]
    fn closures_are_matchers() {
        // Same bucket of ten.
        let by_decade = |a: &u32, b: &u32| a / 10 == b / 10;
        assert!(by_decade.matches(&12, &19));
        assert!(!by_decade.matches(&12, &21));

        fn same_parity(a: &i64, b: &i64) -> bool {
            a % 2 == b % 2
        }
        assert!(same_parity.matches(&4, &10));
    }
}
