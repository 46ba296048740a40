//! `serde` support, enabled with the `serde` cargo feature.
//!
//! A map serializes as a serde map of its occupied entries in slot order.
//! Deserializing replays the entries through [`FixedMap::insert`], so keys that
//! match an earlier key under the map's matcher overwrite its value, and more
//! distinct keys than the capacity is an `invalid_length` error.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, Error, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{FixedMap, FixedMapError, KeyMatcher};

impl<K, V, const N: usize, M> Serialize for FixedMap<K, V, N, M>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len))?;
        for index in 0..self.len {
            map.serialize_entry(&self.keys[index], &self.values[index])?;
        }
        map.end()
    }
}

struct FixedMapVisitor<K, V, const N: usize, M> {
    marker: PhantomData<fn() -> FixedMap<K, V, N, M>>,
}

impl<'de, K, V, const N: usize, M> Visitor<'de> for FixedMapVisitor<K, V, N, M>
where
    K: Deserialize<'de> + Default,
    V: Deserialize<'de> + Clone + Default,
    M: KeyMatcher<K> + Default,
{
    type Value = FixedMap<K, V, N, M>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "a map with at most {} entries", N)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = FixedMap::default();
        let mut seen = 0usize;

        while let Some((key, value)) = access.next_entry()? {
            seen += 1;
            if let Err(FixedMapError::CapacityExceeded { .. }) = map.insert(key, value) {
                // Count the rest so the error reports the full input length
                while access.next_entry::<K, V>()?.is_some() {
                    seen += 1;
                }
                return Err(A::Error::invalid_length(seen, &self));
            }
        }

        Ok(map)
    }
}

impl<'de, K, V, const N: usize, M> Deserialize<'de> for FixedMap<K, V, N, M>
where
    K: Deserialize<'de> + Default,
    V: Deserialize<'de> + Clone + Default,
    M: KeyMatcher<K> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FixedMapVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{AsciiCaseInsensitive, FixedMap};

    #[test]
    fn serializes_occupied_entries_in_order() {
        let mut map = FixedMap::<String, u32, 4>::new();
        map.insert("b".to_string(), 2).unwrap();
        map.insert("a".to_string(), 1).unwrap();
        map.insert("c".to_string(), 3).unwrap();
        map.remove(&"a".to_string());

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"b":2,"c":3}"#);
    }

    #[test]
    fn deserializes_within_capacity() {
        let map: FixedMap<String, u32, 4> = serde_json::from_str(r#"{"x":1,"y":2}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.key_at(0).unwrap(), "x");
        assert_eq!(map.get(&"y".to_string()), Some(&2));
    }

    #[test]
    fn matching_keys_collapse_on_deserialize() {
        let map: FixedMap<String, u32, 2, AsciiCaseInsensitive> =
            serde_json::from_str(r#"{"Key":1,"KEY":2,"other":3}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.key_at(0).unwrap(), "Key");
        assert_eq!(map.get(&"key".to_string()), Some(&2));
    }

    #[test]
    fn too_many_entries_is_an_error() {
        let result: Result<FixedMap<String, u32, 2>, _> =
            serde_json::from_str(r#"{"a":1,"b":2,"c":3,"d":4}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("invalid length 4"), "{message}");
        assert!(message.contains("at most 2 entries"), "{message}");
    }
}
