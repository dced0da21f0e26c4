//! Order-preserving (de)serialization of JSON objects into keyed records.
//!
//! The declaration-data snapshot stores every collection as a JSON object keyed
//! by name. Search results must follow the order entries appear in the source,
//! so objects are read into a `Vec` instead of a hash map.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A record whose name lives in the key of the enclosing JSON object.
pub trait Keyed {
    fn key(&self) -> &str;
    fn set_key(&mut self, key: String);
}

/// Serializes records as a JSON object keyed by [`Keyed::key`].
///
/// # Errors
/// Returns the serializer's error if any record fails to serialize.
pub fn serialize<S, T>(records: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Keyed + Serialize,
{
    let mut map = serializer.serialize_map(Some(records.len()))?;
    for record in records {
        map.serialize_entry(record.key(), record)?;
    }
    map.end()
}

/// Deserializes a JSON object into records in source order.
///
/// # Errors
/// Returns the deserializer's error if the input is not an object of records.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Keyed + Deserialize<'de>,
{
    deserializer.deserialize_map(KeyedVisitor(PhantomData))
}

struct KeyedVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for KeyedVisitor<T>
where
    T: Keyed + Deserialize<'de>,
{
    type Value = Vec<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of named records")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut records = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, mut record)) = access.next_entry::<String, T>()? {
            record.set_key(key);
            records.push(record);
        }
        Ok(records)
    }
}
