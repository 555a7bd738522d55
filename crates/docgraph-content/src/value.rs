use std::fmt;

use docgraph_types::{Asset, Checksum256, Name, TimePoint};
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ContentError, ContentResult};

/// Tagged value carried by a [`Content`](crate::Content).
///
/// On the wire a value is a two-element array of type tag and payload, e.g.
/// `["string", "details"]` or `["int64", 10010]`. `Empty` only appears as
/// the value of the lenient lookup sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum FlexValue {
    #[default]
    Empty,
    String(String),
    Int64(i64),
    Asset(Asset),
    Name(Name),
    Checksum256(Checksum256),
    Bytes(Vec<u8>),
    TimePoint(TimePoint),
}

impl FlexValue {
    /// The wire and canonical type tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Empty => "monostate",
            Self::String(_) => "string",
            Self::Int64(_) => "int64",
            Self::Asset(_) => "asset",
            Self::Name(_) => "name",
            Self::Checksum256(_) => "checksum256",
            Self::Bytes(_) => "bytes",
            Self::TimePoint(_) => "time_point",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    fn mismatch(&self, expected: &'static str) -> ContentError {
        ContentError::InvalidValue {
            expected,
            found: self.type_name(),
        }
    }

    pub fn as_str(&self) -> ContentResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    pub fn as_int(&self) -> ContentResult<i64> {
        match self {
            Self::Int64(v) => Ok(*v),
            other => Err(other.mismatch("int64")),
        }
    }

    pub fn as_asset(&self) -> ContentResult<&Asset> {
        match self {
            Self::Asset(a) => Ok(a),
            other => Err(other.mismatch("asset")),
        }
    }

    pub fn as_name(&self) -> ContentResult<Name> {
        match self {
            Self::Name(n) => Ok(*n),
            other => Err(other.mismatch("name")),
        }
    }

    pub fn as_checksum(&self) -> ContentResult<&Checksum256> {
        match self {
            Self::Checksum256(c) => Ok(c),
            other => Err(other.mismatch("checksum256")),
        }
    }

    pub fn as_bytes(&self) -> ContentResult<&[u8]> {
        match self {
            Self::Bytes(b) => Ok(b),
            other => Err(other.mismatch("bytes")),
        }
    }

    pub fn as_time_point(&self) -> ContentResult<TimePoint> {
        match self {
            Self::TimePoint(t) => Ok(*t),
            other => Err(other.mismatch("time_point")),
        }
    }
}

impl From<&str> for FlexValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FlexValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FlexValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<Asset> for FlexValue {
    fn from(a: Asset) -> Self {
        Self::Asset(a)
    }
}

impl From<Name> for FlexValue {
    fn from(n: Name) -> Self {
        Self::Name(n)
    }
}

impl From<Checksum256> for FlexValue {
    fn from(c: Checksum256) -> Self {
        Self::Checksum256(c)
    }
}

impl From<Vec<u8>> for FlexValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<TimePoint> for FlexValue {
    fn from(t: TimePoint) -> Self {
        Self::TimePoint(t)
    }
}

impl Serialize for FlexValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(self.type_name())?;
        match self {
            Self::Empty => tuple.serialize_element(&())?,
            Self::String(s) => tuple.serialize_element(s)?,
            Self::Int64(v) => tuple.serialize_element(v)?,
            Self::Asset(a) => tuple.serialize_element(a)?,
            Self::Name(n) => tuple.serialize_element(n)?,
            Self::Checksum256(c) => tuple.serialize_element(c)?,
            Self::Bytes(b) => tuple.serialize_element(&hex::encode(b))?,
            Self::TimePoint(t) => tuple.serialize_element(t)?,
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for FlexValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(2, FlexValueVisitor)
    }
}

struct FlexValueVisitor;

impl<'de> Visitor<'de> for FlexValueVisitor {
    type Value = FlexValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a [type, value] pair")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FlexValue, A::Error> {
        let tag: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        fn payload<'a, A: SeqAccess<'a>, T: Deserialize<'a>>(
            seq: &mut A,
            visitor: &FlexValueVisitor,
        ) -> Result<T, A::Error> {
            seq.next_element()?
                .ok_or_else(|| de::Error::invalid_length(1, visitor))
        }

        let value = match tag.as_str() {
            "monostate" => {
                payload::<A, ()>(&mut seq, &self)?;
                FlexValue::Empty
            }
            "string" => FlexValue::String(payload(&mut seq, &self)?),
            "int64" => FlexValue::Int64(payload(&mut seq, &self)?),
            "asset" => FlexValue::Asset(payload(&mut seq, &self)?),
            "name" => FlexValue::Name(payload(&mut seq, &self)?),
            "checksum256" => FlexValue::Checksum256(payload(&mut seq, &self)?),
            "bytes" => {
                let encoded: String = payload(&mut seq, &self)?;
                FlexValue::Bytes(hex::decode(&encoded).map_err(de::Error::custom)?)
            }
            "time_point" => FlexValue::TimePoint(payload(&mut seq, &self)?),
            other => {
                return Err(de::Error::unknown_variant(
                    other,
                    &[
                        "monostate",
                        "string",
                        "int64",
                        "asset",
                        "name",
                        "checksum256",
                        "bytes",
                        "time_point",
                    ],
                ))
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_accessors_match_variant() {
        assert_eq!(FlexValue::from("x").as_str().unwrap(), "x");
        assert_eq!(FlexValue::from(7i64).as_int().unwrap(), 7);
        let name: Name = "alice".parse().unwrap();
        assert_eq!(FlexValue::from(name).as_name().unwrap(), name);
        let bytes = FlexValue::from(vec![1u8, 2, 3]);
        assert_eq!(bytes.as_bytes().unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn typed_accessor_mismatch_is_invalid_value() {
        let err = FlexValue::from(7i64).as_str().unwrap_err();
        assert_eq!(
            err,
            ContentError::InvalidValue {
                expected: "string",
                found: "int64"
            }
        );
        assert!(FlexValue::Empty.as_int().is_err());
    }

    #[test]
    fn wire_form_is_tagged_pair() {
        let value = FlexValue::from("details");
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(["string", "details"]));
        let value = FlexValue::from(10010i64);
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(["int64", 10010]));
    }

    #[test]
    fn parses_historical_dump_values() {
        let name: FlexValue = serde_json::from_value(json!(["name", "hypha1....14i"])).unwrap();
        assert_eq!(name.type_name(), "name");
        let asset: FlexValue = serde_json::from_value(json!(["asset", "130.00 USD"])).unwrap();
        assert_eq!(asset.as_asset().unwrap().amount, 13_000);
    }

    #[test]
    fn every_variant_roundtrips_through_json() {
        let values = vec![
            FlexValue::Empty,
            FlexValue::from("text"),
            FlexValue::from(-3i64),
            FlexValue::from("1.5 TEST".parse::<Asset>().unwrap()),
            FlexValue::from("dao.hypha".parse::<Name>().unwrap()),
            FlexValue::from(Checksum256::digest(b"doc")),
            FlexValue::from(vec![0xde, 0xad]),
            FlexValue::from(TimePoint::from_secs(1_600_000_000)),
        ];
        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let parsed: FlexValue = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, value);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = serde_json::from_value::<FlexValue>(json!(["float", 1.5])).unwrap_err();
        assert!(err.to_string().contains("float"));
    }
}
