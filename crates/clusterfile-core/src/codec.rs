//! Text ↔ tree codec boundary.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("PARSE_FAILED: {0}")]
    Parse(String),
    #[error("SERIALIZE_FAILED: {0}")]
    Serialize(String),
}

/// Parses and serializes the clusterfile's textual notation.
///
/// The store treats this as an opaque collaborator; the shipped
/// implementation speaks YAML. Implementations must keep mapping key
/// order through a parse/serialize round trip.
pub trait DocumentCodec {
    fn parse(&self, text: &str) -> Result<Value, CodecError>;
    fn serialize(&self, doc: &Value) -> Result<String, CodecError>;
}

/// YAML codec.
///
/// Blank input parses to an empty mapping. Key order survives the round
/// trip; comments in hand-edited text do not.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlCodec;

impl DocumentCodec for YamlCodec {
    fn parse(&self, text: &str) -> Result<Value, CodecError> {
        if text.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_yaml::from_str(text).map_err(|e| CodecError::Parse(e.to_string()))
    }

    fn serialize(&self, doc: &Value) -> Result<String, CodecError> {
        serde_yaml::to_string(doc).map_err(|e| CodecError::Serialize(e.to_string()))
    }
}
