//! Serializable record types with base64-encoded byte fields

use serde::{Deserialize, Serialize};

use super::helpers::{base64_to_bytes, block_from_base64, block_to_base64, bytes_to_base64};
use crate::error::Result;
use crate::forbidden::GcmMessage;

/// GCM record as exchanged with callers: every byte string is base64
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(default)]
    pub associated_data: String,
    pub ciphertext: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_tag: Option<String>,
}

impl MessageRecord {
    /// Decode into a [`GcmMessage`]
    pub fn to_message(&self) -> Result<GcmMessage> {
        let auth_tag = match &self.auth_tag {
            Some(tag) => Some(block_from_base64(tag)?),
            None => None,
        };
        Ok(GcmMessage::new(
            base64_to_bytes(&self.associated_data)?,
            base64_to_bytes(&self.ciphertext)?,
            auth_tag,
        ))
    }

    /// Encode a [`GcmMessage`]
    pub fn from_message(message: &GcmMessage) -> Self {
        MessageRecord {
            associated_data: bytes_to_base64(&message.associated_data),
            ciphertext: bytes_to_base64(&message.ciphertext),
            auth_tag: message.auth_tag.as_ref().map(block_to_base64),
        }
    }
}

impl TryFrom<&MessageRecord> for GcmMessage {
    type Error = crate::Error;

    fn try_from(record: &MessageRecord) -> Result<Self> {
        record.to_message()
    }
}

impl From<&GcmMessage> for MessageRecord {
    fn from(message: &GcmMessage) -> Self {
        MessageRecord::from_message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_json() {
        let json = r#"{
            "associated_data": "",
            "ciphertext": "QoMewiF3dCRLciG3hNDUnOOqIS8sAqTgNcF+IymsoS4h1RSyVGaTHH2PalqshKoF",
            "auth_tag": "UWigU6JGUYX2sZ7CZaToiw=="
        }"#;
        let record: MessageRecord = serde_json::from_str(json).unwrap();
        let message = record.to_message().unwrap();
        assert!(message.associated_data.is_empty());
        assert_eq!(message.ciphertext.len(), 48);
        assert!(message.auth_tag.is_some());
    }

    #[test]
    fn test_record_without_tag() {
        let json = r#"{ "ciphertext": "AAAA" }"#;
        let record: MessageRecord = serde_json::from_str(json).unwrap();
        let message = GcmMessage::try_from(&record).unwrap();
        assert_eq!(message.ciphertext, vec![0, 0, 0]);
        assert_eq!(message.auth_tag, None);
        let expected = MessageRecord {
            associated_data: String::new(),
            ciphertext: "AAAA".to_string(),
            auth_tag: None,
        };
        assert_eq!(MessageRecord::from(&message), expected);
    }

    #[test]
    fn test_record_rejects_short_tag() {
        let record = MessageRecord {
            associated_data: String::new(),
            ciphertext: String::new(),
            auth_tag: Some("AAAA".to_string()),
        };
        assert!(matches!(
            record.to_message(),
            Err(crate::Error::InvalidBlockLength(3))
        ));
    }
}
