use serde::{Deserialize, Serialize};

use crate::key::StorageKey;

/// Marker value carried in the `result` field of a successful upload.
pub const RESULT_OK: &str = "OK";

/// Wire response returned to the client once per successful ingestion.
///
/// Serializes as `{"fid": "<assigned key>", "result": "OK"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub fid: String,
    pub result: String,
}

impl UploadReceipt {
    /// Receipt for a successfully stored object.
    pub fn ok(key: &StorageKey) -> Self {
        Self {
            fid: key.to_string(),
            result: RESULT_OK.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_receipt_carries_the_key() {
        let key = StorageKey::from("1000000045");
        let receipt = UploadReceipt::ok(&key);
        assert_eq!(receipt.fid, "1000000045");
        assert_eq!(receipt.result, RESULT_OK);
    }

    #[test]
    fn wire_field_names() {
        let receipt = UploadReceipt::ok(&StorageKey::from("77"));
        let json = serde_json::to_string(&receipt).unwrap();
        assert_eq!(json, r#"{"fid":"77","result":"OK"}"#);
    }

    #[test]
    fn roundtrips_through_json() {
        let receipt = UploadReceipt::ok(&StorageKey::from("123"));
        let json = serde_json::to_string(&receipt).unwrap();
        let back: UploadReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, receipt);
    }
}
