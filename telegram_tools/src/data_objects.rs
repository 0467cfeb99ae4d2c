use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

impl Update {
    /// The attached document, if this update is a message carrying one.
    pub fn document(&self) -> Option<&Document> {
        self.message.as_ref().and_then(|m| m.document.as_ref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub document: Option<Document>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn update_with_document() {
        let json = r#"{
            "update_id": 42,
            "message": {
                "message_id": 7,
                "chat": {"id": -1001234},
                "document": {"file_id": "abc123", "file_name": "prom_import_data.json"}
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        let doc = update.document().unwrap();
        assert_eq!(doc.file_name.as_deref(), Some("prom_import_data.json"));
    }

    #[test]
    fn plain_text_update_has_no_document() {
        let json = r#"{"update_id": 43, "message": {"message_id": 8, "chat": {"id": 5}, "text": "hi"}}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert!(update.document().is_none());
    }
}
