use std::sync::Arc;

use log::*;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{config::TelegramConfig, FileInfo, Messenger, TelegramApiError, Update, User};

/// Client for the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramApi {
    config: TelegramConfig,
    client: Arc<Client>,
}

/// Every Bot API response is wrapped in this envelope.
#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

impl TelegramApi {
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramApiError> {
        let client = Client::builder().build().map_err(|e| TelegramApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.config.api_host, self.config.bot_token.reveal())
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{file_path}", self.config.api_host, self.config.bot_token.reveal())
    }

    pub async fn call<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, TelegramApiError> {
        trace!("Calling Telegram method {method}");
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| TelegramApiError::RestResponseError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| TelegramApiError::RestResponseError(e.to_string()))?;
            return Err(TelegramApiError::QueryError { status, message });
        }
        let envelope =
            response.json::<ApiResponse<T>>().await.map_err(|e| TelegramApiError::JsonError(e.to_string()))?;
        if !envelope.ok {
            return Err(TelegramApiError::ApiError(envelope.description.unwrap_or_else(|| "unknown error".to_string())));
        }
        envelope.result.ok_or_else(|| TelegramApiError::JsonError("'result' missing from response".to_string()))
    }
}

impl Messenger for TelegramApi {
    async fn get_me(&self) -> Result<User, TelegramApiError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramApiError> {
        let body = serde_json::json!({ "chat_id": chat_id, "text": text });
        let _msg: serde_json::Value = self.call("sendMessage", &body).await?;
        debug!("✉️ Sent text message to chat {chat_id}");
        Ok(())
    }

    async fn send_photo(&self, chat_id: &str, photo_url: &str, caption: &str) -> Result<(), TelegramApiError> {
        let body = serde_json::json!({ "chat_id": chat_id, "photo": photo_url, "caption": caption });
        let _msg: serde_json::Value = self.call("sendPhoto", &body).await?;
        debug!("✉️ Sent photo message to chat {chat_id}");
        Ok(())
    }

    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, TelegramApiError> {
        let body = serde_json::json!({ "offset": offset, "timeout": timeout_secs });
        self.call("getUpdates", &body).await
    }

    async fn download_document(&self, file_id: &str) -> Result<Vec<u8>, TelegramApiError> {
        let body = serde_json::json!({ "file_id": file_id });
        let info: FileInfo = self.call("getFile", &body).await?;
        let file_path = info.file_path.ok_or(TelegramApiError::NoFilePath)?;
        let response = self
            .client
            .get(self.file_url(&file_path))
            .send()
            .await
            .map_err(|e| TelegramApiError::RestResponseError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| TelegramApiError::RestResponseError(e.to_string()))?;
            return Err(TelegramApiError::QueryError { status, message });
        }
        let bytes = response.bytes().await.map_err(|e| TelegramApiError::RestResponseError(e.to_string()))?;
        debug!("✉️ Downloaded file {file_id} ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }
}
