use crate::{TelegramApiError, Update, User};

/// The messaging-platform surface the order processor depends on.
///
/// Unlike the marketplace seam, these methods surface errors to the caller: the processor needs
/// to observe a failed photo send so it can fall back to a plain text message.
#[allow(async_fn_in_trait)]
pub trait Messenger {
    async fn get_me(&self) -> Result<User, TelegramApiError>;

    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramApiError>;

    /// Send a photo by URL with a caption. Telegram fetches the URL itself, so this can fail even
    /// when the connection to Telegram is fine (e.g. the image host rejects the hotlink).
    async fn send_photo(&self, chat_id: &str, photo_url: &str, caption: &str) -> Result<(), TelegramApiError>;

    /// Long-poll for updates with ids strictly greater than `offset - 1`.
    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, TelegramApiError>;

    /// Resolve a file id and download its contents.
    async fn download_document(&self, file_id: &str) -> Result<Vec<u8>, TelegramApiError>;
}
