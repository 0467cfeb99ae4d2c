mod api;
mod config;
mod data_objects;
mod error;
mod messenger;

pub use api::TelegramApi;
pub use config::TelegramConfig;
pub use data_objects::{Chat, Document, FileInfo, Message, Update, User};
pub use error::TelegramApiError;
pub use messenger::Messenger;
