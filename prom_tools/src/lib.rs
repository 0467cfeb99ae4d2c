mod api;
mod config;
mod error;
mod marketplace;
mod order;
mod product;

pub use api::PromApi;
pub use config::PromConfig;
pub use error::PromApiError;
pub use marketplace::Marketplace;
pub use order::{DeliveryProviderData, LineItem, Order, OrderStatus};
pub use product::{Product, ProductImage};
