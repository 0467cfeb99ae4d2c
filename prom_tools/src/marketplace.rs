use crate::{Order, OrderStatus, Product};

/// The upstream marketplace surface the order processor depends on.
///
/// All methods degrade soft: transport failures, non-2xx responses and malformed payloads are
/// logged by the implementation and reported as an empty list, `None` or `false`. The next polling
/// cycle is the retry.
#[allow(async_fn_in_trait)]
pub trait Marketplace {
    /// Fetch all orders currently in the given status.
    async fn list_orders(&self, status: &OrderStatus) -> Vec<Order>;

    /// Fetch a single product, primarily to read its private note and images.
    async fn get_product(&self, product_id: i64) -> Option<Product>;

    /// Transition an order to the given status. Returns `true` on success.
    async fn set_status(&self, order_id: i64, status: &OrderStatus) -> bool;
}
