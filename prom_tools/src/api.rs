use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Response,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{config::PromConfig, Marketplace, Order, OrderStatus, Product, PromApiError};

/// Client for the Prom.ua seller REST API. One instance per shop token.
#[derive(Clone)]
pub struct PromApi {
    config: PromConfig,
    client: Arc<Client>,
}

impl PromApi {
    pub fn new(config: PromConfig) -> Result<Self, PromApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let bearer = format!("Bearer {}", config.api_token.reveal());
        let val = HeaderValue::from_str(&bearer).map_err(|e| PromApiError::Initialization(e.to_string()))?;
        headers.insert("Authorization", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client =
            Client::builder().default_headers(headers).build().map_err(|e| PromApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_host)
    }

    /// The seller API only ever reads via GET with query parameters.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, PromApiError> {
        let url = self.url(path);
        trace!("GET {url}");
        let mut req = self.client.get(url);
        if !params.is_empty() {
            req = req.query(params);
        }
        let response = req.send().await.map_err(|e| PromApiError::RestResponseError(e.to_string()))?;
        Self::parse_response(response).await
    }

    /// Mutations go through POST with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, PromApiError> {
        let url = self.url(path);
        trace!("POST {url}");
        let response =
            self.client.post(url).json(body).send().await.map_err(|e| PromApiError::RestResponseError(e.to_string()))?;
        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, PromApiError> {
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| PromApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| PromApiError::RestResponseError(e.to_string()))?;
            Err(PromApiError::QueryError { status, message })
        }
    }

    async fn fetch_orders(&self, status: &OrderStatus) -> Result<Vec<Order>, PromApiError> {
        #[derive(Deserialize)]
        struct OrdersResponse {
            #[serde(default)]
            orders: Vec<Order>,
        }
        let status = status.to_string();
        let result = self.get::<OrdersResponse>("/orders/list", &[("status", status.as_str())]).await?;
        debug!("Fetched {} orders with status '{status}'", result.orders.len());
        Ok(result.orders)
    }

    async fn fetch_product(&self, product_id: i64) -> Result<Product, PromApiError> {
        #[derive(Deserialize)]
        struct ProductResponse {
            product: Product,
        }
        let path = format!("/products/{product_id}");
        let result = self.get::<ProductResponse>(&path, &[]).await?;
        Ok(result.product)
    }

    /// Status changes go through the batch endpoint. A 200 response can still carry an `errors`
    /// object (e.g. for a disallowed transition), which counts as failure.
    async fn post_status(&self, order_id: i64, status: &OrderStatus) -> Result<(), PromApiError> {
        let body = serde_json::json!({
            "status": status,
            "ids": [order_id],
        });
        let result = self.post::<Value, Value>("/orders/set_status", &body).await?;
        if let Some(errors) = result.get("errors") {
            let is_empty = errors.is_null()
                || errors.as_object().is_some_and(|o| o.is_empty())
                || errors.as_array().is_some_and(|a| a.is_empty());
            if !is_empty {
                return Err(PromApiError::ApiErrors(errors.to_string()));
            }
        }
        if let Some(warnings) = result.get("warnings").filter(|w| !w.is_null()) {
            warn!("Prom API returned warnings for order {order_id}: {warnings}");
        }
        Ok(())
    }
}

impl Marketplace for PromApi {
    async fn list_orders(&self, status: &OrderStatus) -> Vec<Order> {
        match self.fetch_orders(status).await {
            Ok(orders) => orders,
            Err(e) => {
                error!("🛍️ Error fetching orders with status '{status}': {e}");
                Vec::new()
            },
        }
    }

    async fn get_product(&self, product_id: i64) -> Option<Product> {
        match self.fetch_product(product_id).await {
            Ok(product) => Some(product),
            Err(e) => {
                error!("🛍️ Error fetching product {product_id}: {e}");
                None
            },
        }
    }

    async fn set_status(&self, order_id: i64, status: &OrderStatus) -> bool {
        match self.post_status(order_id, status).await {
            Ok(()) => {
                info!("🛍️ Order {order_id} moved to status '{status}'");
                true
            },
            Err(e) => {
                error!("🛍️ Error setting status '{status}' for order {order_id}: {e}");
                false
            },
        }
    }
}
