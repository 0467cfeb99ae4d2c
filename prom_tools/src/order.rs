use std::{
    fmt,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// An order's lifecycle status on Prom.ua. Merchants can define their own statuses beyond the
/// built-in set, which arrive as opaque `custom-<id>` strings and are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Received,
    Processing,
    Delivered,
    Canceled,
    Draft,
    Paid,
    Custom(String),
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "received" => Self::Received,
            "processing" => Self::Processing,
            "delivered" => Self::Delivered,
            "canceled" => Self::Canceled,
            "draft" => Self::Draft,
            "paid" => Self::Paid,
            _ => Self::Custom(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.to_string()
    }
}

impl FromStr for OrderStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Received => "received",
            Self::Processing => "processing",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
            Self::Draft => "draft",
            Self::Paid => "paid",
            Self::Custom(s) => s.as_str(),
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    #[serde(default)]
    pub client_first_name: String,
    #[serde(default)]
    pub client_last_name: String,
    #[serde(default)]
    pub delivery_provider_data: Option<DeliveryProviderData>,
    #[serde(default)]
    pub delivery_note: Option<String>,
    #[serde(default)]
    pub products: Vec<LineItem>,
}

impl Order {
    /// The shipping declaration number ("TTN") for this order, if the delivery provider has
    /// issued one yet. Providers populate different keys, so they are checked in priority order,
    /// with the free-form delivery note as a last resort.
    pub fn shipping_reference(&self) -> Option<&str> {
        if let Some(data) = &self.delivery_provider_data {
            let candidates =
                [data.declaration_number.as_deref(), data.ttn.as_deref(), data.invoice_number.as_deref()];
            if let Some(ttn) = candidates.into_iter().flatten().find(|s| !s.trim().is_empty()) {
                return Some(ttn);
            }
        }
        self.delivery_note.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn client_name(&self) -> String {
        format!("{} {}", self.client_first_name, self.client_last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryProviderData {
    #[serde(default)]
    pub declaration_number: Option<String>,
    #[serde(default)]
    pub ttn: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: i64,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn custom_statuses_round_trip() {
        let status: OrderStatus = serde_json::from_str("\"custom-133340\"").unwrap();
        assert_eq!(status, OrderStatus::Custom("custom-133340".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"custom-133340\"");
        let status: OrderStatus = serde_json::from_str("\"received\"").unwrap();
        assert_eq!(status, OrderStatus::Received);
        assert_eq!(status.to_string(), "received");
    }

    #[test]
    fn shipping_reference_priority() {
        let json = r#"{
            "id": 100500,
            "status": "processing",
            "client_first_name": "Іван",
            "client_last_name": "Петренко",
            "delivery_provider_data": {"ttn": "20450000000001", "invoice_number": "INV-1"},
            "delivery_note": "fallback note",
            "products": [{"id": 1, "sku": "MIN-123-1", "name": "Худі", "quantity": 2}]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.shipping_reference(), Some("20450000000001"));
        assert_eq!(order.client_name(), "Іван Петренко");
        assert_eq!(order.products[0].quantity, 2);
    }

    #[test]
    fn shipping_reference_falls_back_to_delivery_note() {
        let json = r#"{
            "id": 7,
            "status": "received",
            "delivery_provider_data": {"declaration_number": "  "},
            "delivery_note": "59000000000002"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.shipping_reference(), Some("59000000000002"));
    }

    #[test]
    fn no_shipping_reference() {
        let order: Order = serde_json::from_str(r#"{"id": 8, "status": "received"}"#).unwrap();
        assert!(order.shipping_reference().is_none());
        assert_eq!(order.products.len(), 0);
    }
}
