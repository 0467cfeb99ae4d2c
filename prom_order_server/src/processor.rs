//! The order processor: one polling cycle fetches candidate orders from every shop, skips
//! already-processed ones, resolves supplier notes per line item, pushes notifications and
//! advances order statuses. Everything degrades soft; the next cycle is the retry.

use std::{path::PathBuf, time::Duration};

use log::*;
use prom_tools::{LineItem, Marketplace, Order, OrderStatus, Product};
use telegram_tools::Messenger;

use crate::{
    config::ServerConfig,
    fallback::NotesFallbackStore,
    ledger::ProcessedOrderLedger,
    notes::{parse_private_note, ParsedNote, MODEL_NOT_FOUND, PRICE_NOT_SPECIFIED, UNKNOWN_SUPPLIER},
};

/// An uploaded document with exactly this name replaces the fallback snapshot.
pub const NOTES_UPDATE_FILE_NAME: &str = "prom_import_data.json";
/// Long-poll timeout for Telegram updates. Doubles as most of the cycle pacing.
const UPDATE_POLL_TIMEOUT_SECS: u64 = 5;

/// The subset of the server configuration the processor needs. Excludes credentials: clients are
/// constructed upfront and injected.
#[derive(Clone, Debug)]
pub struct ProcessorOptions {
    pub chat_id: String,
    pub target_statuses: Vec<OrderStatus>,
    pub auto_accept: bool,
    pub notes_path: PathBuf,
    pub ledger_path: PathBuf,
    pub poll_interval: Duration,
}

impl ProcessorOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            chat_id: config.chat_id.clone(),
            target_statuses: config.target_statuses.clone(),
            auto_accept: config.auto_accept,
            notes_path: config.notes_path.clone(),
            ledger_path: config.ledger_path.clone(),
            poll_interval: config.poll_interval,
        }
    }
}

pub struct OrderProcessor<M, N> {
    shops: Vec<M>,
    messenger: N,
    chat_id: String,
    target_statuses: Vec<OrderStatus>,
    auto_accept: bool,
    ledger: ProcessedOrderLedger,
    notes: NotesFallbackStore,
    notes_path: PathBuf,
    poll_interval: Duration,
    last_update_id: i64,
    /// The first full scan after process start is silent: matching orders are recorded without
    /// notifications, so a backlog does not become a notification storm.
    startup_mode: bool,
}

impl<M: Marketplace, N: Messenger> OrderProcessor<M, N> {
    pub fn new(shops: Vec<M>, messenger: N, options: ProcessorOptions) -> Self {
        let ledger = ProcessedOrderLedger::load(&options.ledger_path);
        let notes = NotesFallbackStore::load(&options.notes_path);
        Self {
            shops,
            messenger,
            chat_id: options.chat_id,
            target_statuses: options.target_statuses,
            auto_accept: options.auto_accept,
            ledger,
            notes,
            notes_path: options.notes_path,
            poll_interval: options.poll_interval,
            last_update_id: 0,
            startup_mode: true,
        }
    }

    /// Run the polling loop forever. The only way out is external termination.
    pub async fn run(mut self) {
        self.send_startup_message().await;
        if self.ledger.is_empty() {
            info!("🚦 First run detected. Marking existing orders as processed to avoid spam.");
            self.mark_current_orders_processed().await;
        }
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One polling cycle. Auto-accept runs before the notify scan so that freshly accepted orders
    /// are observed with their updated status in the same cycle.
    pub async fn run_cycle(&mut self) {
        self.check_messenger_updates().await;
        if self.auto_accept {
            self.auto_accept_new_orders().await;
        }
        self.process_orders().await;
        if self.startup_mode {
            self.startup_mode = false;
            info!("🚦 Startup phase complete. Normal monitoring active.");
        }
    }

    async fn send_startup_message(&self) {
        let name = match self.messenger.get_me().await {
            Ok(me) => me.first_name,
            Err(e) => {
                warn!("✉️ Could not fetch the bot identity: {e}");
                String::from("Order bot")
            },
        };
        let text = format!(
            "🤖 Бот {name} запущен и готов к работе!\nМониторинг заказов активирован.\n📥 Отправьте мне \
             '{NOTES_UPDATE_FILE_NAME}' для обновления базы."
        );
        match self.messenger.send_message(&self.chat_id, &text).await {
            Ok(()) => info!("✉️ Startup message sent"),
            Err(e) => error!("✉️ Failed to send startup message: {e}"),
        }
    }

    /// First-run seeding: every order currently visible in the monitored statuses predates the
    /// bot, so record them all before the first scan.
    pub async fn mark_current_orders_processed(&mut self) {
        let mut ids = Vec::new();
        for shop in &self.shops {
            for status in &self.target_statuses {
                ids.extend(shop.list_orders(status).await.iter().map(|o| o.id.to_string()));
            }
        }
        self.ledger.add_all(ids);
        info!("🚦 Marked {} existing orders as processed.", self.ledger.len());
    }

    /// Poll the messaging platform for an uploaded fallback snapshot. On a hit, overwrite the
    /// local file, reload the store and acknowledge with the entry count.
    async fn check_messenger_updates(&mut self) {
        let updates = match self.messenger.get_updates(self.last_update_id + 1, UPDATE_POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(e) => {
                error!("✉️ Error checking messenger updates: {e}");
                return;
            },
        };
        for update in updates {
            self.last_update_id = update.update_id;
            let Some(doc) = update.document() else { continue };
            if doc.file_name.as_deref() != Some(NOTES_UPDATE_FILE_NAME) {
                continue;
            }
            info!("📥 Received a fallback database update via Telegram");
            let bytes = match self.messenger.download_document(&doc.file_id).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    error!("📥 Could not download the new snapshot: {e}");
                    continue;
                },
            };
            if let Some(parent) = self.notes_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    error!("📥 Could not create {}: {e}", parent.display());
                    continue;
                }
            }
            if let Err(e) = std::fs::write(&self.notes_path, &bytes) {
                error!("📥 Could not save the new snapshot to {}: {e}", self.notes_path.display());
                continue;
            }
            self.notes = NotesFallbackStore::load(&self.notes_path);
            let ack = format!("✅ База обновлена! Загружено {} позиций.", self.notes.len());
            let reply_to =
                update.message.as_ref().map(|m| m.chat.id.to_string()).unwrap_or_else(|| self.chat_id.clone());
            if let Err(e) = self.messenger.send_message(&reply_to, &ack).await {
                error!("✉️ Failed to acknowledge the database update: {e}");
            }
        }
    }

    /// Move every `pending` order to `received`. Best effort and idempotent; re-running on an
    /// order that is no longer pending is a no-op upstream.
    async fn auto_accept_new_orders(&self) {
        for shop in &self.shops {
            for order in shop.list_orders(&OrderStatus::Pending).await {
                info!("🛒 Auto-accepting new order {}", order.id);
                if shop.set_status(order.id, &OrderStatus::Received).await {
                    info!("🛒 Order {} accepted successfully", order.id);
                } else {
                    error!("🛒 Failed to accept order {}", order.id);
                }
            }
        }
    }

    async fn process_orders(&mut self) {
        debug!("🛒 Checking for new orders...");
        for shop_idx in 0..self.shops.len() {
            for status in self.target_statuses.clone() {
                let orders = self.shops[shop_idx].list_orders(&status).await;
                for order in orders {
                    self.process_single_order(shop_idx, &order).await;
                }
            }
        }
    }

    async fn process_single_order(&mut self, shop_idx: usize, order: &Order) {
        let order_id = order.id.to_string();
        if self.ledger.contains(&order_id) {
            return;
        }
        // No shipping reference yet: leave the order alone and re-check next cycle.
        let Some(ttn) = order.shipping_reference() else { return };
        let ttn = ttn.to_string();
        info!("🛒 Processing order {order_id} with TTN {ttn}");

        if self.startup_mode {
            info!("🚦 Startup mode: silently marking order {order_id} as processed (no notification).");
            self.ledger.add(&order_id);
            return;
        }

        let client_name = order.client_name();
        for item in &order.products {
            self.notify_line_item(shop_idx, &order_id, item, &ttn, &client_name).await;
        }

        if self.shops[shop_idx].set_status(order.id, &OrderStatus::Received).await {
            info!("🛒 Automatically updated order {order_id} status to 'received'");
        } else {
            error!("🛒 Failed to update status for order {order_id}");
        }
        // Marked processed even if the status change failed: precision of "notify once" matters
        // more than the status bookkeeping.
        self.ledger.add(&order_id);
    }

    async fn notify_line_item(&self, shop_idx: usize, order_id: &str, item: &LineItem, ttn: &str, client_name: &str) {
        let product = self.shops[shop_idx].get_product(item.id).await;
        let note = self.resolve_private_note(shop_idx, product.as_ref(), item.sku.as_deref()).await;
        debug!("🛒 Product {} private note: '{note}'", item.id);
        let message = render_notification(&parse_private_note(&note), item, ttn, client_name);

        let mut sent_photo = false;
        if let Some(url) = product.as_ref().and_then(|p| p.main_image_url()) {
            match self.messenger.send_photo(&self.chat_id, url, &message).await {
                Ok(()) => {
                    info!("✉️ Sent notification with photo for order {order_id}, item {}", item.id);
                    sent_photo = true;
                },
                Err(e) => {
                    warn!("✉️ Failed to send photo for order {order_id}: {e}. Falling back to text.");
                },
            }
        }
        if !sent_photo {
            match self.messenger.send_message(&self.chat_id, &message).await {
                Ok(()) => info!("✉️ Sent text notification for order {order_id}, item {}", item.id),
                Err(e) => error!("✉️ Failed to send notification for order {order_id}: {e}"),
            }
        }
    }

    /// Resolve the supplier note for a line item. Resolvers run in priority order and the first
    /// non-empty result wins:
    /// 1. the product's own note,
    /// 2. the parent product's note, when the product is a variation,
    /// 3. the local fallback store by SKU (exact, then sibling-prefix fuzzy).
    async fn resolve_private_note(&self, shop_idx: usize, product: Option<&Product>, sku: Option<&str>) -> String {
        if let Some(note) = product.and_then(|p| p.note()) {
            return note.to_string();
        }
        if let Some(parent_id) = product.and_then(|p| p.variation_base_id) {
            debug!("🛒 Checking parent product {parent_id} for a note...");
            if let Some(note) = self.shops[shop_idx].get_product(parent_id).await.as_ref().and_then(|p| p.note()) {
                info!("🛒 Found note on parent product {parent_id}");
                return note.to_string();
            }
        }
        if let Some(sku) = sku {
            if let Some(note) = self.notes.lookup(sku) {
                info!("🛒 Found note in the local fallback store for SKU {sku}");
                return note.to_string();
            }
            warn!("🛒 SKU {sku} not found in the local fallback store ({} entries).", self.notes.len());
        }
        String::new()
    }
}

/// Render the fixed five-line notification: supplier, item name (with a quantity suffix when
/// ordering more than one), article code, purchase price, and TTN + client name.
pub fn render_notification(note: &ParsedNote, item: &LineItem, ttn: &str, client_name: &str) -> String {
    let supplier = if note.supplier.is_empty() { UNKNOWN_SUPPLIER } else { note.supplier.as_str() };
    let price = note.purchase_price.as_deref().unwrap_or(PRICE_NOT_SPECIFIED);
    let model = note
        .model
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| item.sku.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or(MODEL_NOT_FOUND);
    let mut item_line = item.name.clone();
    if item.quantity > 1 {
        item_line.push_str(&format!(" ({} ед.)", item.quantity));
    }
    format!("{supplier}\n{item_line}\n{model}\n{price}\n{ttn} {client_name}")
}
