use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;
use tmg_common::{CommissionRate, Money};

use crate::{
    api::order_objects::{DeliverySection, DesignerEarnings, DesignerOrderLine, IncomeTotals, MarketplaceIncome},
    db::{
        sqlite::{bank_slips, carts, custom_orders, db_url, designs, ledger, new_pool, orders, stock_items},
        traits::{
            CartManagement,
            CatalogManagement,
            CustomOrderManagement,
            LedgerManagement,
            MarketGatewayDatabase,
            MarketGatewayError,
            OrderManagement,
        },
    },
    db_types::{
        BankSlip,
        BankSlipStatus,
        CartLine,
        CustomOrder,
        CustomOrderStatus,
        DeliveryStatus,
        Design,
        DesignUpdate,
        LedgerEntry,
        NewCustomOrder,
        NewDesign,
        NewOrder,
        NewStockItem,
        Order,
        OrderId,
        OrderStatus,
        OrderWithItems,
        PaymentMethod,
        PaymentStatus,
        PlacedOrder,
        StockItem,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL from the environment.
    pub async fn new(max_connections: u32) -> Result<Self, MarketGatewayError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, MarketGatewayError> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Applies any pending schema migrations.
    pub async fn migrate(&self) -> Result<(), MarketGatewayError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| MarketGatewayError::DatabaseError(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fetches an order or reports NotFound, with the terminal-state conflict check shared by every lifecycle
    /// mutation: acting on a delivered or cancelled order reports the current state and mutates nothing.
    async fn fetch_live_order(
        &self,
        oid: &OrderId,
        conn: &mut sqlx::SqliteConnection,
    ) -> Result<Order, MarketGatewayError> {
        let order = orders::fetch_order(oid, conn).await?.ok_or_else(|| MarketGatewayError::not_found(oid))?;
        if order.status.is_terminal() {
            return Err(MarketGatewayError::conflict(format!("Order {oid} is already {}", order.status)));
        }
        Ok(order)
    }

    /// The body of [`MarketGatewayDatabase::create_order`]. Runs inside an already-begun immediate transaction;
    /// the caller commits on `Ok` and rolls back on `Err`.
    async fn create_order_in_tx(
        order: NewOrder,
        ledger_rate: Option<CommissionRate>,
        conn: &mut sqlx::SqliteConnection,
    ) -> Result<PlacedOrder, MarketGatewayError> {
        if orders::order_exists(&order.order_id, &mut *conn).await? {
            return Err(MarketGatewayError::conflict(format!("Order {} already exists", order.order_id)));
        }
        // Reserve stock for every line item before creating anything. All decrements happen inside this
        // transaction, so the first shortfall rolls back the lot. We keep checking the remaining items so the
        // error can name every offender, not just the first.
        let mut priced_items = Vec::with_capacity(order.items.len());
        let mut insufficient = Vec::new();
        for item in &order.items {
            let design = designs::fetch_design(item.design_id, &mut *conn)
                .await?
                .ok_or_else(|| MarketGatewayError::not_found(format!("Design {}", item.design_id)))?;
            if designs::reserve_quantity(design.id, item.quantity, &mut *conn).await? {
                priced_items.push((design, item.quantity));
            } else {
                insufficient.push(design.item_name.clone());
            }
        }
        if !insufficient.is_empty() {
            debug!("🗃️ Order {} rejected: insufficient stock for {}", order.order_id, insufficient.join(", "));
            return Err(MarketGatewayError::InsufficientStock { items: insufficient });
        }
        let subtotal: Money = priced_items.iter().map(|(d, q)| d.price * *q).sum();
        let total_amount = subtotal + order.delivery_fee;
        // COD orders confirm immediately; bank transfers wait for slip approval.
        let status = match order.payment_method {
            PaymentMethod::CashOnDelivery => OrderStatus::Confirmed,
            PaymentMethod::BankTransfer => OrderStatus::Pending,
        };
        let created = orders::insert_order(
            &order.order_id,
            &order.customer_email,
            order.delivery_fee,
            total_amount,
            order.payment_method,
            PaymentStatus::Pending,
            status,
            &mut *conn,
        )
        .await?;
        let mut items = Vec::with_capacity(priced_items.len());
        for (design, quantity) in &priced_items {
            let item = orders::insert_order_item(
                &order.order_id,
                design.id,
                &design.designer_email,
                &design.item_name,
                *quantity,
                design.price,
                &mut *conn,
            )
            .await?;
            items.push(item);
        }
        if let Some(rate) = ledger_rate {
            ledger::insert_entries_for_items(&items, rate, &mut *conn).await?;
        }
        let mut stock_updates = Vec::with_capacity(priced_items.len());
        for (design, _) in &priced_items {
            if let Some(updated) = designs::fetch_design(design.id, &mut *conn).await? {
                stock_updates.push(updated);
            }
        }
        Ok(PlacedOrder { order: created, items, stock_updates })
    }
}

impl MarketGatewayDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn create_order(
        &self,
        order: NewOrder,
        ledger_rate: Option<CommissionRate>,
    ) -> Result<PlacedOrder, MarketGatewayError> {
        if order.items.is_empty() {
            return Err(MarketGatewayError::validation("Order has no items"));
        }
        if order.items.iter().any(|i| i.quantity <= 0) {
            return Err(MarketGatewayError::validation("Item quantities must be positive"));
        }
        if order.customer_email.trim().is_empty() {
            return Err(MarketGatewayError::validation("Customer email is required"));
        }
        // Take the write lock up front. With a deferred begin, two concurrent order transactions both read
        // first, and whichever upgrades to the write lock second bails out with SQLITE_BUSY instead of waiting
        // its turn on the busy timeout. An immediate begin makes the loser queue, then fail the conditional
        // decrement with the insufficient-stock error it is supposed to get.
        let mut conn = self.pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
        match Self::create_order_in_tx(order, ledger_rate, &mut *conn).await {
            Ok(placed) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                debug!(
                    "🗃️ Order {} saved with {} items, total {}",
                    placed.order.order_id,
                    placed.items.len(),
                    placed.order.total_amount
                );
                Ok(placed)
            },
            Err(e) => {
                if let Err(rb) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                    warn!("🗃️ Rollback of a failed order creation also failed: {rb}");
                }
                Err(e)
            },
        }
    }

    async fn cancel_order(&self, oid: &OrderId) -> Result<(Order, Vec<Design>), MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = self.fetch_live_order(oid, &mut tx).await?;
        let items = orders::fetch_order_items(oid, &mut tx).await?;
        for item in &items {
            designs::restore_quantity(item.design_id, item.quantity, &mut tx).await?;
        }
        orders::update_order_status(oid, OrderStatus::Cancelled, &mut tx).await?;
        // A cancelled order owes its designers nothing; leaving the rows behind would inflate pending totals.
        let voided = ledger::delete_unreleased_entries(oid, &mut tx).await?;
        if voided > 0 {
            debug!("🗃️ Voided {voided} ledger entries for cancelled order {oid}");
        }
        let mut restored = Vec::with_capacity(items.len());
        for item in &items {
            if let Some(design) = designs::fetch_design(item.design_id, &mut tx).await? {
                restored.push(design);
            }
        }
        let cancelled = orders::fetch_order(oid, &mut tx).await?.ok_or_else(|| MarketGatewayError::not_found(oid))?;
        tx.commit().await?;
        info!("🗃️ Order {oid} cancelled. Stock restored for {} items.", items.len());
        Ok((cancelled, restored))
    }

    async fn start_preparing(&self, oid: &OrderId) -> Result<Order, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = self.fetch_live_order(oid, &mut tx).await?;
        if !order.status.can_transition_to(OrderStatus::Preparing) {
            return Err(MarketGatewayError::conflict(format!(
                "Order {oid} cannot move from {} to preparing",
                order.status
            )));
        }
        orders::update_order_status(oid, OrderStatus::Preparing, &mut tx).await?;
        let order = orders::fetch_order(oid, &mut tx).await?.ok_or_else(|| MarketGatewayError::not_found(oid))?;
        tx.commit().await?;
        Ok(order)
    }

    async fn notify_delivery(&self, oid: &OrderId) -> Result<Order, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = self.fetch_live_order(oid, &mut tx).await?;
        if !order.status.can_transition_to(OrderStatus::ReadyForDelivery) {
            return Err(MarketGatewayError::conflict(format!(
                "Order {oid} cannot be handed to delivery from {}",
                order.status
            )));
        }
        if order.delivery_status != DeliveryStatus::NotAssigned {
            return Err(MarketGatewayError::conflict(format!(
                "Order {oid} is already with delivery ({})",
                order.delivery_status
            )));
        }
        orders::update_order_status(oid, OrderStatus::ReadyForDelivery, &mut tx).await?;
        orders::update_delivery_status(oid, DeliveryStatus::Assigned, &mut tx).await?;
        let order = orders::fetch_order(oid, &mut tx).await?.ok_or_else(|| MarketGatewayError::not_found(oid))?;
        tx.commit().await?;
        debug!("🗃️ Order {oid} is ready for delivery and assigned to the courier queue");
        Ok(order)
    }

    async fn advance_delivery_status(
        &self,
        oid: &OrderId,
        new: DeliveryStatus,
    ) -> Result<Order, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = self.fetch_live_order(oid, &mut tx).await?;
        if !order.delivery_status.can_advance_to(new) {
            return Err(MarketGatewayError::conflict(format!(
                "Delivery status of {oid} cannot move from {} to {new}",
                order.delivery_status
            )));
        }
        // Never trust the client's disabled button: the cash guard lives here.
        if new == DeliveryStatus::Delivered && !order.may_complete_delivery() {
            return Err(MarketGatewayError::conflict(format!(
                "Order {oid} is cash-on-delivery and cash has not been collected"
            )));
        }
        orders::update_delivery_status(oid, new, &mut tx).await?;
        if new == DeliveryStatus::Delivered {
            orders::update_order_status(oid, OrderStatus::Delivered, &mut tx).await?;
        }
        let order = orders::fetch_order(oid, &mut tx).await?.ok_or_else(|| MarketGatewayError::not_found(oid))?;
        tx.commit().await?;
        debug!("🗃️ Order {oid} delivery status is now {new}");
        Ok(order)
    }

    async fn collect_cash(&self, oid: &OrderId) -> Result<Order, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = self.fetch_live_order(oid, &mut tx).await?;
        if order.payment_method != PaymentMethod::CashOnDelivery {
            return Err(MarketGatewayError::conflict(format!("Order {oid} is not cash-on-delivery")));
        }
        if order.cash_collected {
            return Err(MarketGatewayError::conflict(format!("Cash for order {oid} has already been collected")));
        }
        if !matches!(
            order.delivery_status,
            DeliveryStatus::Assigned | DeliveryStatus::PickedUp | DeliveryStatus::InTransit
        ) {
            return Err(MarketGatewayError::conflict(format!(
                "Cash can only be collected while order {oid} is out with the courier (currently {})",
                order.delivery_status
            )));
        }
        orders::mark_cash_collected(oid, &mut tx).await?;
        let order = orders::fetch_order(oid, &mut tx).await?.ok_or_else(|| MarketGatewayError::not_found(oid))?;
        tx.commit().await?;
        info!("🗃️ Cash collected for order {oid}");
        Ok(order)
    }

    async fn attach_bank_slip(&self, oid: &OrderId, slip_path: &str) -> Result<BankSlip, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = self.fetch_live_order(oid, &mut tx).await?;
        if order.payment_method != PaymentMethod::BankTransfer {
            return Err(MarketGatewayError::conflict(format!("Order {oid} is not a bank-transfer order")));
        }
        if order.payment_status == PaymentStatus::Paid {
            return Err(MarketGatewayError::conflict(format!("Order {oid} is already paid")));
        }
        let slip = bank_slips::insert_slip(oid, slip_path, &mut tx).await?;
        orders::set_bank_slip_url(oid, slip_path, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Bank slip #{} attached to order {oid}", slip.id);
        Ok(slip)
    }

    async fn decide_bank_slip(
        &self,
        slip_id: i64,
        approve: bool,
        rate: CommissionRate,
    ) -> Result<(BankSlip, Order), MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let slip = bank_slips::fetch_slip(slip_id, &mut tx)
            .await?
            .ok_or_else(|| MarketGatewayError::not_found(format!("Bank slip {slip_id}")))?;
        if slip.status != BankSlipStatus::Pending {
            return Err(MarketGatewayError::conflict(format!(
                "Bank slip {slip_id} has already been {}",
                slip.status
            )));
        }
        let oid = slip.order_id.clone();
        let order = self.fetch_live_order(&oid, &mut tx).await?;
        if approve {
            if !order.status.can_transition_to(OrderStatus::Confirmed) {
                return Err(MarketGatewayError::conflict(format!(
                    "Order {oid} cannot be confirmed from {}",
                    order.status
                )));
            }
            bank_slips::update_status(slip_id, BankSlipStatus::Approved, &mut tx).await?;
            orders::mark_order_paid(&oid, &mut tx).await?;
            // Payment is now verified, so the designer ledger rows come into existence here.
            let items = orders::fetch_order_items(&oid, &mut tx).await?;
            ledger::insert_entries_for_items(&items, rate, &mut tx).await?;
            info!("🗃️ Bank slip #{slip_id} approved. Order {oid} is paid and confirmed.");
        } else {
            bank_slips::update_status(slip_id, BankSlipStatus::Rejected, &mut tx).await?;
            orders::mark_payment_failed(&oid, &mut tx).await?;
            info!("🗃️ Bank slip #{slip_id} rejected. Order {oid} payment marked failed.");
        }
        let slip = bank_slips::fetch_slip(slip_id, &mut tx)
            .await?
            .ok_or_else(|| MarketGatewayError::not_found(format!("Bank slip {slip_id}")))?;
        let order = orders::fetch_order(&oid, &mut tx).await?.ok_or_else(|| MarketGatewayError::not_found(&oid))?;
        tx.commit().await?;
        Ok((slip, order))
    }

    async fn close(&mut self) -> Result<(), MarketGatewayError> {
        self.pool.close().await;
        Ok(())
    }
}

impl OrderManagement for SqliteDatabase {
    async fn order_by_order_id(&self, oid: &OrderId) -> Result<Option<Order>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order(oid, &mut conn).await
    }

    async fn order_with_items(&self, oid: &OrderId) -> Result<Option<OrderWithItems>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let Some(order) = orders::fetch_order(oid, &mut conn).await? else {
            return Ok(None);
        };
        let items = orders::fetch_order_items(oid, &mut conn).await?;
        Ok(Some(OrderWithItems { order, items }))
    }

    async fn orders_in_delivery_section(
        &self,
        section: DeliverySection,
    ) -> Result<Vec<OrderWithItems>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let plain = orders::fetch_orders_in_section(section, &mut conn).await?;
        let mut result = Vec::with_capacity(plain.len());
        for order in plain {
            let items = orders::fetch_order_items(&order.order_id, &mut conn).await?;
            result.push(OrderWithItems { order, items });
        }
        Ok(result)
    }

    async fn orders_for_customer(&self, email: &str) -> Result<Vec<OrderWithItems>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let plain = orders::fetch_orders_for_customer(email, &mut conn).await?;
        let mut result = Vec::with_capacity(plain.len());
        for order in plain {
            let items = orders::fetch_order_items(&order.order_id, &mut conn).await?;
            result.push(OrderWithItems { order, items });
        }
        Ok(result)
    }

    async fn orders_for_designer(&self, email: &str) -> Result<Vec<DesignerOrderLine>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_designer_order_lines(email, &mut conn).await
    }
}

impl LedgerManagement for SqliteDatabase {
    async fn record_ledger_entries(
        &self,
        oid: &OrderId,
        rate: CommissionRate,
    ) -> Result<Vec<LedgerEntry>, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::fetch_order(oid, &mut tx).await?.ok_or_else(|| MarketGatewayError::not_found(oid))?;
        if order.payment_method == PaymentMethod::BankTransfer && order.payment_status != PaymentStatus::Paid {
            return Err(MarketGatewayError::conflict(format!(
                "Order {oid} payment has not been verified; ledger entries cannot be recorded yet"
            )));
        }
        let items = orders::fetch_order_items(oid, &mut tx).await?;
        ledger::insert_entries_for_items(&items, rate, &mut tx).await?;
        let entries = ledger::fetch_entries_for_order(oid, &mut tx).await?;
        tx.commit().await?;
        Ok(entries)
    }

    async fn release_designer_payment(
        &self,
        oid: &OrderId,
        order_item_id: i64,
    ) -> Result<LedgerEntry, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let entry = ledger::fetch_entry(oid, order_item_id, &mut tx)
            .await?
            .ok_or_else(|| MarketGatewayError::not_found(format!("Ledger entry for {oid} item {order_item_id}")))?;
        if entry.released {
            return Err(MarketGatewayError::conflict(format!(
                "Payment for {oid} item {order_item_id} was already released at {:?}",
                entry.released_at
            )));
        }
        let order = orders::fetch_order(oid, &mut tx).await?.ok_or_else(|| MarketGatewayError::not_found(oid))?;
        if order.status != OrderStatus::Delivered {
            return Err(MarketGatewayError::conflict(format!(
                "Order {oid} has not been delivered; payments cannot be released yet"
            )));
        }
        if !ledger::mark_released(oid, order_item_id, &mut tx).await? {
            // Lost a race with another release of the same entry.
            return Err(MarketGatewayError::conflict(format!(
                "Payment for {oid} item {order_item_id} was already released"
            )));
        }
        let entry = ledger::fetch_entry(oid, order_item_id, &mut tx)
            .await?
            .ok_or_else(|| MarketGatewayError::not_found(format!("Ledger entry for {oid} item {order_item_id}")))?;
        tx.commit().await?;
        info!("🧾️ Released {} to {} for {oid} item {order_item_id}", entry.designer_amount, entry.designer_email);
        Ok(entry)
    }

    async fn ledger_entries_for_order(&self, oid: &OrderId) -> Result<Vec<LedgerEntry>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        ledger::fetch_entries_for_order(oid, &mut conn).await
    }

    async fn marketplace_income(&self) -> Result<MarketplaceIncome, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let rows = ledger::fetch_all_entries(&mut conn).await?;
        let totals = IncomeTotals::accumulate(&rows);
        Ok(MarketplaceIncome { rows, totals })
    }

    async fn designer_earnings(&self, email: &str) -> Result<DesignerEarnings, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let rows = ledger::fetch_entries_for_designer(email, &mut conn).await?;
        let totals = IncomeTotals::accumulate(&rows);
        Ok(DesignerEarnings { designer_email: email.to_string(), rows, totals })
    }
}

impl CustomOrderManagement for SqliteDatabase {
    async fn create_custom_order(
        &self,
        oid: OrderId,
        order: NewCustomOrder,
    ) -> Result<CustomOrder, MarketGatewayError> {
        if order.customer_email.trim().is_empty() {
            return Err(MarketGatewayError::validation("Customer email is required"));
        }
        if order.material.trim().is_empty() {
            return Err(MarketGatewayError::validation("Material is required"));
        }
        let mut conn = self.pool.acquire().await?;
        let created = custom_orders::insert_custom_order(&oid, order, &mut conn).await?;
        debug!("🗃️ Custom order {} saved", created.order_id);
        Ok(created)
    }

    async fn custom_order_by_order_id(&self, oid: &OrderId) -> Result<Option<CustomOrder>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        custom_orders::fetch_custom_order(oid, &mut conn).await
    }

    async fn accept_custom_order(
        &self,
        oid: &OrderId,
        final_price: Money,
    ) -> Result<CustomOrder, MarketGatewayError> {
        if final_price.value() <= 0 {
            return Err(MarketGatewayError::validation("Final price must be positive"));
        }
        let mut tx = self.pool.begin().await?;
        let order = self.fetch_live_custom_order(oid, &mut tx).await?;
        if !order.status.can_transition_to(CustomOrderStatus::Accepted) {
            return Err(MarketGatewayError::conflict(format!(
                "Custom order {oid} cannot be accepted from {}",
                order.status
            )));
        }
        custom_orders::accept_with_price(oid, final_price, &mut tx).await?;
        let order = self.refetch_custom_order(oid, &mut tx).await?;
        tx.commit().await?;
        info!("🗃️ Custom order {oid} accepted at {final_price}");
        Ok(order)
    }

    async fn update_custom_order_status(
        &self,
        oid: &OrderId,
        new: CustomOrderStatus,
    ) -> Result<CustomOrder, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = self.fetch_live_custom_order(oid, &mut tx).await?;
        if !order.status.can_transition_to(new) {
            return Err(MarketGatewayError::conflict(format!(
                "Custom order {oid} cannot move from {} to {new}",
                order.status
            )));
        }
        custom_orders::update_status(oid, new, &mut tx).await?;
        let order = self.refetch_custom_order(oid, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn notify_custom_delivery(&self, oid: &OrderId) -> Result<CustomOrder, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = custom_orders::fetch_custom_order(oid, &mut tx)
            .await?
            .ok_or_else(|| MarketGatewayError::not_found(oid))?;
        if order.status != CustomOrderStatus::Completed {
            return Err(MarketGatewayError::conflict(format!(
                "Custom order {oid} must be completed before delivery (currently {})",
                order.status
            )));
        }
        if order.delivery_status != DeliveryStatus::NotAssigned {
            return Err(MarketGatewayError::conflict(format!(
                "Custom order {oid} is already with delivery ({})",
                order.delivery_status
            )));
        }
        custom_orders::update_delivery_status(oid, DeliveryStatus::Assigned, &mut tx).await?;
        let order = self.refetch_custom_order(oid, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Custom order {oid} assigned to the courier queue");
        Ok(order)
    }

    async fn advance_custom_delivery_status(
        &self,
        oid: &OrderId,
        new: DeliveryStatus,
    ) -> Result<CustomOrder, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = custom_orders::fetch_custom_order(oid, &mut tx)
            .await?
            .ok_or_else(|| MarketGatewayError::not_found(oid))?;
        if order.status == CustomOrderStatus::Cancelled {
            return Err(MarketGatewayError::conflict(format!("Custom order {oid} is cancelled")));
        }
        if !order.delivery_status.can_advance_to(new) {
            return Err(MarketGatewayError::conflict(format!(
                "Delivery status of custom order {oid} cannot move from {} to {new}",
                order.delivery_status
            )));
        }
        if new == DeliveryStatus::Delivered && !order.may_complete_delivery() {
            return Err(MarketGatewayError::conflict(format!(
                "Custom order {oid} is cash-on-delivery and cash has not been collected"
            )));
        }
        custom_orders::update_delivery_status(oid, new, &mut tx).await?;
        let order = self.refetch_custom_order(oid, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn collect_custom_cash(&self, oid: &OrderId) -> Result<CustomOrder, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        let order = custom_orders::fetch_custom_order(oid, &mut tx)
            .await?
            .ok_or_else(|| MarketGatewayError::not_found(oid))?;
        if order.payment_method != PaymentMethod::CashOnDelivery {
            return Err(MarketGatewayError::conflict(format!("Custom order {oid} is not cash-on-delivery")));
        }
        if order.cash_collected {
            return Err(MarketGatewayError::conflict(format!(
                "Cash for custom order {oid} has already been collected"
            )));
        }
        if !matches!(
            order.delivery_status,
            DeliveryStatus::Assigned | DeliveryStatus::PickedUp | DeliveryStatus::InTransit
        ) {
            return Err(MarketGatewayError::conflict(format!(
                "Cash can only be collected while custom order {oid} is out with the courier (currently {})",
                order.delivery_status
            )));
        }
        custom_orders::mark_cash_collected(oid, &mut tx).await?;
        let order = self.refetch_custom_order(oid, &mut tx).await?;
        tx.commit().await?;
        info!("🗃️ Cash collected for custom order {oid}");
        Ok(order)
    }

    async fn custom_orders_in_delivery_section(
        &self,
        section: DeliverySection,
    ) -> Result<Vec<CustomOrder>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        custom_orders::fetch_in_section(section, &mut conn).await
    }

    async fn custom_orders_for_customer(&self, email: &str) -> Result<Vec<CustomOrder>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        custom_orders::fetch_for_customer(email, &mut conn).await
    }
}

impl SqliteDatabase {
    async fn fetch_live_custom_order(
        &self,
        oid: &OrderId,
        conn: &mut sqlx::SqliteConnection,
    ) -> Result<CustomOrder, MarketGatewayError> {
        let order =
            custom_orders::fetch_custom_order(oid, conn).await?.ok_or_else(|| MarketGatewayError::not_found(oid))?;
        if order.status.is_terminal() {
            return Err(MarketGatewayError::conflict(format!("Custom order {oid} is already {}", order.status)));
        }
        Ok(order)
    }

    async fn refetch_custom_order(
        &self,
        oid: &OrderId,
        conn: &mut sqlx::SqliteConnection,
    ) -> Result<CustomOrder, MarketGatewayError> {
        custom_orders::fetch_custom_order(oid, conn).await?.ok_or_else(|| MarketGatewayError::not_found(oid))
    }
}

impl CartManagement for SqliteDatabase {
    async fn add_to_cart(
        &self,
        email: &str,
        design_id: i64,
        quantity: i64,
    ) -> Result<Vec<CartLine>, MarketGatewayError> {
        if quantity <= 0 {
            return Err(MarketGatewayError::validation("Quantity must be positive"));
        }
        let mut tx = self.pool.begin().await?;
        designs::fetch_design(design_id, &mut tx)
            .await?
            .ok_or_else(|| MarketGatewayError::not_found(format!("Design {design_id}")))?;
        carts::add_item(email, design_id, quantity, &mut tx).await?;
        let cart = carts::fetch_cart(email, &mut tx).await?;
        tx.commit().await?;
        Ok(cart)
    }

    async fn update_cart_item(
        &self,
        email: &str,
        design_id: i64,
        quantity: i64,
    ) -> Result<Vec<CartLine>, MarketGatewayError> {
        if quantity < 0 {
            return Err(MarketGatewayError::validation("Quantity cannot be negative"));
        }
        let mut tx = self.pool.begin().await?;
        carts::set_item_quantity(email, design_id, quantity, &mut tx).await?;
        let cart = carts::fetch_cart(email, &mut tx).await?;
        tx.commit().await?;
        Ok(cart)
    }

    async fn remove_from_cart(&self, email: &str, design_id: i64) -> Result<Vec<CartLine>, MarketGatewayError> {
        let mut tx = self.pool.begin().await?;
        carts::remove_item(email, design_id, &mut tx).await?;
        let cart = carts::fetch_cart(email, &mut tx).await?;
        tx.commit().await?;
        Ok(cart)
    }

    async fn clear_cart(&self, email: &str) -> Result<(), MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        carts::clear(email, &mut conn).await
    }

    async fn fetch_cart(&self, email: &str) -> Result<Vec<CartLine>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        carts::fetch_cart(email, &mut conn).await
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn insert_design(&self, design: NewDesign) -> Result<Design, MarketGatewayError> {
        if design.price.value() <= 0 {
            return Err(MarketGatewayError::validation("Design price must be positive"));
        }
        if design.quantity < 0 {
            return Err(MarketGatewayError::validation("Design quantity cannot be negative"));
        }
        let mut conn = self.pool.acquire().await?;
        designs::insert_design(design, &mut conn).await
    }

    async fn update_design(&self, design_id: i64, update: DesignUpdate) -> Result<Design, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        designs::update_design(design_id, update, &mut conn).await
    }

    async fn fetch_design(&self, design_id: i64) -> Result<Option<Design>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        designs::fetch_design(design_id, &mut conn).await
    }

    async fn fetch_designs(&self) -> Result<Vec<Design>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        designs::fetch_designs(&mut conn).await
    }

    async fn upsert_stock_item(&self, item: NewStockItem) -> Result<StockItem, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        stock_items::upsert(item, &mut conn).await
    }

    async fn adjust_stock_quantity(&self, stock_id: i64, delta: i64) -> Result<StockItem, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        stock_items::adjust_quantity(stock_id, delta, &mut conn).await
    }

    async fn release_stock(&self, stock_id: i64, quantity: i64) -> Result<StockItem, MarketGatewayError> {
        if quantity <= 0 {
            return Err(MarketGatewayError::validation("Release quantity must be positive"));
        }
        let mut conn = self.pool.acquire().await?;
        stock_items::adjust_quantity(stock_id, -quantity, &mut conn).await
    }

    async fn stock_items(&self) -> Result<Vec<StockItem>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        stock_items::fetch_all(&mut conn).await
    }

    async fn low_stock_items(&self) -> Result<Vec<StockItem>, MarketGatewayError> {
        let mut conn = self.pool.acquire().await?;
        stock_items::fetch_low_stock(&mut conn).await
    }
}
