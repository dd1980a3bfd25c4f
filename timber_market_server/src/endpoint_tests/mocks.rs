use mockall::mock;
use timber_market_engine::{
    db_types::{
        BankSlip,
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
        OrderWithItems,
        PlacedOrder,
        StockItem,
    },
    order_objects::{DeliverySection, DesignerEarnings, DesignerOrderLine, MarketplaceIncome},
    CartManagement,
    CatalogManagement,
    CustomOrderManagement,
    LedgerManagement,
    MarketGatewayDatabase,
    MarketGatewayError,
    OrderManagement,
};
use tmg_common::{CommissionRate, Money};

mock! {
    pub GatewayDb {}
    impl Clone for GatewayDb {
        fn clone(&self) -> Self;
    }
    impl MarketGatewayDatabase for GatewayDb {
        fn url(&self) -> &str;
        async fn create_order(&self, order: NewOrder, ledger_rate: Option<CommissionRate>) -> Result<PlacedOrder, MarketGatewayError>;
        async fn cancel_order(&self, oid: &OrderId) -> Result<(Order, Vec<Design>), MarketGatewayError>;
        async fn start_preparing(&self, oid: &OrderId) -> Result<Order, MarketGatewayError>;
        async fn notify_delivery(&self, oid: &OrderId) -> Result<Order, MarketGatewayError>;
        async fn advance_delivery_status(&self, oid: &OrderId, new: DeliveryStatus) -> Result<Order, MarketGatewayError>;
        async fn collect_cash(&self, oid: &OrderId) -> Result<Order, MarketGatewayError>;
        async fn attach_bank_slip(&self, oid: &OrderId, slip_path: &str) -> Result<BankSlip, MarketGatewayError>;
        async fn decide_bank_slip(&self, slip_id: i64, approve: bool, rate: CommissionRate) -> Result<(BankSlip, Order), MarketGatewayError>;
        async fn close(&mut self) -> Result<(), MarketGatewayError>;
    }
}

mock! {
    pub OrderManager {}
    impl OrderManagement for OrderManager {
        async fn order_by_order_id(&self, oid: &OrderId) -> Result<Option<Order>, MarketGatewayError>;
        async fn order_with_items(&self, oid: &OrderId) -> Result<Option<OrderWithItems>, MarketGatewayError>;
        async fn orders_in_delivery_section(&self, section: DeliverySection) -> Result<Vec<OrderWithItems>, MarketGatewayError>;
        async fn orders_for_customer(&self, email: &str) -> Result<Vec<OrderWithItems>, MarketGatewayError>;
        async fn orders_for_designer(&self, email: &str) -> Result<Vec<DesignerOrderLine>, MarketGatewayError>;
    }
}

mock! {
    pub LedgerManager {}
    impl LedgerManagement for LedgerManager {
        async fn record_ledger_entries(&self, oid: &OrderId, rate: CommissionRate) -> Result<Vec<LedgerEntry>, MarketGatewayError>;
        async fn release_designer_payment(&self, oid: &OrderId, order_item_id: i64) -> Result<LedgerEntry, MarketGatewayError>;
        async fn ledger_entries_for_order(&self, oid: &OrderId) -> Result<Vec<LedgerEntry>, MarketGatewayError>;
        async fn marketplace_income(&self) -> Result<MarketplaceIncome, MarketGatewayError>;
        async fn designer_earnings(&self, email: &str) -> Result<DesignerEarnings, MarketGatewayError>;
    }
}

mock! {
    pub CatalogManager {}
    impl CatalogManagement for CatalogManager {
        async fn insert_design(&self, design: NewDesign) -> Result<Design, MarketGatewayError>;
        async fn update_design(&self, design_id: i64, update: DesignUpdate) -> Result<Design, MarketGatewayError>;
        async fn fetch_design(&self, design_id: i64) -> Result<Option<Design>, MarketGatewayError>;
        async fn fetch_designs(&self) -> Result<Vec<Design>, MarketGatewayError>;
        async fn upsert_stock_item(&self, item: NewStockItem) -> Result<StockItem, MarketGatewayError>;
        async fn adjust_stock_quantity(&self, stock_id: i64, delta: i64) -> Result<StockItem, MarketGatewayError>;
        async fn release_stock(&self, stock_id: i64, quantity: i64) -> Result<StockItem, MarketGatewayError>;
        async fn stock_items(&self) -> Result<Vec<StockItem>, MarketGatewayError>;
        async fn low_stock_items(&self) -> Result<Vec<StockItem>, MarketGatewayError>;
    }
}

mock! {
    pub CartManager {}
    impl CartManagement for CartManager {
        async fn add_to_cart(&self, email: &str, design_id: i64, quantity: i64) -> Result<Vec<CartLine>, MarketGatewayError>;
        async fn update_cart_item(&self, email: &str, design_id: i64, quantity: i64) -> Result<Vec<CartLine>, MarketGatewayError>;
        async fn remove_from_cart(&self, email: &str, design_id: i64) -> Result<Vec<CartLine>, MarketGatewayError>;
        async fn clear_cart(&self, email: &str) -> Result<(), MarketGatewayError>;
        async fn fetch_cart(&self, email: &str) -> Result<Vec<CartLine>, MarketGatewayError>;
    }
}

mock! {
    pub CustomOrderManager {}
    impl CustomOrderManagement for CustomOrderManager {
        async fn create_custom_order(&self, oid: OrderId, order: NewCustomOrder) -> Result<CustomOrder, MarketGatewayError>;
        async fn custom_order_by_order_id(&self, oid: &OrderId) -> Result<Option<CustomOrder>, MarketGatewayError>;
        async fn accept_custom_order(&self, oid: &OrderId, final_price: Money) -> Result<CustomOrder, MarketGatewayError>;
        async fn update_custom_order_status(&self, oid: &OrderId, new: CustomOrderStatus) -> Result<CustomOrder, MarketGatewayError>;
        async fn notify_custom_delivery(&self, oid: &OrderId) -> Result<CustomOrder, MarketGatewayError>;
        async fn advance_custom_delivery_status(&self, oid: &OrderId, new: DeliveryStatus) -> Result<CustomOrder, MarketGatewayError>;
        async fn collect_custom_cash(&self, oid: &OrderId) -> Result<CustomOrder, MarketGatewayError>;
        async fn custom_orders_in_delivery_section(&self, section: DeliverySection) -> Result<Vec<CustomOrder>, MarketGatewayError>;
        async fn custom_orders_for_customer(&self, email: &str) -> Result<Vec<CustomOrder>, MarketGatewayError>;
    }
}
