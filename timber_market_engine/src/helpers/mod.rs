mod order_ids;

pub use order_ids::{new_custom_order_id, new_order_id};
