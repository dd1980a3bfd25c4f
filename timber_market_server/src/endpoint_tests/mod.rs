mod carts;
mod catalog;
mod custom_orders;
mod financial;
mod helpers;
mod mocks;
mod order_lifecycle;
mod orders;
