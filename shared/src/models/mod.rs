//! Data models shared between the server and its clients.

pub mod order;
pub mod report;

pub use order::{
    Order, OrderCreate, OrderItem, OrderItemInput, OrderItemWithNames, OrderStatus, OrderUpdate,
    OrderWithItems, OrderWithTotal, PublicOrderStatus,
};
pub use report::{SummaryReport, VariantSales};
