//! Order Model

use serde::{Deserialize, Serialize};

/// Order lifecycle status (closed value set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Pending,
    WaitingPayment,
    Confirmed,
    Cancelled,
}

/// Transition table: `TRANSITIONS[from][to]`.
///
/// Every transition is currently allowed; the business has not confirmed a
/// restricted graph yet. Tightening it (e.g. forbidding confirmed → pending)
/// is a table edit, not a rewrite.
const TRANSITIONS: [[bool; 4]; 4] = [[true; 4]; 4];

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::WaitingPayment,
        OrderStatus::Confirmed,
        OrderStatus::Cancelled,
    ];

    /// Wire/storage representation (snake_case)
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::WaitingPayment => "waiting_payment",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the lifecycle allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        TRANSITIONS[*self as usize][next as usize]
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
///
/// `id` is the internal identifier; `code` is the public lookup token handed
/// to the customer. Timestamps are UTC milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub code: String,
    pub customer_name: String,
    pub customer_whatsapp: String,
    pub customer_email: Option<String>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item, captured once at order time and never edited
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub quantity: i64,
    /// Unit price at order time; a historical fact, never recomputed from
    /// the current catalog price.
    pub unit_price: f64,
    pub created_at: i64,
}

/// Line item enriched with the current catalog display names.
///
/// The names are read-only display metadata, nullable when the catalog
/// entry was removed after the order was placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemWithNames {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub quantity: i64,
    pub unit_price: f64,
    pub created_at: i64,
    pub product_name: Option<String>,
    pub variant_name: Option<String>,
}

/// Order with its items (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemWithNames>,
}

/// Order annotated with its derived total (list view).
///
/// `total` is always Σ(quantity × unit_price) over the order's items,
/// computed at read time; it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderWithTotal {
    pub id: i64,
    pub code: String,
    pub customer_name: String,
    pub customer_whatsapp: String,
    pub customer_email: Option<String>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub total: f64,
}

/// Minimal projection for unauthenticated status lookup by code.
///
/// Deliberately excludes items, notes and contact details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PublicOrderStatus {
    pub code: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub created_at: i64,
}

/// Line item input for order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    pub customer_whatsapp: String,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderItemInput>,
}

/// Partial update payload for an order.
///
/// Omitted fields are untouched. For the notes fields an empty string
/// clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub admin_notes: Option<String>,
    pub notes: Option<String>,
}

impl OrderUpdate {
    /// True when no field was supplied at all
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.admin_notes.is_none() && self.notes.is_none()
    }
}
