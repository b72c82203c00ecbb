use serde::{Deserialize, Serialize};

/// A single aisle from `aisles.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aisle {
    /// Numeric aisle identifier
    pub aisle_id: u32,
    /// Human-readable aisle name
    pub aisle: String,
}

/// A single department from `departments.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// Numeric department identifier
    pub department_id: u32,
    /// Human-readable department name
    pub department: String,
}

/// A single product from `products.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Numeric product identifier
    pub product_id: u32,
    /// Human-readable product name
    pub product_name: String,
    /// Aisle this product is stocked in
    pub aisle_id: u32,
    /// Department this product belongs to
    pub department_id: u32,
}

/// A single order header from `orders.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Numeric order identifier
    pub order_id: u32,
    /// Customer that placed the order
    pub user_id: u32,
    /// 1-based sequence number of this order within the user's history
    pub order_number: u32,
    /// Day of week the order was placed (0 = Sunday .. 6 = Saturday)
    pub order_dow: u8,
    /// Hour of day the order was placed (0..23)
    pub order_hour_of_day: u8,
    /// Days elapsed since the user's previous order; empty for a first order
    pub days_since_prior_order: Option<f64>,
}

/// A single order line from `order_products__train.csv` or
/// `order_products__prior.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Order this line belongs to
    pub order_id: u32,
    /// Product that was added to the cart
    pub product_id: u32,
    /// 1-based position at which the product was added to the cart
    pub add_to_cart_order: u32,
    /// 1 if the user had ordered this product before, 0 otherwise
    pub reordered: u8,
}

/// All six input tables, loaded once and never mutated afterwards
#[derive(Debug, Clone)]
pub struct Dataset {
    pub aisles: Vec<Aisle>,
    pub departments: Vec<Department>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    /// Order lines from the train split (read in full)
    pub train_lines: Vec<OrderLine>,
    /// Order lines from the prior split (row-capped prefix)
    pub prior_lines: Vec<OrderLine>,
}

/// A train order line joined against the product, aisle and department
/// dimension tables
///
/// Recomputed on every run; never persisted. With fully resolving foreign
/// keys the join is row-preserving, lines with an unknown product id are
/// dropped.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedOrderLine {
    pub order_id: u32,
    pub product_id: u32,
    /// 1 if the user had ordered this product before, 0 otherwise
    pub reordered: u8,
    pub product_name: String,
    pub aisle: String,
    pub department: String,
}
