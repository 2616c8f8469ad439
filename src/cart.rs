use crate::session::SessionId;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// One line in a cost estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub service: Option<String>,
    pub resource_type: Option<String>,
    pub specifications: Option<String>,
    pub region: Option<String>,
    pub quantity: u32,
    pub hourly_cost: f64,
    pub monthly_cost: f64,
}

/// Cart item before an id is assigned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCartItem {
    pub service: Option<String>,
    pub resource_type: Option<String>,
    pub specifications: Option<String>,
    pub region: Option<String>,
    pub quantity: u32,
    pub hourly_cost: f64,
    pub monthly_cost: f64,
}

impl NewCartItem {
    fn into_item(self) -> CartItem {
        CartItem {
            id: uuid::Uuid::new_v4().to_string(),
            service: self.service,
            resource_type: self.resource_type,
            specifications: self.specifications,
            region: self.region,
            quantity: self.quantity,
            hourly_cost: self.hourly_cost,
            monthly_cost: self.monthly_cost,
        }
    }
}

/// Items of one session in insertion order
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    fn len(&self) -> usize {
        self.items.len()
    }

    /// Unrounded sum of monthly costs
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.monthly_cost).sum()
    }
}

/// Per-session carts, held in memory only
#[derive(Debug, Default)]
pub struct CartStore {
    carts: DashMap<SessionId, Cart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and return its new id
    pub fn add(&self, session: &SessionId, item: NewCartItem) -> String {
        let item = item.into_item();
        let id = item.id.clone();
        self.carts
            .entry(session.clone())
            .or_default()
            .items
            .push(item);
        id
    }

    /// Remove by id. Returns whether an item was removed.
    pub fn remove(&self, session: &SessionId, id: &str) -> bool {
        match self.carts.get_mut(session) {
            Some(mut cart) => {
                let before = cart.items.len();
                cart.items.retain(|item| item.id != id);
                cart.items.len() != before
            }
            None => false,
        }
    }

    pub fn clear(&self, session: &SessionId) {
        self.carts.remove(session);
    }

    pub fn list(&self, session: &SessionId) -> Vec<CartItem> {
        self.carts
            .get(session)
            .map(|cart| cart.items.clone())
            .unwrap_or_default()
    }

    pub fn total(&self, session: &SessionId) -> f64 {
        self.carts.get(session).map(|cart| cart.total()).unwrap_or(0.0)
    }

    pub fn count(&self, session: &SessionId) -> usize {
        self.carts.get(session).map(|cart| cart.len()).unwrap_or(0)
    }
}

/// Round to cents for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
