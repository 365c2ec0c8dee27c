use std::collections::{BTreeMap, HashSet};

use uuid::Uuid;

/// One raw menu row: does `restaurant_id` currently sell `product_id`?
#[derive(Debug, Clone)]
pub struct MenuRow {
    pub restaurant_id: Uuid,
    pub product_id: Uuid,
    pub availability: bool,
}

/// Snapshot of what every restaurant can sell right now.
///
/// Built fresh from the menu rows on every matching run; availability is
/// toggled by restaurant staff, so a cached index would go stale.
#[derive(Debug, Default)]
pub struct MenuIndex {
    // BTreeMap keeps iteration (and therefore match output) ordered by
    // restaurant id, which makes results stable across identical inputs.
    by_restaurant: BTreeMap<Uuid, HashSet<Uuid>>,
}

impl MenuIndex {
    /// Group available products by restaurant, dropping rows with
    /// `availability == false`. Duplicate (restaurant, product) rows are
    /// collapsed by the set even though the store enforces uniqueness.
    pub fn build(rows: &[MenuRow]) -> Self {
        let mut by_restaurant: BTreeMap<Uuid, HashSet<Uuid>> = BTreeMap::new();
        for row in rows.iter().filter(|r| r.availability) {
            by_restaurant
                .entry(row.restaurant_id)
                .or_default()
                .insert(row.product_id);
        }
        Self { by_restaurant }
    }

    pub fn available_products(&self, restaurant_id: Uuid) -> Option<&HashSet<Uuid>> {
        self.by_restaurant.get(&restaurant_id)
    }

    /// Restaurants whose menu covers *every* requested product, in
    /// restaurant-id order.
    ///
    /// An empty request matches nothing: an order without lines has no
    /// meaningful fulfiller, so returning every restaurant would be
    /// misleading.
    pub fn full_coverage(&self, requested: &HashSet<Uuid>) -> Vec<Uuid> {
        if requested.is_empty() {
            return Vec::new();
        }
        self.by_restaurant
            .iter()
            .filter(|(_, products)| requested.is_subset(products))
            .map(|(restaurant_id, _)| *restaurant_id)
            .collect()
    }
}
