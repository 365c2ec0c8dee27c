use std::collections::HashMap;

use uuid::Uuid;

use crate::application::geocoding::AddressResolver;
use crate::domain::errors::DomainError;
use crate::domain::geo::distance_km;
use crate::domain::menu::MenuIndex;
use crate::domain::order::{
    AnnotatedOrder, Fulfillment, OrderView, RankedRestaurant, RestaurantView,
};
use crate::domain::ports::{Geocoder, MenuSource, PlaceStore};

/// Annotates candidate restaurants with delivery distance.
///
/// Geocoding failures are contained here: a restaurant whose address (or
/// whose order's address) cannot be resolved keeps its place in the output
/// with an unknown distance. Nothing at this layer may prevent an order
/// from being displayed.
pub struct DistanceRanker<'a, S, G> {
    resolver: &'a AddressResolver<S, G>,
}

impl<'a, S: PlaceStore, G: Geocoder> DistanceRanker<'a, S, G> {
    pub fn new(resolver: &'a AddressResolver<S, G>) -> Self {
        Self { resolver }
    }

    pub fn rank(&self, order_address: &str, candidates: &[RestaurantView]) -> Vec<RankedRestaurant> {
        let order_coords = self.resolve_logged(order_address);

        let mut ranked: Vec<RankedRestaurant> = candidates
            .iter()
            .map(|restaurant| {
                let distance_km = match (order_coords, self.resolve_logged(&restaurant.address)) {
                    (Some(from), Some(to)) => Some(distance_km(from, to)),
                    _ => None,
                };
                RankedRestaurant {
                    id: restaurant.id,
                    name: restaurant.name.clone(),
                    distance_km,
                }
            })
            .collect();

        // Nearest first; unresolved distances sink to the end. Ties keep
        // the incoming restaurant-id order (sort is stable).
        ranked.sort_by(|a, b| match (a.distance_km, b.distance_km) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        ranked
    }

    fn resolve_logged(&self, address: &str) -> Option<crate::domain::geo::Coordinates> {
        match self.resolver.resolve(address) {
            Ok(coordinates) => coordinates,
            Err(e) => {
                log::warn!("could not geocode '{address}': {e}");
                None
            }
        }
    }
}

/// Batch order annotation: which restaurants can cook each order, and how
/// far away are they.
pub struct OrderAvailabilityService<M, S, G> {
    menu: M,
    resolver: AddressResolver<S, G>,
}

impl<M: MenuSource, S: PlaceStore, G: Geocoder> OrderAvailabilityService<M, S, G> {
    pub fn new(menu: M, resolver: AddressResolver<S, G>) -> Self {
        Self { menu, resolver }
    }

    /// Annotate every order in the batch. Menu availability is read once at
    /// batch start so all orders see a consistent snapshot.
    pub fn annotate(&self, orders: Vec<OrderView>) -> Result<Vec<AnnotatedOrder>, DomainError> {
        let rows = self.menu.menu_rows()?;
        let index = MenuIndex::build(&rows);
        let restaurants: HashMap<Uuid, RestaurantView> = self
            .menu
            .restaurants()?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();
        let ranker = DistanceRanker::new(&self.resolver);

        Ok(orders
            .into_iter()
            .map(|order| {
                let requested = order.requested_products();
                let candidate_ids = index.full_coverage(&requested);
                let candidates: Vec<RestaurantView> = candidate_ids
                    .iter()
                    .filter_map(|id| restaurants.get(id).cloned())
                    .collect();

                let fulfillment = if candidates.is_empty() {
                    Fulfillment::NoCandidates
                } else {
                    Fulfillment::Candidates(ranker.rank(&order.address, &candidates))
                };

                AnnotatedOrder { order, fulfillment }
            })
            .collect())
    }
}
