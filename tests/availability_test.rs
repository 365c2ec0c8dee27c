//! Order-to-restaurant matching driven end to end through the application
//! services, with in-memory stand-ins for the database and the geocoding
//! provider. No infrastructure required.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use foodcart_service::application::availability::OrderAvailabilityService;
use foodcart_service::application::geocoding::AddressResolver;
use foodcart_service::domain::errors::DomainError;
use foodcart_service::domain::geo::{Coordinates, GeocodeError};
use foodcart_service::domain::menu::MenuRow;
use foodcart_service::domain::order::{
    Fulfillment, OrderLineView, OrderStatus, OrderView, PaymentMethod, RestaurantView,
};
use foodcart_service::domain::ports::{CachedPlace, Geocoder, MenuSource, PlaceStore};

// ── In-memory ports ──────────────────────────────────────────────────────────

struct FakeMenu {
    rows: Vec<MenuRow>,
    restaurants: Vec<RestaurantView>,
    reads: Arc<AtomicUsize>,
}

impl FakeMenu {
    fn new(rows: Vec<MenuRow>, restaurants: Vec<RestaurantView>) -> Self {
        Self {
            rows,
            restaurants,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MenuSource for FakeMenu {
    fn menu_rows(&self) -> Result<Vec<MenuRow>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.clone())
    }

    fn restaurants(&self) -> Result<Vec<RestaurantView>, DomainError> {
        Ok(self.restaurants.clone())
    }
}

#[derive(Default)]
struct MemoryPlaceStore {
    entries: Mutex<HashMap<String, Option<Coordinates>>>,
}

impl PlaceStore for MemoryPlaceStore {
    fn find(&self, address: &str) -> Result<Option<CachedPlace>, DomainError> {
        Ok(self.entries.lock().unwrap().get(address).map(|c| CachedPlace {
            coordinates: *c,
            updated_at: Utc::now(),
        }))
    }

    fn upsert(&self, address: &str, coordinates: Option<Coordinates>) -> Result<(), DomainError> {
        self.entries
            .lock()
            .unwrap()
            .insert(address.to_string(), coordinates);
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Answer {
    Coords(Coordinates),
    Unknown,
    Fail,
}

struct MapGeocoder {
    answers: HashMap<String, Answer>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
}

impl MapGeocoder {
    fn new(answers: &[(&str, Answer)]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(addr, a)| (addr.to_string(), *a))
                .collect(),
            calls: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn call_counter(&self) -> Arc<Mutex<HashMap<String, usize>>> {
        Arc::clone(&self.calls)
    }
}

impl Geocoder for MapGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_insert(0) += 1;
        match self.answers.get(address) {
            Some(Answer::Coords(c)) => Ok(Some(*c)),
            Some(Answer::Unknown) | None => Ok(None),
            Some(Answer::Fail) => Err(GeocodeError::Request("boom".to_string())),
        }
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

fn restaurant(name: &str, address: &str) -> RestaurantView {
    RestaurantView {
        id: Uuid::new_v4(),
        name: name.to_string(),
        address: address.to_string(),
        contact_phone: "+79990001122".to_string(),
    }
}

fn available(restaurant_id: Uuid, product_id: Uuid) -> MenuRow {
    MenuRow {
        restaurant_id,
        product_id,
        availability: true,
    }
}

fn order_at(address: &str, product_ids: &[Uuid]) -> OrderView {
    OrderView {
        id: Uuid::new_v4(),
        firstname: "Ivan".to_string(),
        lastname: "Petrov".to_string(),
        phonenumber: "+79998887766".to_string(),
        address: address.to_string(),
        status: OrderStatus::Unprocessed,
        payment_method: PaymentMethod::Cash,
        comment: None,
        performer_restaurant_id: None,
        created_at: Utc::now(),
        lines: product_ids
            .iter()
            .map(|&product_id| OrderLineView {
                id: Uuid::new_v4(),
                product_id,
                quantity: 1,
                unit_price: 100.into(),
            })
            .collect(),
    }
}

fn coords(longitude: f64, latitude: f64) -> Coordinates {
    Coordinates {
        longitude,
        latitude,
    }
}

fn service(
    menu: FakeMenu,
    geocoder: MapGeocoder,
) -> OrderAvailabilityService<FakeMenu, MemoryPlaceStore, MapGeocoder> {
    OrderAvailabilityService::new(
        menu,
        AddressResolver::new(MemoryPlaceStore::default(), geocoder),
    )
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn full_coverage_restaurant_is_matched_and_ranked() {
    let pizza = Uuid::new_v4();
    let cola = Uuid::new_v4();
    let a = restaurant("Restaurant A", "A street 1");
    let b = restaurant("Restaurant B", "B street 2");

    let menu = FakeMenu::new(
        vec![
            available(a.id, pizza),
            available(a.id, cola),
            available(b.id, pizza),
        ],
        vec![a.clone(), b],
    );
    let geocoder = MapGeocoder::new(&[
        ("A street 1", Answer::Coords(coords(30.0, 60.0))),
        ("Order street 3", Answer::Coords(coords(30.1, 60.1))),
    ]);

    let annotated = service(menu, geocoder)
        .annotate(vec![order_at("Order street 3", &[pizza, cola])])
        .unwrap();

    assert_eq!(annotated.len(), 1);
    let Fulfillment::Candidates(ranked) = &annotated[0].fulfillment else {
        panic!("expected candidates");
    };
    // Only A covers the whole order; B misses cola.
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].id, a.id);
    assert_eq!(ranked[0].name, "Restaurant A");
    let distance = ranked[0].distance_km.unwrap();
    assert!((distance - 12.43).abs() < 0.05, "got {distance}");
}

#[test]
fn unfulfillable_order_gets_no_candidates_marker() {
    let pizza = Uuid::new_v4();
    let sushi = Uuid::new_v4();
    let a = restaurant("Restaurant A", "A street 1");

    let menu = FakeMenu::new(vec![available(a.id, pizza)], vec![a]);

    let annotated = service(menu, MapGeocoder::new(&[]))
        .annotate(vec![order_at("Order street 3", &[sushi])])
        .unwrap();

    assert!(matches!(annotated[0].fulfillment, Fulfillment::NoCandidates));
}

#[test]
fn order_without_lines_gets_no_candidates_marker() {
    let pizza = Uuid::new_v4();
    let a = restaurant("Restaurant A", "A street 1");

    let menu = FakeMenu::new(vec![available(a.id, pizza)], vec![a]);

    let annotated = service(menu, MapGeocoder::new(&[]))
        .annotate(vec![order_at("Order street 3", &[])])
        .unwrap();

    assert!(matches!(annotated[0].fulfillment, Fulfillment::NoCandidates));
}

#[test]
fn geocode_failure_keeps_restaurant_with_unknown_distance() {
    let pizza = Uuid::new_v4();
    let a = restaurant("Broken Address", "Does not geocode");
    let b = restaurant("Fine Address", "B street 2");

    let menu = FakeMenu::new(
        vec![available(a.id, pizza), available(b.id, pizza)],
        vec![a.clone(), b.clone()],
    );
    let geocoder = MapGeocoder::new(&[
        ("Does not geocode", Answer::Fail),
        ("B street 2", Answer::Coords(coords(30.0, 60.0))),
        ("Order street 3", Answer::Coords(coords(30.1, 60.1))),
    ]);

    let annotated = service(menu, geocoder)
        .annotate(vec![order_at("Order street 3", &[pizza])])
        .unwrap();

    let Fulfillment::Candidates(ranked) = &annotated[0].fulfillment else {
        panic!("expected candidates");
    };
    // Both restaurants stay listed; the resolvable one ranks first, the
    // broken one trails with no distance.
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].id, b.id);
    assert!(ranked[0].distance_km.is_some());
    assert_eq!(ranked[1].id, a.id);
    assert!(ranked[1].distance_km.is_none());
}

#[test]
fn unresolvable_order_address_degrades_all_distances() {
    let pizza = Uuid::new_v4();
    let a = restaurant("Restaurant A", "A street 1");

    let menu = FakeMenu::new(vec![available(a.id, pizza)], vec![a.clone()]);
    let geocoder = MapGeocoder::new(&[
        ("A street 1", Answer::Coords(coords(30.0, 60.0))),
        ("Order street 3", Answer::Unknown),
    ]);

    let annotated = service(menu, geocoder)
        .annotate(vec![order_at("Order street 3", &[pizza])])
        .unwrap();

    let Fulfillment::Candidates(ranked) = &annotated[0].fulfillment else {
        panic!("expected candidates");
    };
    assert_eq!(ranked[0].id, a.id);
    assert!(ranked[0].distance_km.is_none());
}

#[test]
fn menu_is_read_once_per_batch() {
    let pizza = Uuid::new_v4();
    let a = restaurant("Restaurant A", "A street 1");

    let menu = FakeMenu::new(vec![available(a.id, pizza)], vec![a]);
    let reads = Arc::clone(&menu.reads);
    let geocoder = MapGeocoder::new(&[
        ("A street 1", Answer::Coords(coords(30.0, 60.0))),
        ("Order street 3", Answer::Coords(coords(30.1, 60.1))),
    ]);

    let orders = vec![
        order_at("Order street 3", &[pizza]),
        order_at("Order street 3", &[pizza]),
        order_at("Order street 3", &[pizza]),
    ];
    service(menu, geocoder).annotate(orders).unwrap();

    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

#[test]
fn each_address_is_geocoded_once_per_batch() {
    let pizza = Uuid::new_v4();
    let a = restaurant("Restaurant A", "A street 1");

    let menu = FakeMenu::new(vec![available(a.id, pizza)], vec![a]);
    let geocoder = MapGeocoder::new(&[
        ("A street 1", Answer::Coords(coords(30.0, 60.0))),
        ("Order street 3", Answer::Coords(coords(30.1, 60.1))),
    ]);
    let calls = geocoder.call_counter();

    let orders = vec![
        order_at("Order street 3", &[pizza]),
        order_at("Order street 3", &[pizza]),
    ];
    service(menu, geocoder).annotate(orders).unwrap();

    // The second order's lookups are cache hits.
    let calls = calls.lock().unwrap();
    assert_eq!(calls.get("Order street 3"), Some(&1));
    assert_eq!(calls.get("A street 1"), Some(&1));
}

#[test]
fn failed_addresses_are_retried_after_provider_recovery() {
    let store = MemoryPlaceStore::default();
    let unknown = MapGeocoder::new(&[("Nowhere 1", Answer::Unknown)]);
    let resolver = AddressResolver::new(store, unknown);

    assert!(resolver.resolve("Nowhere 1").unwrap().is_none());

    // Same store, recovered provider: the cached negative entry must not
    // block the fresh answer.
    let (store, _) = resolver.into_parts();
    let recovered = MapGeocoder::new(&[("Nowhere 1", Answer::Coords(coords(30.0, 60.0)))]);
    let resolver = AddressResolver::new(store, recovered);

    let resolved = resolver.resolve("Nowhere 1").unwrap().unwrap();
    assert_eq!(resolved.longitude, 30.0);
    assert_eq!(resolved.latitude, 60.0);
}

#[test]
fn no_restaurant_sentinel_is_stable() {
    assert_eq!(
        foodcart_service::handlers::orders::NO_RESTAURANT_MESSAGE,
        "No restaurant can fulfill this order"
    );
}
