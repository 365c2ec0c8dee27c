pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod models;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use db::{create_pool, DbPool};
pub use infrastructure::geocoder::HttpGeocoder;

use application::availability::OrderAvailabilityService;
use application::geocoding::AddressResolver;
use application::order_service::{OrderService, ProductService};
use infrastructure::menu_repo::DieselMenuSource;
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::place_repo::DieselPlaceStore;
use infrastructure::product_repo::DieselProductCatalog;

/// Concrete service types behind the HTTP handlers.
pub type AppOrderService = OrderService<DieselOrderRepository>;
pub type AppProductService = ProductService<DieselProductCatalog>;
pub type AppAvailabilityService =
    OrderAvailabilityService<DieselMenuSource, DieselPlaceStore, HttpGeocoder>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::register_order,
        handlers::orders::list_orders,
        handlers::products::list_products,
        handlers::products::delete_product,
    ),
    components(schemas(
        handlers::orders::CreateOrderResponse,
        handlers::orders::OrderLineResponse,
        handlers::orders::RankedRestaurantResponse,
        handlers::orders::AvailabilityResponse,
        handlers::orders::AnnotatedOrderResponse,
        handlers::products::CategoryResponse,
        handlers::products::ProductResponse,
    )),
    tags(
        (name = "orders", description = "Order submission and fulfillment matching"),
        (name = "products", description = "Product catalog"),
    )
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    geocoder: HttpGeocoder,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let order_service = web::Data::new(OrderService::new(DieselOrderRepository::new(pool.clone())));
    let product_service =
        web::Data::new(ProductService::new(DieselProductCatalog::new(pool.clone())));
    let availability_service = web::Data::new(OrderAvailabilityService::new(
        DieselMenuSource::new(pool.clone()),
        AddressResolver::new(DieselPlaceStore::new(pool), geocoder),
    ));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(order_service.clone())
            .app_data(product_service.clone())
            .app_data(availability_service.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .route("/order", web::post().to(handlers::orders::register_order))
                    .route("/orders", web::get().to(handlers::orders::list_orders))
                    .route("/products", web::get().to(handlers::products::list_products))
                    .route(
                        "/products/{id}",
                        web::delete().to(handlers::products::delete_product),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
