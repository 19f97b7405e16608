use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, web::ServiceConfig, App, HttpServer};
use log::*;
use oms_common::Money;
use oms_engine::{
    db_types::NewProduct,
    events::EventProducers,
    CatalogApi,
    CustomerApi,
    OrderApi,
    OrderFlowApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::order_log::create_order_log_handlers,
    routes::{
        health,
        AddProductRoute,
        CheckoutRoute,
        CreateCustomerRoute,
        CreateOrderRoute,
        CreateProductRoute,
        CustomerByIdRoute,
        OrderByIdRoute,
        OrdersForCustomerRoute,
        PayRoute,
        ProductByIdRoute,
        SearchProductsRoute,
        SetPaymentRoute,
        UpdateProductRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.run_migrations {
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
        info!("🚀️ Database migrations complete");
    }
    if config.seed_demo_products {
        seed_demo_products(&db).await?;
    }
    let handlers = create_order_log_handlers();
    let producers = handlers.producers();
    let _handler_tasks = handlers.start_handlers();
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let db = db.clone();
        let producers = producers.clone();
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("oms::access_log"))
            .configure(move |cfg| configure_app(cfg, db, producers))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers the engine APIs and every route on `cfg`.
pub fn configure_app(cfg: &mut ServiceConfig, db: SqliteDatabase, producers: EventProducers) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into());
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| ServerError::InvalidRequestPath(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ServerError::InvalidRequestQuery(err.to_string()).into());
    cfg.app_data(json_config)
        .app_data(path_config)
        .app_data(query_config)
        .app_data(web::Data::new(OrderFlowApi::new(db.clone(), producers)))
        .app_data(web::Data::new(OrderApi::new(db.clone())))
        .app_data(web::Data::new(CatalogApi::new(db.clone())))
        .app_data(web::Data::new(CustomerApi::new(db)))
        .service(health)
        .service(CreateProductRoute::<SqliteDatabase>::new())
        .service(SearchProductsRoute::<SqliteDatabase>::new())
        .service(ProductByIdRoute::<SqliteDatabase>::new())
        .service(UpdateProductRoute::<SqliteDatabase>::new())
        .service(CreateCustomerRoute::<SqliteDatabase>::new())
        .service(CustomerByIdRoute::<SqliteDatabase>::new())
        .service(OrdersForCustomerRoute::<SqliteDatabase>::new())
        .service(CreateOrderRoute::<SqliteDatabase>::new())
        .service(OrderByIdRoute::<SqliteDatabase>::new())
        .service(AddProductRoute::<SqliteDatabase>::new())
        .service(CheckoutRoute::<SqliteDatabase>::new())
        .service(SetPaymentRoute::<SqliteDatabase>::new())
        .service(PayRoute::<SqliteDatabase>::new());
}

/// The products that are added to an empty catalog when `OMS_SEED_DEMO_PRODUCTS` is set.
pub fn demo_products() -> Vec<NewProduct> {
    vec![
        NewProduct::new("product1", Money::from_major(50_000), 10).with_description("Demo product one"),
        NewProduct::new("product2", Money::from_major(500_000), 20).with_description("Demo product two"),
        NewProduct::new("product3", Money::from_major(10_000), 0).with_description("Demo product three, sold out"),
    ]
}

pub async fn seed_demo_products(db: &SqliteDatabase) -> Result<(), ServerError> {
    let api = CatalogApi::new(db.clone());
    let inserted = api.ensure_products(demo_products()).await.map_err(|e| {
        error!("🚀️ Could not seed the demo products. {e}");
        ServerError::InitializeError(e.to_string())
    })?;
    info!("🚀️ {} demo products added to the catalog", inserted.len());
    Ok(())
}
