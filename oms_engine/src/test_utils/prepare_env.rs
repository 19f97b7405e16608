use log::*;
use oms_common::Money;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::{
    db_types::{Customer, NewCustomer, NewProduct, Product},
    traits::{CustomerManagement, ProductManagement},
    SqliteDatabase,
};

pub async fn prepare_test_env(url: &str) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    create_database(url).await;
    run_migrations(url).await;
}

/// A fresh database location in the system temp directory.
pub fn random_db_path() -> String {
    let path = std::env::temp_dir().join(format!("oms_test_store_{}.db", rand::random::<u64>()));
    format!("sqlite://{}", path.display())
}

pub async fn run_migrations(url: &str) {
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    info!("🚀️ Migrations complete");
}

pub async fn create_database(url: &str) {
    if Sqlite::database_exists(url).await.unwrap_or(false) {
        if let Err(e) = Sqlite::drop_database(url).await {
            warn!("🚀️ Error dropping database {url}: {e:?}");
        }
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("🚀️ Created Sqlite database {url}");
}

/// A migrated database at a random location, with a pool of up to `max_connections`.
pub async fn new_test_db(max_connections: u32) -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, max_connections).await.expect("Error creating connection to database")
}

pub async fn drop_test_db(url: &str) {
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("🚀️ Could not remove test database {url}: {e}");
    }
}

pub async fn seed_product(db: &SqliteDatabase, name: &str, price: i64, quantity: i64) -> Product {
    let product = NewProduct::new(name, Money::from(price), quantity);
    db.insert_product(product).await.expect("Error inserting test product")
}

pub async fn seed_customer(db: &SqliteDatabase, name: &str) -> Customer {
    let customer = NewCustomer::new(name).with_email(format!("{}@example.com", name.to_lowercase()));
    db.insert_customer(customer).await.expect("Error inserting test customer")
}
