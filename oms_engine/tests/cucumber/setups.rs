use cucumber::given;
use oms_engine::test_utils::prepare_env::{seed_customer, seed_product};

use crate::cucumber::{world::OrderManagementSystem, OrderWorld};

#[given("a fresh install")]
async fn fresh_database(world: &mut OrderWorld) {
    let system = OrderManagementSystem::new().await;
    world.system = Some(system);
}

#[given(expr = "a customer {string}")]
async fn a_customer(world: &mut OrderWorld, name: String) {
    let customer = seed_customer(world.db(), &name).await;
    world.customers.insert(name, customer.id);
}

#[given(expr = "a product {string} priced at {int} with {int} units in stock")]
async fn a_product(world: &mut OrderWorld, name: String, price: i64, quantity: i64) {
    let product = seed_product(world.db(), &name, price, quantity).await;
    world.products.insert(name, product.id);
}
