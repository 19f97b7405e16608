use cucumber::{then, when};
use oms_common::Money;
use oms_engine::{
    db_types::{OrderStatusType, PaymentMethod},
    stock_ledger::StockCheckStatus,
    OrderFlowError,
    ProductManagement,
};

use crate::cucumber::OrderWorld;

//------------------------------------------   Order creation   -----------------------------------------------------

#[when(expr = "{word} creates an empty order {string}")]
async fn create_empty_order(world: &mut OrderWorld, customer: String, order: String) {
    let customer_id = world.customer_id(&customer);
    let created = world.api().create_order(&customer_id, &[]).await.expect("Error creating order");
    world.orders.insert(order, created.id);
}

#[when(expr = "{word} creates an order {string} with items {string}")]
async fn create_order_with_items(world: &mut OrderWorld, customer: String, order: String, items: String) {
    let customer_id = world.customer_id(&customer);
    let lines = world.order_lines(&items);
    let created = world.api().create_order(&customer_id, &lines).await.expect("Error creating order");
    world.orders.insert(order, created.id);
}

#[when(expr = "I try to create an order for {word} with items {string}")]
async fn try_create_order(world: &mut OrderWorld, customer: String, items: String) {
    let customer_id = world.customer_id(&customer);
    let lines = world.order_lines(&items);
    let result = world.api().create_order(&customer_id, &lines).await;
    world.record(result);
}

//------------------------------------------   Transitions   --------------------------------------------------------

#[when(expr = "I add {int} units of {string} to order {string}")]
async fn add_item(world: &mut OrderWorld, quantity: i64, product: String, order: String) {
    let order_id = world.order_id(&order);
    let product_id = world.product_id(&product);
    world.api().add_item(&order_id, &product_id, quantity).await.expect("Error adding item");
}

#[when(expr = "I try to add {int} units of {string} to order {string}")]
async fn try_add_item(world: &mut OrderWorld, quantity: i64, product: String, order: String) {
    let order_id = world.order_id(&order);
    let product_id = world.product_id(&product);
    let result = world.api().add_item(&order_id, &product_id, quantity).await;
    world.record(result);
}

#[when(expr = "I check out order {string}")]
async fn checkout(world: &mut OrderWorld, order: String) {
    let order_id = world.order_id(&order);
    world.api().checkout(&order_id).await.expect("Error checking out");
}

#[when(expr = "I try to check out order {string}")]
async fn try_checkout(world: &mut OrderWorld, order: String) {
    let order_id = world.order_id(&order);
    let result = world.api().checkout(&order_id).await;
    world.record(result);
}

#[when(expr = "I choose {string} as the payment method for order {string}")]
async fn set_payment(world: &mut OrderWorld, method: String, order: String) {
    let order_id = world.order_id(&order);
    let method = method.parse::<PaymentMethod>().expect("Unknown payment method");
    world.api().set_payment(&order_id, method).await.expect("Error setting payment method");
}

#[when(expr = "I try to choose {string} as the payment method for order {string}")]
async fn try_set_payment(world: &mut OrderWorld, method: String, order: String) {
    let order_id = world.order_id(&order);
    let method = method.parse::<PaymentMethod>().expect("Unknown payment method");
    let result = world.api().set_payment(&order_id, method).await;
    world.record(result);
}

#[when(expr = "I pay for order {string}")]
async fn pay(world: &mut OrderWorld, order: String) {
    let order_id = world.order_id(&order);
    world.api().pay(&order_id).await.expect("Error paying for order");
}

#[when(expr = "I try to pay for order {string}")]
async fn try_pay(world: &mut OrderWorld, order: String) {
    let order_id = world.order_id(&order);
    let result = world.api().pay(&order_id).await;
    world.record(result);
}

//------------------------------------------   Order checks   -------------------------------------------------------

#[then(expr = "order {string} has status {string} and a total of {int}")]
async fn check_status_and_total(world: &mut OrderWorld, order: String, status: String, total: i64) {
    let stored = world.order(&order).await;
    let status = status.parse::<OrderStatusType>().expect("Unknown order status");
    assert_eq!(stored.status, status, "Order {order} has the wrong status");
    assert_eq!(stored.total_amount(), Money::from(total), "Order {order} has the wrong total");
}

#[then(expr = "order {string} has {int} item(s)")]
async fn check_item_count(world: &mut OrderWorld, order: String, count: usize) {
    let stored = world.order(&order).await;
    assert_eq!(stored.items().len(), count, "Order {order} has the wrong number of items");
}

#[then(expr = "order {string} has an item for {string} with quantity {int} and subtotal {int}")]
async fn check_item(world: &mut OrderWorld, order: String, product: String, quantity: i64, subtotal: i64) {
    let stored = world.order(&order).await;
    let product_id = world.product_id(&product);
    let item = stored.item_for(&product_id).unwrap_or_else(|| panic!("Order {order} has no item for {product}"));
    assert_eq!(item.quantity, quantity);
    assert_eq!(item.subtotal, Money::from(subtotal));
}

#[then(expr = "order {string} is consistent")]
async fn check_consistent(world: &mut OrderWorld, order: String) {
    let stored = world.order(&order).await;
    assert!(stored.is_consistent(), "Order {order} totals do not add up: {stored:?}");
}

#[then(expr = "order {string} has payment method {string}")]
async fn check_payment_method(world: &mut OrderWorld, order: String, method: String) {
    let stored = world.order(&order).await;
    let method = method.parse::<PaymentMethod>().expect("Unknown payment method");
    assert_eq!(stored.payment_method, Some(method));
}

#[then(expr = "order {string} has no payment method")]
async fn check_no_payment_method(world: &mut OrderWorld, order: String) {
    let stored = world.order(&order).await;
    assert_eq!(stored.payment_method, None);
}

#[then(expr = "product {string} has {int} units in stock")]
async fn check_stock(world: &mut OrderWorld, product: String, quantity: i64) {
    let id = world.product_id(&product);
    let stored = world.db().fetch_product(&id).await.expect("Error fetching product").expect("Product does not exist");
    assert_eq!(stored.quantity, quantity, "Product {product} has the wrong stock level");
}

//------------------------------------------   Failures   -----------------------------------------------------------

fn assert_shortfall(world: &mut OrderWorld, product: &str, status: StockCheckStatus) {
    let product_id = world.product_id(product);
    match world.take_error() {
        OrderFlowError::StockUnavailable(e) => {
            let shortfall = e.shortfalls().iter().find(|s| s.product_id == product_id);
            let shortfall = shortfall.unwrap_or_else(|| panic!("{product} is not named in the error: {e}"));
            assert_eq!(shortfall.status, status);
        },
        e => panic!("Expected StockUnavailable, got {e:?}"),
    }
}

#[then(expr = "the request fails because {string} is out of stock")]
async fn fails_out_of_stock(world: &mut OrderWorld, product: String) {
    assert_shortfall(world, &product, StockCheckStatus::OutOfStock);
}

#[then(expr = "the request fails because {string} does not exist")]
async fn fails_not_exist(world: &mut OrderWorld, product: String) {
    assert_shortfall(world, &product, StockCheckStatus::NotExist);
}

#[then("the request fails with an invalid transition")]
async fn fails_invalid_transition(world: &mut OrderWorld) {
    let err = world.take_error();
    assert!(matches!(err, OrderFlowError::InvalidTransition(_)), "Expected InvalidTransition, got {err:?}");
}

#[then("the request fails because the customer does not exist")]
async fn fails_customer_not_found(world: &mut OrderWorld) {
    let err = world.take_error();
    assert!(matches!(err, OrderFlowError::CustomerNotFound(_)), "Expected CustomerNotFound, got {err:?}");
}

#[then("the request fails because the payment method is not supported")]
async fn fails_unsupported_payment(world: &mut OrderWorld) {
    let err = world.take_error();
    assert!(
        matches!(err, OrderFlowError::UnsupportedPaymentMethod(PaymentMethod::EWallet)),
        "Expected UnsupportedPaymentMethod, got {err:?}"
    );
}

#[then("the request fails because the quantity is invalid")]
async fn fails_invalid_quantity(world: &mut OrderWorld) {
    let err = world.take_error();
    assert!(matches!(err, OrderFlowError::InvalidQuantity(_)), "Expected InvalidQuantity, got {err:?}");
}
