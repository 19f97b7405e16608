use actix_web::http::StatusCode;
use oms_engine::test_utils::prepare_env::{seed_customer, seed_product};
use serde_json::{json, Value};

use super::helpers::{get, post, put, test_db};

fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("Response has no id").to_string()
}

#[actix_web::test]
async fn order_lifecycle() {
    let db = test_db().await;
    let product = seed_product(&db, "widget", 1000, 5).await;
    let (status, customer) = post(&db, "/customers", json!({"name": "Alice", "email": "alice@example.com"})).await;
    assert_eq!(status, StatusCode::CREATED);
    let customer_id = id_of(&customer);
    let (status, fetched) = get(&db, &format!("/customers/{customer_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "alice@example.com");

    let body = json!({"customer_id": customer_id, "items": [{"product_id": product.id, "quantity": 2}]});
    let (status, order) = post(&db, "/orders", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "cart");
    assert_eq!(order["total_amount"], 2000);
    let order_id = id_of(&order);

    let body = json!({"product_id": product.id, "quantity": 1});
    let (status, order) = post(&db, &format!("/orders/{order_id}/add-product"), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["items"].as_array().unwrap().len(), 1);
    assert_eq!(order["items"][0]["quantity"], 3);
    assert_eq!(order["items"][0]["subtotal"], 3000);
    assert_eq!(order["total_amount"], 3000);

    let (status, order) = put(&db, &format!("/orders/{order_id}/checkout"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "checkout");
    let (_, product_now) = get(&db, &format!("/products/{}", product.id)).await;
    assert_eq!(product_now["quantity"], 2);

    let (status, body) =
        put(&db, &format!("/orders/{order_id}/set-payment"), Some(json!({"payment_method": "e_wallet"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Payment method 'e_wallet' is not supported. Only bank transfers are accepted.");

    let (status, order) =
        put(&db, &format!("/orders/{order_id}/set-payment"), Some(json!({"payment_method": "bank_transfer"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "awaiting_payment");
    assert_eq!(order["payment_method"], "bank_transfer");

    let (status, order) = put(&db, &format!("/orders/{order_id}/pay"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "complete");

    let (status, order) = get(&db, &format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "complete");
    assert_eq!(order["total_amount"], 3000);
    assert_eq!(order["items"][0]["price"], 1000);

    let (status, page) = get(&db, &format!("/customers/{customer_id}/orders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["content"][0]["id"], order_id);
}

#[actix_web::test]
async fn stock_shortfalls_are_listed_per_product() {
    let db = test_db().await;
    let product = seed_product(&db, "widget", 1000, 5).await;
    let customer = seed_customer(&db, "Bob").await;
    let body = json!({
        "customer_id": customer.id,
        "items": [{"product_id": product.id, "quantity": 6}, {"product_id": "missing", "quantity": 1}]
    });
    let (status, body) = post(&db, "/orders", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], product.id.as_str());
    assert_eq!(errors[0]["message"], "Product out of stock or insufficient.");
    assert_eq!(errors[1]["field"], "missing");
    assert_eq!(errors[1]["message"], "Product does not exist.");

    let (_, page) = get(&db, &format!("/customers/{}/orders", customer.id)).await;
    assert_eq!(page["pagination"]["total"], 0);
}

#[actix_web::test]
async fn oversized_totals_are_rejected() {
    let db = test_db().await;
    let yacht = seed_product(&db, "yacht", 4_000_000_000_000_000_000, 5).await;
    let customer = seed_customer(&db, "Dave").await;
    let body = json!({"customer_id": customer.id, "items": [{"product_id": yacht.id, "quantity": 3}]});
    let (status, body) = post(&db, "/orders", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("is too large"), "Got {body}");

    let (status, page) = get(&db, &format!("/customers/{}/orders", customer.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pagination"]["total"], 0);
    let (_, product) = get(&db, &format!("/products/{}", yacht.id)).await;
    assert_eq!(product["quantity"], 5);
}

#[actix_web::test]
async fn illegal_order_actions_are_rejected() {
    let db = test_db().await;
    let product = seed_product(&db, "widget", 1000, 5).await;
    let customer = seed_customer(&db, "Carol").await;
    let (_, order) = post(&db, "/orders", json!({"customer_id": customer.id})).await;
    let order_id = id_of(&order);

    let (status, body) = put(&db, &format!("/orders/{order_id}/checkout"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot checkout an order with status 'cart': the order has no items.");

    let (status, body) = put(&db, &format!("/orders/{order_id}/pay"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot pay an order with status 'cart'.");

    let body = json!({"product_id": product.id, "quantity": 0});
    let (status, _) = post(&db, &format!("/orders/{order_id}/add-product"), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, order) = get(&db, &format!("/orders/{order_id}")).await;
    assert_eq!(order["status"], "cart");
    assert_eq!(order["items"].as_array().unwrap().len(), 0);
    let (_, product_now) = get(&db, &format!("/products/{}", product.id)).await;
    assert_eq!(product_now["quantity"], 5);
}

#[actix_web::test]
async fn unknown_records_are_not_found() {
    let db = test_db().await;
    let (status, body) = post(&db, "/orders", json!({"customer_id": "nobody", "items": []})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "The data was not found. Customer nobody does not exist.");

    let (status, _) = put(&db, "/orders/no-such-order/checkout", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&db, "/orders/no-such-order").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&db, "/customers/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = post(&db, "/customers", json!({"name": " "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid customer data: Customer name cannot be empty");
}
