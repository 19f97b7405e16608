use actix_web::{http::StatusCode, test, test::TestRequest, App};
use oms_engine::{events::EventProducers, test_utils::prepare_env::seed_product};
use serde_json::json;

use super::helpers::{get, post, put, send, test_db};
use crate::server::{configure_app, demo_products, seed_demo_products};

#[actix_web::test]
async fn health_check() {
    let db = test_db().await;
    let app = App::new().configure(move |cfg| configure_app(cfg, db, EventProducers::default()));
    let service = test::init_service(app).await;
    let res = test::call_service(&service, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    assert_eq!(body.as_ref(), "👍️\n".as_bytes());
}

#[actix_web::test]
async fn create_fetch_and_update_product() {
    let db = test_db().await;
    let (status, product) =
        post(&db, "/products", json!({"name": "shirt", "description": "A shirt", "price": 15000, "quantity": 5})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["name"], "shirt");
    assert_eq!(product["price"], 15000);
    assert_eq!(product["quantity"], 5);
    let id = product["id"].as_str().unwrap().to_string();

    let (status, fetched) = get(&db, &format!("/products/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, product);

    let (status, updated) = put(&db, &format!("/products/{id}"), Some(json!({"price": 20000}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 20000);
    assert_eq!(updated["quantity"], 5);
    assert_eq!(updated["name"], "shirt");

    let (status, _) = put(&db, &format!("/products/{id}"), Some(json!({"quantity": -1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn bad_product_requests() {
    let db = test_db().await;
    let (status, body) = post(&db, "/products", json!({"name": "shirt", "price": -1, "quantity": 5})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid product data"));

    let (status, body) = post(&db, "/products", json!({"name": "shirt"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Could not read request body"));

    let (status, body) = get(&db, "/products/no-such-product").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "The data was not found. Product no-such-product does not exist.");

    let (status, _) = put(&db, "/products/no-such-product", Some(json!({"price": 100}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn search_products() {
    let db = test_db().await;
    seed_product(&db, "Blue Widget", 100, 3).await;
    seed_product(&db, "Red Widget", 200, 0).await;
    seed_product(&db, "Gadget", 300, 7).await;

    let (status, page) = get(&db, "/products?name=widget").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pagination"]["total"], 2);
    assert_eq!(page["pagination"]["page"], 1);
    assert_eq!(page["pagination"]["size"], 10);
    assert_eq!(page["content"].as_array().unwrap().len(), 2);

    let (_, page) = get(&db, "/products?name=widget&in_stock=true").await;
    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["content"][0]["name"], "Blue Widget");

    let (_, page) = get(&db, "/products?page=2&size=2").await;
    assert_eq!(page["pagination"]["total"], 3);
    assert_eq!(page["pagination"]["page"], 2);
    assert_eq!(page["content"].as_array().unwrap().len(), 1);

    let (status, _) = get(&db, "/products?page=two").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn demo_products_are_seeded_once() {
    let db = test_db().await;
    seed_demo_products(&db).await.unwrap();
    seed_demo_products(&db).await.unwrap();
    let (status, page) = send(&db, TestRequest::get().uri("/products?size=100")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pagination"]["total"], demo_products().len() as i64);
    let (_, page) = get(&db, "/products?name=product3").await;
    assert_eq!(page["content"][0]["quantity"], 0);
}
