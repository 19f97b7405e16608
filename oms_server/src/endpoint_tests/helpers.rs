use actix_web::{http::StatusCode, test, test::TestRequest, App};
use log::debug;
use oms_engine::{
    events::EventProducers,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    SqliteDatabase,
};
use serde_json::Value;

use crate::server::configure_app;

/// A freshly migrated database in the temp directory.
pub async fn test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database")
}

/// Sends `req` to an app wired to `db` and returns the status and the JSON body (or `Null` if the body is not JSON).
pub async fn send(db: &SqliteDatabase, req: TestRequest) -> (StatusCode, Value) {
    let db = db.clone();
    let app = App::new().configure(move |cfg| configure_app(cfg, db, EventProducers::default()));
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    debug!("Response: {status} {}", String::from_utf8_lossy(&body));
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(db: &SqliteDatabase, path: &str) -> (StatusCode, Value) {
    send(db, TestRequest::get().uri(path)).await
}

pub async fn post(db: &SqliteDatabase, path: &str, body: Value) -> (StatusCode, Value) {
    send(db, TestRequest::post().uri(path).set_json(body)).await
}

pub async fn put(db: &SqliteDatabase, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = TestRequest::put().uri(path);
    let req = match body {
        Some(body) => req.set_json(body),
        None => req,
    };
    send(db, req).await
}
