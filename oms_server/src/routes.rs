//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Each worker thread processes its requests sequentially, so handlers must not block the current thread. Every
//! database operation is expressed as a future, and awaited, so that workers can interleave requests.
//!
//! All ids in paths are the string ids issued by the engine. Order actions map 1:1 onto [`OrderFlowApi`] calls, and
//! every one of them either succeeds completely or leaves the order and the catalog untouched.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use oms_engine::{
    db_types::{CustomerId, NewCustomer, NewProduct, OrderId, ProductId, ProductUpdate},
    query_objects::Pagination,
    CatalogApi,
    CustomerApi,
    CustomerManagement,
    OrderApi,
    OrderFlowApi,
    OrderManagement,
    OrderStore,
    ProductManagement,
};

use crate::{
    data_objects::{AddProductRequest, CreateOrderRequest, ProductSearchParams, SetPaymentRequest},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Products  ----------------------------------------------------
route!(create_product => Post "/products" impl ProductManagement);
pub async fn create_product<B: ProductManagement>(
    body: web::Json<NewProduct>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product = body.into_inner();
    debug!("💻️ POST new product '{}'", product.name);
    let product = api.create_product(product).await?;
    Ok(HttpResponse::Created().json(product))
}

route!(search_products => Get "/products" impl ProductManagement);
/// Lists the catalog, optionally filtered by name and stock, one page at a time.
pub async fn search_products<B: ProductManagement>(
    query: web::Query<ProductSearchParams>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let params = query.into_inner();
    let filter = params.filter();
    debug!("💻️ GET products. {filter}");
    let page = api.search_products(&filter, &params.pagination()).await?;
    Ok(HttpResponse::Ok().json(page))
}

route!(product_by_id => Get "/products/{id}" impl ProductManagement);
pub async fn product_by_id<B: ProductManagement>(
    path: web::Path<ProductId>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET product {id}");
    let product = api.fetch_product(&id).await?;
    Ok(HttpResponse::Ok().json(product))
}

route!(update_product => Put "/products/{id}" impl ProductManagement);
/// Partially updates a product. Fields that are absent from the body are left unchanged.
pub async fn update_product<B: ProductManagement>(
    path: web::Path<ProductId>,
    body: web::Json<ProductUpdate>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ PUT product {id}");
    let product = api.update_product(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

//----------------------------------------------   Customers  ----------------------------------------------------
route!(create_customer => Post "/customers" impl CustomerManagement);
pub async fn create_customer<B: CustomerManagement>(
    body: web::Json<NewCustomer>,
    api: web::Data<CustomerApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST new customer");
    let customer = api.register_customer(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(customer))
}

route!(customer_by_id => Get "/customers/{id}" impl CustomerManagement);
pub async fn customer_by_id<B: CustomerManagement>(
    path: web::Path<CustomerId>,
    api: web::Data<CustomerApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET customer {id}");
    let customer = api.fetch_customer(&id).await?;
    Ok(HttpResponse::Ok().json(customer))
}

route!(orders_for_customer => Get "/customers/{id}/orders" impl OrderManagement);
/// The customer's orders, newest first.
pub async fn orders_for_customer<B: OrderManagement>(
    path: web::Path<CustomerId>,
    query: web::Query<Pagination>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET orders for customer {id}");
    let page = api.orders_for_customer(&id, &query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/orders" impl OrderStore);
/// Creates a cart for the customer, with the items in the body (if any).
///
/// If any of the items cannot be served from current stock, nothing is created and the response lists every product
/// that fell short.
pub async fn create_order<B: OrderStore>(
    body: web::Json<CreateOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let CreateOrderRequest { customer_id, items } = body.into_inner();
    debug!("💻️ POST new order for customer {customer_id} with {} lines", items.len());
    let order = api.create_order(&customer_id, &items).await?;
    Ok(HttpResponse::Created().json(order))
}

route!(order_by_id => Get "/orders/{id}" impl OrderManagement);
pub async fn order_by_id<B: OrderManagement>(
    path: web::Path<OrderId>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET order {id}");
    let order = api.fetch_order(&id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(add_product => Post "/orders/{id}/add-product" impl OrderStore);
pub async fn add_product<B: OrderStore>(
    path: web::Path<OrderId>,
    body: web::Json<AddProductRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    let AddProductRequest { product_id, quantity } = body.into_inner();
    debug!("💻️ POST add {quantity} x {product_id} to order {id}");
    let order = api.add_item(&id, &product_id, quantity).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(checkout => Put "/orders/{id}/checkout" impl OrderStore);
pub async fn checkout<B: OrderStore>(
    path: web::Path<OrderId>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ PUT checkout order {id}");
    let order = api.checkout(&id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(set_payment => Put "/orders/{id}/set-payment" impl OrderStore);
pub async fn set_payment<B: OrderStore>(
    path: web::Path<OrderId>,
    body: web::Json<SetPaymentRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    let method = body.into_inner().payment_method;
    debug!("💻️ PUT set payment method for order {id} to {method}");
    let order = api.set_payment(&id, method).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(pay => Put "/orders/{id}/pay" impl OrderStore);
pub async fn pay<B: OrderStore>(
    path: web::Path<OrderId>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ PUT pay order {id}");
    let order = api.pay(&id).await?;
    Ok(HttpResponse::Ok().json(order))
}
