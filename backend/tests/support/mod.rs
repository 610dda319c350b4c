//! Shared harness for HTTP integration tests.
//!
//! Builds the production app wiring over in-memory repositories so the real
//! domain services run end to end without a database.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

use storefront::domain::{ProductCatalogueService, StorefrontHomeService};
use storefront::inbound::http::state::HttpState;
use storefront::test_support::{
    InMemoryProductRepository, InMemoryStorefrontContentRepository, MutableClock,
};

pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 21, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub struct Harness {
    pub products: Arc<InMemoryProductRepository>,
    pub clock: Arc<MutableClock>,
    pub state: HttpState,
}

impl Harness {
    pub fn new(
        products: InMemoryProductRepository,
        content: InMemoryStorefrontContentRepository,
    ) -> Self {
        let products = Arc::new(products);
        let clock = Arc::new(MutableClock::new(fixture_now()));
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        let catalogue = Arc::new(ProductCatalogueService::new(
            Arc::clone(&products),
            Arc::clone(&dyn_clock),
        ));
        let storefront = Arc::new(StorefrontHomeService::new(Arc::new(content), dyn_clock));
        Self {
            products,
            clock,
            state: HttpState::new(catalogue.clone(), catalogue, storefront),
        }
    }
}

/// Initialise the app exactly as the server mounts the API.
macro_rules! init_app {
    ($harness:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($harness.state.clone()))
                .wrap(storefront::Trace)
                .service(
                    actix_web::web::scope("/api/v1")
                        .configure(storefront::inbound::http::configure_api),
                ),
        )
        .await
    };
}

pub struct Captured {
    pub status: u16,
    pub trace_id: Option<String>,
    pub location: Option<String>,
    pub body: Value,
}

pub async fn send<S, R, B>(app: &S, request: R) -> Captured
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request).await;
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    let status = response.status().as_u16();
    let trace_id = header("trace-id");
    let location = header("location");
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    Captured {
        status,
        trace_id,
        location,
        body,
    }
}
