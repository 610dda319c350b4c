//! Optional Prometheus middleware.
//!
//! `actix-web-prom` changes the response body type, so the enabled and
//! disabled paths are both boxed to keep a single `App` type.

use actix_service::boxed::{self, BoxService};
use actix_service::{Service, ServiceExt as _, Transform};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::PrometheusMetrics;
use futures_util::future::LocalBoxFuture;

/// Wraps the app in Prometheus middleware when metrics are configured.
#[derive(Clone)]
pub(crate) struct OptionalMetrics(Option<PrometheusMetrics>);

impl OptionalMetrics {
    pub(crate) fn new(metrics: Option<PrometheusMetrics>) -> Self {
        Self(metrics)
    }
}

impl<S, B> Transform<S, ServiceRequest> for OptionalMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let metrics = self.0.clone();
        Box::pin(async move {
            match metrics {
                Some(metrics) => {
                    let wrapped = Compat::new(metrics).new_transform(service).await?;
                    Ok(boxed::service(wrapped))
                }
                None => Ok(boxed::service(
                    service.map(ServiceResponse::map_into_boxed_body),
                )),
            }
        })
    }
}
