use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures::future::{ok, Ready};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiKeyMiddleware {
    api_key: Arc<String>,
}

impl ApiKeyMiddleware {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key: Arc::new(api_key),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type Transform = ApiKeyMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ApiKeyMiddlewareService {
            service: Arc::new(service),
            api_key: self.api_key.clone(),
        })
    }
}

pub struct ApiKeyMiddlewareService<S> {
    service: Arc<S>,
    api_key: Arc<String>,
}

#[derive(Debug)]
enum ApiKeyError {
    InvalidKey,
    InvalidHeaderFormat,
}

impl ApiKeyError {
    fn log_message(&self, path: &str) -> String {
        match self {
            ApiKeyError::InvalidKey => format!("Invalid API key attempt for path: {}", path),
            ApiKeyError::InvalidHeaderFormat => {
                format!("Non-UTF-8 X-API-Key header for path: {}", path)
            }
        }
    }

    fn client_error_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": "invalid_api_key",
            "message": "Invalid API key provided"
        })
    }
}

/// A request with no X-API-Key header passes; only a present-but-wrong key is
/// rejected.
fn validate_request_key(req: &ServiceRequest, api_key: &str) -> Result<(), ApiKeyError> {
    let Some(header) = req.headers().get("X-API-Key") else {
        return Ok(());
    };

    let provided = header
        .to_str()
        .map_err(|_| ApiKeyError::InvalidHeaderFormat)?;
    if provided == api_key {
        Ok(())
    } else {
        Err(ApiKeyError::InvalidKey)
    }
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let api_key = self.api_key.clone();

        Box::pin(async move {
            let path_str = req.path().to_string();

            if path_str == "/" || path_str == "/health" {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            match validate_request_key(&req, &api_key) {
                Ok(()) => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(auth_error) => {
                    log::warn!("{}", auth_error.log_message(&path_str));

                    let (http_req, _payload) = req.into_parts();
                    let response = HttpResponse::Unauthorized()
                        .json(auth_error.client_error_json())
                        .map_into_right_body();
                    Ok(ServiceResponse::new(http_req, response))
                }
            }
        })
    }
}
