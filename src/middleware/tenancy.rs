// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

use crate::common::error::ApiError;

// O gateway do backend gerenciado autentica o usuário e repassa o ID aqui
const TENANT_ID_HEADER: &str = "x-tenant-id";

/// Inquilino (quem aluga) que está fazendo a requisição.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

fn bad_request(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        error: message.to_string(),
        details: None,
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(TENANT_ID_HEADER)
            .ok_or_else(|| bad_request("The X-Tenant-ID header is required."))?;

        let value_str = value
            .to_str()
            .map_err(|_| bad_request("The X-Tenant-ID header contains invalid characters."))?;

        let tenant_id = Uuid::parse_str(value_str)
            .map_err(|_| bad_request("The X-Tenant-ID header is not a valid UUID."))?;

        Ok(TenantContext(tenant_id))
    }
}
