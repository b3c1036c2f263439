use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::shared::errors::AppError;

const USER_ID_HEADER: &str = "x-user-id";

/// Identity established by the upstream auth proxy, carried in the
/// `X-User-Id` header. This service trusts the header; verifying it is
/// the proxy's job.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Like [`AuthUser`] but anonymous requests pass with `None`.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<Uuid>);

fn user_id_from_parts(parts: &Parts) -> Result<Option<Uuid>, AppError> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let text = value
        .to_str()
        .map_err(|_| AppError::InvalidInput("Malformed X-User-Id header".to_string()))?;
    let id = text
        .parse::<Uuid>()
        .map_err(|_| AppError::InvalidInput("X-User-Id must be a UUID".to_string()))?;
    Ok(Some(id))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match user_id_from_parts(parts)? {
            Some(id) => Ok(AuthUser(id)),
            None => Err(AppError::AuthenticationRequired),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(user_id_from_parts(parts)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header("X-User-Id", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn missing_header_is_anonymous() {
        assert!(user_id_from_parts(&parts_with(None)).unwrap().is_none());
    }

    #[test]
    fn valid_uuid_is_extracted() {
        let id = Uuid::new_v4();
        let parsed = user_id_from_parts(&parts_with(Some(&id.to_string()))).unwrap();
        assert_eq!(parsed, Some(id));
    }

    #[test]
    fn garbage_header_is_invalid_input() {
        let err = user_id_from_parts(&parts_with(Some("not-a-uuid"))).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
