use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use snipstore_common::{MAX_EXPIRES_IN_SECS, ValidationError};
use snipstore_snippets::{NewSnippet, RequestContext, Snippet};

use crate::app::AppState;
use crate::error::ApiError;

//
// POST /snippets
//
pub async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(new): Json<NewSnippet>,
) -> Result<Json<Snippet>, ApiError> {
    validate(&new)?;
    let snippet = state.service.create(&ctx, new)?;
    Ok(Json(snippet))
}

//
// GET /snippets/:name
//
pub async fn get(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(name): Path<String>,
) -> Result<Json<Snippet>, ApiError> {
    let snippet = state.service.get(&ctx, &name)?;
    Ok(Json(snippet))
}

//
// POST /snippets/:name/like
//
pub async fn like(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(name): Path<String>,
) -> Result<Json<Snippet>, ApiError> {
    let snippet = state.service.like(&ctx, &name)?;
    Ok(Json(snippet))
}

//
// GET /health — 204 enquanto atende, 503 durante o shutdown
//
pub async fn health(State(state): State<AppState>) -> StatusCode {
    if state.is_healthy() {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

fn validate(new: &NewSnippet) -> Result<(), ValidationError> {
    if new.name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if new.expires_in > MAX_EXPIRES_IN_SECS {
        return Err(ValidationError::ExpiresInTooLarge {
            got: new.expires_in,
            max: MAX_EXPIRES_IN_SECS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_snippet(name: &str, expires_in: u64) -> NewSnippet {
        NewSnippet {
            name: name.into(),
            snippet: "hi".into(),
            expires_in,
        }
    }

    #[test]
    fn validate_rejects_empty_name() {
        assert!(matches!(
            validate(&new_snippet("", 10)),
            Err(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn validate_caps_expires_in() {
        assert!(validate(&new_snippet("a", MAX_EXPIRES_IN_SECS)).is_ok());
        assert!(matches!(
            validate(&new_snippet("a", MAX_EXPIRES_IN_SECS + 1)),
            Err(ValidationError::ExpiresInTooLarge { .. })
        ));
    }
}
