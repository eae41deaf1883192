use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use tracing::{Instrument, info_span};

use snipstore_snippets::RequestContext;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Anexa um `RequestContext` à requisição e devolve o id no header.
///
/// O id vem do header `X-Request-ID` ou, na falta dele, do relógio em
/// nanossegundos. O token do contexto é cancelado quando o future da
/// requisição é descartado (cliente desconectou).
pub async fn request_context(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(next_request_id);

    let ctx = RequestContext::new(request_id.clone());
    let _cancel_on_drop = ctx.cancellation_token().clone().drop_guard();
    req.extensions_mut().insert(ctx);

    let span = info_span!("request", id = %request_id);
    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn next_request_id() -> String {
    Utc::now().timestamp_nanos_opt().unwrap_or_default().to_string()
}
