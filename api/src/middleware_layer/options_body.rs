use axum::{
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};

/// Gives a bare `OPTIONS /` (no `Access-Control-Request-Method`) a `{}` body.
///
/// The CORS layer answers every `OPTIONS` itself with an empty 200, so this
/// runs outside it and only fills the body; CORS headers are kept. Real
/// preflights are left untouched.
pub async fn bare_options_body(req: Request<Body>, next: Next) -> Response {
    let bare = req.method() == Method::OPTIONS
        && req.uri().path() == "/"
        && !req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

    let res = next.run(req).await;
    if !bare || res.status() != StatusCode::OK {
        return res;
    }

    let (mut parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    if !bytes.is_empty() {
        return Response::from_parts(parts, Body::from(bytes));
    }

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from("{}"))
}
