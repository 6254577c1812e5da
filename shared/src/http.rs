//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Response};
use serde::Serialize;
use serde_json::json;

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(
    status: u16,
    data: &T,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(data)?))?)
}

/// Create an error response `{"error": <message>}` with the given status.
pub fn error_response(
    status: u16,
    message: &str,
) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &json!({ "error": message }))
}

/// Create a 405 response with an empty body.
pub fn method_not_allowed() -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder().status(405).body(Body::Empty)?)
}

/// Create a 405 response carrying an `Allow` header and a plain-text body
/// naming the rejected method.
pub fn method_not_allowed_with_hint(
    allow: &str,
    method: &str,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(405)
        .header("allow", allow)
        .header("content-type", "text/plain")
        .body(Body::from(format!("Method {} Not Allowed", method)))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_body() {
        let resp = error_response(500, "List failed").unwrap();
        assert_eq!(resp.status(), 500);
        let body = std::str::from_utf8(resp.body().as_ref()).unwrap();
        assert_eq!(body, r#"{"error":"List failed"}"#);
    }

    #[test]
    fn test_method_not_allowed_hint() {
        let resp = method_not_allowed_with_hint("GET, POST", "PUT").unwrap();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["allow"], "GET, POST");
        let body = std::str::from_utf8(resp.body().as_ref()).unwrap();
        assert_eq!(body, "Method PUT Not Allowed");
    }

    #[test]
    fn test_method_not_allowed_empty_body() {
        let resp = method_not_allowed().unwrap();
        assert_eq!(resp.status(), 405);
        assert!(matches!(resp.body(), Body::Empty));
    }
}
