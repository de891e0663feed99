/// Media type negotiation
use axum::{
    extract::Request,
    http::{header, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::Response,
};

pub const JSON: &str = "application/json";
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// Lowercased `type/subtype` of a media type, parameters stripped
fn essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Quality of a media range, 1.0 if absent or unparsable
fn quality(range: &str) -> f32 {
    range
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .and_then(|(_, value)| value.trim().parse::<f32>().ok())
        .unwrap_or(1.0)
}

/// Check whether the `Content-Type` of a request is `expected`
///
/// Parameters such as `charset` and the letter case are ignored. A missing
/// header never matches.
pub fn has_content_type(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| essence(value) == expected)
}

/// Check whether the `Accept` header admits a JSON response
///
/// A missing or blank header admits anything.
pub fn accepts_json(headers: &HeaderMap) -> bool {
    let ranges: Vec<&str> = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|range| !range.is_empty())
        .collect();
    if ranges.is_empty() {
        return true;
    }

    ranges
        .into_iter()
        .filter(|range| quality(range) > 0.0)
        .any(|range| {
            let range = essence(range);
            range == "*/*" || range == "application/*" || range == JSON || range.ends_with("+json")
        })
}

/// Reject requests that cannot take a JSON response with 406
///
/// `OPTIONS` carries no representation and is exempt.
pub async fn require_json_accept(request: Request, next: Next) -> Result<Response, StatusCode> {
    if request.method() != Method::OPTIONS && !accepts_json(request.headers()) {
        tracing::info!(
            method = %request.method(),
            path = %request.uri().path(),
            "Request does not accept JSON"
        );
        return Err(StatusCode::NOT_ACCEPTABLE);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with(name: header::HeaderName, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn content_type_ignores_parameters_and_case() {
        assert!(has_content_type(
            &with(header::CONTENT_TYPE, "Application/JSON; charset=utf-8"),
            JSON
        ));
        assert!(has_content_type(
            &with(header::CONTENT_TYPE, "application/merge-patch+json"),
            MERGE_PATCH_JSON
        ));
        assert!(!has_content_type(
            &with(header::CONTENT_TYPE, "application/json"),
            MERGE_PATCH_JSON
        ));
        assert!(!has_content_type(&HeaderMap::new(), JSON));
    }

    #[test]
    fn accept_admits_json_ranges() {
        assert!(accepts_json(&HeaderMap::new()));
        for accepted in [
            "*/*",
            "application/*",
            "application/json",
            "application/json; charset=utf-8",
            "application/problem+json",
            "text/html, application/json;q=0.5",
        ] {
            assert!(accepts_json(&with(header::ACCEPT, accepted)), "{accepted}");
        }
    }

    #[test]
    fn accept_rejects_non_json_ranges() {
        for rejected in ["text/html", "application/xml", "image/*", "application/json;q=0"] {
            assert!(!accepts_json(&with(header::ACCEPT, rejected)), "{rejected}");
        }
    }
}
