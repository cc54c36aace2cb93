use axum::{
    body::Bytes,
    extract::Query,
    http::{HeaderMap, Method, Uri},
};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    routes::params::QueryMap,
};

/// One inbound request as seen by the entity handlers.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments after the URL prefix has been removed.
    pub segments: Vec<String>,
    /// Segment following the entity name, e.g. `7` in `/order/7`.
    pub resource_id: Option<String>,
    pub query: QueryMap,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub user: Option<AuthUser>,
}

impl ApiRequest {
    pub fn from_http(
        url_prefix: &str,
        method: Method,
        uri: &Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> AppResult<Self> {
        let Query(query) = Query::<QueryMap>::try_from_uri(uri)
            .map_err(|err| AppError::BadRequest(format!("Invalid query string: {err}")))?;
        Ok(Self {
            method,
            segments: path_segments(strip_prefix(uri.path(), url_prefix)),
            resource_id: None,
            query,
            headers,
            body,
            user: None,
        })
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Trimmed query value, `None` when absent or blank.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_slice(&self.body)
            .map_err(|err| AppError::BadRequest(format!("Invalid JSON body: {err}")))
    }

    /// Integer id from the path segment, `label` names it in the error.
    pub fn path_id(&self, label: &str) -> AppResult<i32> {
        let raw = self.resource_id.as_deref().unwrap_or_default();
        parse_id(raw, label)
    }

    /// Integer id from the path segment, falling back to the `id` query value.
    pub fn lookup_id(&self, label: &str) -> AppResult<Option<i32>> {
        let raw = self.resource_id.as_deref().or_else(|| self.query("id"));
        raw.map(|raw| parse_id(raw, label)).transpose()
    }

    pub fn user(&self) -> AppResult<&AuthUser> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("user not found in context".into()))
    }
}

pub fn parse_id(raw: &str, label: &str) -> AppResult<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(AppError::BadRequest(format!("Invalid {label}: must be > 0"))),
        Err(err) => Err(AppError::BadRequest(format!("Invalid {label}: {err}"))),
    }
}

fn strip_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return path;
    }
    match path.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

fn path_segments(path: &str) -> Vec<String> {
    path.trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prefix: &str, uri: &str) -> ApiRequest {
        ApiRequest::from_http(
            prefix,
            Method::GET,
            &uri.parse().unwrap(),
            HeaderMap::new(),
            Bytes::new(),
        )
        .unwrap()
    }

    #[test]
    fn strips_prefix_and_splits_segments() {
        let req = request("/gambit", "/gambit/admin/users/abc?page=2");
        assert_eq!(req.segments, vec!["admin", "users", "abc"]);
        assert_eq!(req.query("page"), Some("2"));
    }

    #[test]
    fn percent_encoded_query_values_are_decoded() {
        let req = request("", "/product?search=red%20boot&slug=a%2Fb");
        assert_eq!(req.query("search"), Some("red boot"));
        assert_eq!(req.query("slug"), Some("a/b"));

        let req = request("", "/product?search=blue+hat");
        assert_eq!(req.query("search"), Some("blue hat"));
    }

    #[test]
    fn prefix_must_match_whole_segment() {
        let req = request("/gambit", "/gambitx/category");
        assert_eq!(req.segments, vec!["gambitx", "category"]);

        let req = request("", "/category/");
        assert_eq!(req.segments, vec!["category"]);
    }

    #[test]
    fn empty_path_has_no_segments() {
        assert!(request("/gambit", "/gambit").segments.is_empty());
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("12", "OrderId").unwrap(), 12);
        assert!(parse_id("0", "OrderId").is_err());
        assert!(parse_id("x1", "OrderId").is_err());
        assert!(parse_id("", "OrderId").is_err());
    }

    #[test]
    fn lookup_id_prefers_path_over_query() {
        let mut req = request("", "/product?id=4");
        assert_eq!(req.lookup_id("ProductId").unwrap(), Some(4));
        req.resource_id = Some("9".into());
        assert_eq!(req.lookup_id("ProductId").unwrap(), Some(9));
    }
}
