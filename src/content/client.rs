//! HTTP client for the headless content API
//!
//! Talks to the repository's `documents/search` endpoint: documents are
//! selected with bracketed `at(...)` predicates and sorted with an
//! `orderings` list, exactly the surface the resolver's neighbor
//! queries are written against.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::config::{ApiConfig, TieBreak};
use crate::content::post::Post;
use crate::content::store::{ContentError, ContentStore, Order, Query, QueryResponse};

/// Client for the content repository's search endpoint
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// Build a client from the site's API configuration. Fails when no
    /// endpoint is configured rather than producing a client that can
    /// only error on use.
    pub fn new(config: &ApiConfig) -> Result<Self, ContentError> {
        if config.endpoint.is_empty() {
            return Err(ContentError::Unconfigured);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn search_url(&self, params: &[(&str, String)]) -> String {
        let mut url = format!("{}/documents/search", self.endpoint);
        let mut sep = '?';
        for (key, value) in params {
            url.push(sep);
            url.push_str(key);
            url.push('=');
            url.push_str(&encode_param(value));
            sep = '&';
        }
        if let Some(token) = &self.access_token {
            url.push(sep);
            url.push_str("access_token=");
            url.push_str(&encode_param(token));
        }
        url
    }

    async fn fetch(&self, url: &str) -> Result<QueryResponse, ContentError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ContentError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<QueryResponse>().await?)
    }
}

#[async_trait]
impl ContentStore for ApiClient {
    async fn get_by_uid(&self, content_type: &str, uid: &str) -> Result<Post, ContentError> {
        let q = predicate_uid(content_type, uid);
        tracing::debug!("content lookup: {}", q);

        let url = self.search_url(&[("q", q), ("pageSize", "1".to_string())]);
        let response = self.fetch(&url).await?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ContentError::NotFound(uid.to_string()))
    }

    async fn query(&self, query: &Query) -> Result<QueryResponse, ContentError> {
        let q = predicate_type(&query.content_type);
        tracing::debug!("content query: {} page {}", q, query.page);

        let mut params = vec![
            ("q", q),
            (
                "orderings",
                orderings(&query.content_type, query.order, query.tie_break),
            ),
            ("pageSize", query.page_size.to_string()),
            ("page", query.page.to_string()),
        ];
        if let Some(after) = &query.after {
            params.push(("after", after.clone()));
        }

        let url = self.search_url(&params);
        self.fetch(&url).await
    }
}

/// Predicate selecting all documents of a type
fn predicate_type(content_type: &str) -> String {
    format!("[[at(document.type,\"{}\")]]", content_type)
}

/// Predicate selecting the document with a given uid
fn predicate_uid(content_type: &str, uid: &str) -> String {
    format!("[[at(my.{}.uid,\"{}\")]]", content_type, uid)
}

/// Orderings list for a query: first publication time, with the
/// configured tie-break key appended ascending
fn orderings(content_type: &str, order: Order, tie_break: TieBreak) -> String {
    let primary = match order {
        Order::PublicationAsc => "document.first_publication_date".to_string(),
        Order::PublicationDesc => "document.first_publication_date desc".to_string(),
    };
    match tie_break {
        TieBreak::None => format!("[{}]", primary),
        TieBreak::Uid => format!("[{},my.{}.uid]", primary, content_type),
        TieBreak::Id => format!("[{},document.id]", primary),
    }
}

fn encode_param(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(token: Option<&str>) -> ApiClient {
        let config = ApiConfig {
            endpoint: "https://myrepo.cdn.example.io/api/v2".to_string(),
            access_token: token.map(String::from),
            ..ApiConfig::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_new_requires_endpoint() {
        let result = ApiClient::new(&ApiConfig::default());
        assert!(matches!(result, Err(ContentError::Unconfigured)));
    }

    #[test]
    fn test_search_url_encodes_params() {
        let client = test_client(None);
        let url = client.search_url(&[
            ("q", predicate_uid("posts", "meu-post")),
            ("pageSize", "1".to_string()),
        ]);
        assert!(url.starts_with("https://myrepo.cdn.example.io/api/v2/documents/search?q="));
        // brackets and quotes are percent-encoded
        assert!(url.contains("%5B%5Bat%28my%2Eposts%2Euid%2C%22meu%2Dpost%22%29%5D%5D"));
        assert!(url.ends_with("&pageSize=1"));
    }

    #[test]
    fn test_search_url_appends_access_token() {
        let client = test_client(Some("s3cret"));
        let url = client.search_url(&[("pageSize", "1".to_string())]);
        assert!(url.ends_with("&access_token=s3cret"));
    }

    #[test]
    fn test_orderings() {
        assert_eq!(
            orderings("posts", Order::PublicationAsc, TieBreak::None),
            "[document.first_publication_date]"
        );
        assert_eq!(
            orderings("posts", Order::PublicationDesc, TieBreak::None),
            "[document.first_publication_date desc]"
        );
        assert_eq!(
            orderings("posts", Order::PublicationDesc, TieBreak::Uid),
            "[document.first_publication_date desc,my.posts.uid]"
        );
        assert_eq!(
            orderings("posts", Order::PublicationAsc, TieBreak::Id),
            "[document.first_publication_date,document.id]"
        );
    }

    #[test]
    fn test_predicates() {
        assert_eq!(
            predicate_type("posts"),
            "[[at(document.type,\"posts\")]]"
        );
        assert_eq!(
            predicate_uid("posts", "como-viajar"),
            "[[at(my.posts.uid,\"como-viajar\")]]"
        );
    }
}
