//! REST Data Source
//!
//! PostgREST-style access to the hosted `items` and `favorites` tables.
//! Requests are described as plain values first, then executed with reqwest.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::CatalogSource;
use crate::config::AppConfig;
use crate::error::{SourceError, SourceResult};
use crate::models::{ClientId, Favorite, Item, ItemId};
use crate::query::{ilike_pattern, ItemQuery};

const ITEMS_TABLE: &str = "items";
const FAVORITES_TABLE: &str = "favorites";

// ========================
// Request Descriptions
// ========================

/// One call against a table, before any I/O
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: Method,
    pub table: &'static str,
    pub params: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub prefer: Option<&'static str>,
}

impl RestRequest {
    fn new(method: Method, table: &'static str) -> Self {
        Self {
            method,
            table,
            params: Vec::new(),
            body: None,
            prefer: None,
        }
    }

    fn param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.push((name.to_string(), value.into()));
        self
    }

    /// Value of the first query parameter called `name`
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn list_items(query: &ItemQuery) -> Self {
        let mut request = Self::new(Method::GET, ITEMS_TABLE).param("select", "*");
        if let Some(text) = &query.title_contains {
            request = request.param("title", format!("ilike.{}", ilike_pattern(text)));
        }
        request
            .param(
                "order",
                format!("{}.{}", query.sort_field.as_str(), query.sort_order.as_str()),
            )
            .param("offset", query.range.start.to_string())
            .param("limit", query.range.len().to_string())
    }

    pub fn list_favorites(client: &ClientId) -> Self {
        Self::new(Method::GET, FAVORITES_TABLE)
            .param("select", "item_id,client_id")
            .param("client_id", format!("eq.{}", client))
    }

    pub fn insert_favorite(favorite: &Favorite) -> Self {
        let mut request = Self::new(Method::POST, FAVORITES_TABLE);
        request.body = Some(json!([{
            "item_id": favorite.item_id,
            "client_id": favorite.client_id,
        }]));
        request.prefer = Some("return=minimal");
        request
    }

    pub fn delete_favorite(client: &ClientId, item: ItemId) -> Self {
        Self::new(Method::DELETE, FAVORITES_TABLE)
            .param("item_id", format!("eq.{}", item))
            .param("client_id", format!("eq.{}", client))
    }
}

// ========================
// HTTP Execution
// ========================

#[derive(Debug, Clone)]
pub struct RestSource {
    http: reqwest::Client,
    config: Arc<AppConfig>,
}

impl RestSource {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.service_url(), table)
    }

    /// Send a request and return the body of a 2xx response
    async fn execute(&self, request: RestRequest) -> SourceResult<String> {
        log::debug!(
            "[REST] {} {} {:?}",
            request.method,
            request.table,
            request.params
        );

        let key = self.config.service_key();
        let mut builder = self
            .http
            .request(request.method, self.table_url(request.table))
            .query(&request.params)
            .header("apikey", key)
            .header(AUTHORIZATION, format!("Bearer {}", key));
        if let Some(prefer) = request.prefer {
            builder = builder.header("Prefer", prefer);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, request: RestRequest) -> SourceResult<Vec<T>> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait(?Send)]
impl CatalogSource for RestSource {
    async fn list_items(&self, query: &ItemQuery) -> SourceResult<Vec<Item>> {
        self.fetch_rows(RestRequest::list_items(query)).await
    }

    async fn list_favorites(&self, client: &ClientId) -> SourceResult<Vec<Favorite>> {
        self.fetch_rows(RestRequest::list_favorites(client)).await
    }

    async fn add_favorite(&self, favorite: &Favorite) -> SourceResult<()> {
        self.execute(RestRequest::insert_favorite(favorite)).await?;
        Ok(())
    }

    async fn remove_favorite(&self, client: &ClientId, item: ItemId) -> SourceResult<()> {
        self.execute(RestRequest::delete_favorite(client, item)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryKey, SortField, SortOrder, PAGE_SIZE};

    fn query_for(search: &str, sort_field: SortField, sort_order: SortOrder, page: u32) -> ItemQuery {
        let key = QueryKey {
            search: search.to_string(),
            sort_field,
            sort_order,
            page,
        };
        ItemQuery::from_key(&key, PAGE_SIZE)
    }

    #[test]
    fn test_lamp_items_request() {
        let request = RestRequest::list_items(&query_for(
            "lamp",
            SortField::Rating,
            SortOrder::Descending,
            1,
        ));

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.table, "items");
        assert_eq!(request.param_value("select"), Some("*"));
        assert_eq!(request.param_value("title"), Some("ilike.%lamp%"));
        assert_eq!(request.param_value("order"), Some("rating.desc"));
        assert_eq!(request.param_value("offset"), Some("0"));
        assert_eq!(request.param_value("limit"), Some("11"));
    }

    #[test]
    fn test_unfiltered_items_request() {
        let request = RestRequest::list_items(&query_for("", SortField::Title, SortOrder::Ascending, 3));

        assert_eq!(request.param_value("title"), None);
        assert_eq!(request.param_value("order"), Some("title.asc"));
        assert_eq!(request.param_value("offset"), Some("20"));
        assert_eq!(request.param_value("limit"), Some("11"));
    }

    #[test]
    fn test_favorites_requests() {
        let client = ClientId::new("client-1");

        let read = RestRequest::list_favorites(&client);
        assert_eq!(read.method, Method::GET);
        assert_eq!(read.param_value("select"), Some("item_id,client_id"));
        assert_eq!(read.param_value("client_id"), Some("eq.client-1"));

        let insert = RestRequest::insert_favorite(&Favorite::new(client.clone(), ItemId(42)));
        assert_eq!(insert.method, Method::POST);
        assert_eq!(insert.table, "favorites");
        assert_eq!(
            insert.body,
            Some(json!([{"item_id": 42, "client_id": "client-1"}]))
        );
        assert_eq!(insert.prefer, Some("return=minimal"));

        let delete = RestRequest::delete_favorite(&client, ItemId(42));
        assert_eq!(delete.method, Method::DELETE);
        assert_eq!(delete.param_value("item_id"), Some("eq.42"));
        assert_eq!(delete.param_value("client_id"), Some("eq.client-1"));
        assert!(delete.body.is_none());
    }

    #[test]
    fn test_table_url_joins_endpoint() {
        let config = AppConfig::new("https://demo.example.co/", "key", "client").unwrap();
        let source = RestSource::new(Arc::new(config));
        assert_eq!(
            source.table_url("items"),
            "https://demo.example.co/rest/v1/items"
        );
    }
}
