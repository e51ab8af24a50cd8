// src/services/supabase_client.rs
// DOCUMENTATION: Supabase (PostgREST) API client
// PURPOSE: Read-only queries against the hosted places tables

use crate::config::Config;
use crate::errors::FinderError;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{header::HeaderMap, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::time::Duration;

/// Rows requested per page by fetch_all
pub const PAGE_SIZE: u64 = 1000;

/// PostgREST query parameters for one table read
/// DOCUMENTATION: Builder over the filter vocabulary the diagnostics use
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    params: Vec<(String, String)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns to return (PostgREST `select`)
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// `column IS NULL`
    pub fn is_null(mut self, column: &str) -> Self {
        self.params.push((column.to_string(), "is.null".to_string()));
        self
    }

    /// Case-insensitive substring match on `column`
    /// DOCUMENTATION: `substring` is matched literally; see escape_like
    pub fn ilike(mut self, column: &str, substring: &str) -> Self {
        self.params.push((
            column.to_string(),
            format!("ilike.*{}*", escape_like(substring)),
        ));
        self
    }

    /// Order by `column`, nulls last
    pub fn order(mut self, column: &str, descending: bool) -> Self {
        let direction = if descending { "desc" } else { "asc" };
        self.params
            .push(("order".to_string(), format!("{}.{}.nullslast", column, direction)));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Rendered query-string pairs, in insertion order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.params.clone();
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        pairs
    }

    /// Same filters without select/limit/offset, for count requests
    fn filters_only(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter(|(key, _)| key != "select" && key != "order")
            .cloned()
            .collect()
    }
}

/// Supabase REST client
/// DOCUMENTATION: Sends the anon key on every request; throttled by a rate limiter
pub struct SupabaseClient {
    /// HTTP client for making requests
    client: Client,
    /// Base REST URL: {project}/rest/v1
    rest_url: String,
    /// Supabase anon key
    api_key: String,
    limiter: DefaultDirectRateLimiter,
}

impl SupabaseClient {
    /// Create a client for a Supabase project
    /// DOCUMENTATION: `project_url` is the bare project URL, e.g. https://xyz.supabase.co
    pub fn new(
        project_url: &str,
        api_key: &str,
        requests_per_second: u32,
    ) -> Result<Self, FinderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FinderError::Configuration(format!("HTTP client: {}", e)))?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            limiter: RateLimiter::direct(Quota::per_second(rate)),
        })
    }

    /// Client built from SUPABASE_URL / SUPABASE_ANON_KEY / SUPABASE_RATE_LIMIT
    pub fn from_config(config: &Config) -> Result<Self, FinderError> {
        let (url, key) = config.supabase_credentials()?;
        Self::new(url, key, config.supabase_rate_limit)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn send(&self, table: &str, builder: RequestBuilder) -> Result<Response, FinderError> {
        self.limiter.until_ready().await;

        let response = builder.send().await.map_err(|e| {
            log::error!("Supabase request to {} failed: {}", table, e);
            FinderError::ExternalApiError(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        log::error!("Supabase query on {} returned {}: {}", table, status, body);
        Err(FinderError::ExternalApiError(format!("HTTP {} - {}", status, body)))
    }

    /// Fetch rows of `table` matching `query`
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, FinderError> {
        let pairs = query.to_pairs();
        log::debug!("GET {} {:?}", table, pairs);

        let builder = self.authorized(self.client.get(self.table_url(table))).query(&pairs);
        let response = self.send(table, builder).await?;

        response.json::<Vec<T>>().await.map_err(|e| {
            log::error!("Failed to parse rows from {}: {}", table, e);
            FinderError::ExternalApiError(format!("Failed to parse response JSON: {}", e))
        })
    }

    /// Fetch every matching row, paging up to PAGE_SIZE rows at a time
    /// DOCUMENTATION: The server may cap pages below PAGE_SIZE (PostgREST
    /// max-rows), so a short page is not the end; only an empty page is.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, FinderError> {
        let mut rows = Vec::new();
        let mut offset = 0;

        loop {
            let page_query = query.clone().limit(PAGE_SIZE).offset(offset);
            let page: Vec<T> = self.fetch(table, &page_query).await?;
            if page.is_empty() {
                break;
            }
            offset += page.len() as u64;
            rows.extend(page);
        }

        log::debug!("Fetched {} rows from {}", rows.len(), table);
        Ok(rows)
    }

    /// Exact count of rows matching the filters of `query`
    pub async fn count(&self, table: &str, query: &Query) -> Result<u64, FinderError> {
        let pairs = query.filters_only();
        log::debug!("HEAD {} {:?}", table, pairs);

        let builder = self
            .authorized(self.client.head(self.table_url(table)))
            .header("Prefer", "count=exact")
            .query(&pairs);
        let response = self.send(table, builder).await?;

        parse_content_range_total(response.headers()).ok_or_else(|| {
            FinderError::ExternalApiError(format!(
                "Missing or invalid Content-Range on count of {}",
                table
            ))
        })
    }
}

/// Escape LIKE metacharacters so user text matches literally
/// DOCUMENTATION: `\`, `%` and `_` are backslash-escaped. PostgREST rewrites
/// every `*` to `%` before Postgres sees it, so a literal `*` cannot be
/// expressed; it is narrowed to `_` (any single character).
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '%' | '_' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '*' => escaped.push('_'),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Total from a `Content-Range: 0-9/42` or `*/42` header
pub fn parse_content_range_total(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("content-range")?
        .to_str()
        .ok()?
        .rsplit_once('/')?
        .1
        .trim()
        .parse()
        .ok()
}
