//! Generic resource operations.
//!
//! Every admin screen is the same five calls over a different resource
//! name; this module is that shape. The client stays ignorant of the
//! backend's business schema; callers pick the row type.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

use siradu_core::Result;

use crate::http::{decode, ApiClient, CallOpts, RequestSpec};

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Query parameters for a list call.
///
/// Unset fields are omitted from the query string entirely.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    /// Inclusive range start for history resources (ISO date).
    pub start_date: Option<String>,
    /// Inclusive range end for history resources (ISO date).
    pub end_date: Option<String>,
}

impl ListQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize".to_string(), page_size.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy".to_string(), sort_by.clone()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push(("sortOrder".to_string(), sort_order.to_string()));
        }
        if let Some(start_date) = &self.start_date {
            pairs.push(("startDate".to_string(), start_date.clone()));
        }
        if let Some(end_date) = &self.end_date {
            pairs.push(("endDate".to_string(), end_date.clone()));
        }
        pairs
    }
}

/// One page of a listed resource.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl ApiClient {
    /// List a page of a resource.
    pub async fn list<T>(&self, resource: &str, query: &ListQuery) -> Result<Page<T>>
    where
        T: DeserializeOwned,
    {
        self.list_with_opts(resource, query, CallOpts::default())
            .await
    }

    /// List a page of a resource with explicit presentation flags.
    ///
    /// History screens fetch silently; everything else notifies.
    pub async fn list_with_opts<T>(
        &self,
        resource: &str,
        query: &ListQuery,
        opts: CallOpts,
    ) -> Result<Page<T>>
    where
        T: DeserializeOwned,
    {
        let spec = RequestSpec::get(format!("/{}", resource))
            .query_pairs(query.to_pairs())
            .opts(opts);
        decode(self.request(spec).await?)
    }

    /// Fetch a single resource row by id.
    pub async fn detail<T>(&self, resource: &str, id: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self
            .request(RequestSpec::get(format!("/{}/{}", resource, id)))
            .await?;
        decode(value)
    }

    /// Create a resource row.
    pub async fn create<B, T>(&self, resource: &str, body: &B, opts: CallOpts) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.post(&format!("/{}", resource), body, opts).await
    }

    /// Update a resource row by id.
    pub async fn update<B, T>(&self, resource: &str, id: &str, body: &B, opts: CallOpts) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.put(&format!("/{}/{}", resource, id), body, opts).await
    }

    /// Delete a resource row by id.
    pub async fn remove(&self, resource: &str, id: &str, opts: CallOpts) -> Result<Value> {
        self.delete(&format!("/{}/{}", resource, id), opts).await
    }
}
