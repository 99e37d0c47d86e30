//! Gateway abstraction over the remote resource API.
//!
//! The [`Gateway`] trait decouples slice orchestration from the transport.
//! [`crate::io::http::HttpGateway`] talks HTTP; tests use a scripted gateway
//! that records requests and replays canned responses.

use std::fmt;
use std::future::Future;

use serde_json::Value;

use crate::core::entity::{Entity, EntityId};
use crate::core::ordering::SortDirective;
use crate::io::error::TransportError;

const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// One verb against one resource path.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub method: Method,
    /// Absolute path below the API origin, e.g. `/api/expenses/7`.
    pub path: String,
    /// Query parameters in transmission order.
    pub query: Vec<(String, String)>,
    /// Sanitized JSON body for writes.
    pub body: Option<Value>,
}

impl GatewayRequest {
    /// `GET <base>?sort=<directive>&cacheBuster=<epoch-ms>`; `sort` omitted
    /// when absent and otherwise sent exactly as the caller wrote it.
    pub fn list<T: Entity>(sort: Option<&SortDirective>, cache_buster: i64) -> Self {
        let mut query = Vec::with_capacity(2);
        if let Some(sort) = sort {
            query.push(("sort".to_string(), sort.as_str().to_string()));
        }
        query.push(("cacheBuster".to_string(), cache_buster.to_string()));
        Self {
            method: Method::Get,
            path: collection_path::<T>(),
            query,
            body: None,
        }
    }

    pub fn get<T: Entity>(id: &EntityId) -> Self {
        Self::without_body(Method::Get, record_path::<T>(id))
    }

    pub fn create<T: Entity>(body: Value) -> Self {
        Self::with_body(Method::Post, collection_path::<T>(), body)
    }

    pub fn update<T: Entity>(id: &EntityId, body: Value) -> Self {
        Self::with_body(Method::Put, record_path::<T>(id), body)
    }

    pub fn partial_update<T: Entity>(id: &EntityId, body: Value) -> Self {
        Self::with_body(Method::Patch, record_path::<T>(id), body)
    }

    pub fn delete<T: Entity>(id: &EntityId) -> Self {
        Self::without_body(Method::Delete, record_path::<T>(id))
    }

    fn without_body(method: Method, path: String) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    fn with_body(method: Method, path: String, body: Value) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Value of the first query parameter named `key`.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// `/api/<plural-kebab-name>`.
pub fn collection_path<T: Entity>() -> String {
    format!("{API_PREFIX}/{}", T::COLLECTION)
}

/// `/api/<collection>/<id>` with the id percent-encoded as one path segment.
pub fn record_path<T: Entity>(id: &EntityId) -> String {
    let segment = id.to_string();
    format!("{}/{}", collection_path::<T>(), urlencoding::encode(&segment))
}

/// Abstraction over the remote resource API.
///
/// Returned futures must be `Send` because dependent refetches run on spawned
/// tasks.
pub trait Gateway: Send + Sync + 'static {
    /// Perform `request`. Any non-2xx response is an `Err`; a 2xx response
    /// with no body resolves to `Value::Null`.
    fn send(
        &self,
        request: GatewayRequest,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}
