//! Test-only helpers: a scripted gateway and deterministic records.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::io::config::{SyncConfig, write_config};
use crate::io::error::TransportError;
use crate::io::gateway::{Gateway, GatewayRequest, Method};
use crate::model::{Expense, Group, UserProfile};

type Response = Result<Value, TransportError>;

/// Gateway that records every request and replays queued responses.
///
/// Responses are queued per `(method, path)`; the query string is ignored when
/// matching. A request with nothing queued fails with a 404 status so missing
/// script entries show up as rejections rather than hangs.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    inner: Arc<Mutex<Script>>,
}

#[derive(Default)]
struct Script {
    responses: HashMap<(Method, String), VecDeque<Response>>,
    requests: Vec<GatewayRequest>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `response` for the next `method` request to `path`.
    pub fn respond(&self, method: Method, path: &str, response: Response) {
        self.script()
            .responses
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.script().requests.clone()
    }

    /// Number of requests received with `method`.
    pub fn count(&self, method: Method) -> usize {
        self.script()
            .requests
            .iter()
            .filter(|request| request.method == method)
            .count()
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Gateway for ScriptedGateway {
    async fn send(&self, request: GatewayRequest) -> Result<Value, TransportError> {
        let response = {
            let mut script = self.script();
            script.requests.push(request.clone());
            script
                .responses
                .get_mut(&(request.method, request.path.clone()))
                .and_then(VecDeque::pop_front)
        };
        // Yield so concurrently dispatched operations interleave like real I/O.
        tokio::task::yield_now().await;
        response.unwrap_or_else(|| Err(TransportError::status(404)))
    }
}

/// Expense with only an id.
pub fn expense(id: i64) -> Expense {
    Expense {
        id: Some(id),
        ..Expense::default()
    }
}

/// Expense with an id and amount.
pub fn expense_with_amount(id: i64, amount: &str) -> Expense {
    Expense {
        amount: Some(amount.to_string()),
        ..expense(id)
    }
}

/// Unsaved expense referencing a user profile and a group by id.
pub fn new_expense(amount: &str, user_id: i64, group_id: i64) -> Expense {
    Expense {
        id: None,
        amount: Some(amount.to_string()),
        user: Some(UserProfile {
            id: Some(user_id),
            ..UserProfile::default()
        }),
        group: Some(Group {
            id: Some(group_id),
            ..Group::default()
        }),
    }
}

/// Group with an id and name.
pub fn group(id: i64, name: &str) -> Group {
    Group {
        id: Some(id),
        name: Some(name.to_string()),
        ..Group::default()
    }
}

/// Write `cfg` to `ledger.toml` in a fresh temp directory.
///
/// The directory lives as long as the returned guard.
pub fn temp_config(cfg: &SyncConfig) -> anyhow::Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ledger.toml");
    write_config(&path, cfg)?;
    Ok((dir, path))
}
