//! Application-root store owning one slice per entity type.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::io::config::SyncConfig;
use crate::io::gateway::Gateway;
use crate::io::http::HttpGateway;
use crate::model::{Expense, Group, UserProfile};
use crate::slice::EntitySlice;

/// Holds the expense, group and user-profile slices over one shared gateway.
///
/// Created once by the application root and handed to consumers; slices are
/// cheap to clone out of it.
#[derive(Debug)]
pub struct Store<G: Gateway> {
    expenses: EntitySlice<Expense, G>,
    groups: EntitySlice<Group, G>,
    user_profiles: EntitySlice<UserProfile, G>,
}

impl<G: Gateway> Clone for Store<G> {
    fn clone(&self) -> Self {
        Self {
            expenses: self.expenses.clone(),
            groups: self.groups.clone(),
            user_profiles: self.user_profiles.clone(),
        }
    }
}

impl<G: Gateway> Store<G> {
    pub fn new(gateway: G) -> Self {
        let gateway = Arc::new(gateway);
        Self {
            expenses: EntitySlice::new(Arc::clone(&gateway)),
            groups: EntitySlice::new(Arc::clone(&gateway)),
            user_profiles: EntitySlice::new(gateway),
        }
    }

    pub fn expenses(&self) -> &EntitySlice<Expense, G> {
        &self.expenses
    }

    pub fn groups(&self) -> &EntitySlice<Group, G> {
        &self.groups
    }

    pub fn user_profiles(&self) -> &EntitySlice<UserProfile, G> {
        &self.user_profiles
    }

    /// Await outstanding dependent refetches of every slice.
    pub async fn settle_dependents(&self) {
        self.expenses.settle_dependents().await;
        self.groups.settle_dependents().await;
        self.user_profiles.settle_dependents().await;
    }

    /// Return every slice to its initial state.
    pub fn reset(&self) {
        self.expenses.reset();
        self.groups.reset();
        self.user_profiles.reset();
    }
}

impl Store<HttpGateway> {
    /// Build a store backed by the HTTP API described in `config`.
    pub fn connect(config: &SyncConfig) -> Result<Self> {
        let gateway = HttpGateway::new(config)?;
        info!(base_url = gateway.base_url(), "store connected");
        Ok(Self::new(gateway))
    }
}
