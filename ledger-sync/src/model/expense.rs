use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, EntityId};
use crate::model::{Group, UserProfile};

/// An amount paid by a user within a group.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Decimal amount, transmitted as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
}

impl Entity for Expense {
    const NAME: &'static str = "expense";
    const COLLECTION: &'static str = "expenses";

    fn id(&self) -> Option<EntityId> {
        self.id.map(EntityId::from)
    }
}
