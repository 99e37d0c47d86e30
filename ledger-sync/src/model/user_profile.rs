use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, EntityId};
use crate::model::Group;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Group>>,
}

impl Entity for UserProfile {
    const NAME: &'static str = "userProfile";
    const COLLECTION: &'static str = "user-profiles";

    fn id(&self) -> Option<EntityId> {
        self.id.map(EntityId::from)
    }
}
