use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, EntityId};
use crate::model::UserProfile;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Id of the administering user profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<UserProfile>>,
}

impl Entity for Group {
    const NAME: &'static str = "group";
    const COLLECTION: &'static str = "groups";

    fn id(&self) -> Option<EntityId> {
        self.id.map(EntityId::from)
    }
}
