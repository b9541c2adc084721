//! Domain records for the user API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Every field is optional so the same struct serves as the full record and
//! as its partial update; `None` fields are left off the wire, which keeps
//! `PUT` bodies and fetched patches from clobbering unrelated attributes.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attributes::AttributeStore;
use crate::events::Eventing;
use crate::http::HttpTransport;
use crate::model::Model;
use crate::record::Record;
use crate::sync::ApiSync;

/// Attributes of a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl Record for UserProps {
    type Patch = UserProps;

    fn merge(&mut self, patch: Self::Patch) {
        if let Some(id) = patch.id {
            self.id = Some(id);
        }
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
    }

    fn id(&self) -> Option<Value> {
        self.id.map(Value::from)
    }
}

/// A user model wired to the default collaborators.
pub type UserModel<H> = Model<UserProps, AttributeStore<UserProps>, Eventing, ApiSync<H>>;

/// Build a user model synchronized against `{root_url}/{id}`.
pub fn build_user<H: HttpTransport>(props: UserProps, root_url: &str, transport: H) -> UserModel<H> {
    Model::new(
        AttributeStore::new(props),
        Eventing::new(),
        ApiSync::new(root_url, transport),
    )
}
