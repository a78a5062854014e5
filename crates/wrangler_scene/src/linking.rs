//! Light linking collections.
//!
//! A light can carry two collections: receivers (objects lit by it) and
//! blockers (objects casting its shadows). Each member is either included or
//! excluded.

use serde::{Deserialize, Serialize};

use crate::object::ObjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkState {
    Include,
    Exclude,
}

/// Which of the two linking collections is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRole {
    Receiver,
    Blocker,
}

impl LinkRole {
    #[must_use]
    pub fn collection_name(self, light_name: &str) -> String {
        match self {
            Self::Receiver => format!("Light Linking for {light_name}"),
            Self::Blocker => format!("Shadow Linking for {light_name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkMember {
    pub object: ObjectId,
    pub state: LinkState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCollection {
    pub name: String,
    pub members: Vec<LinkMember>,
}

impl LinkCollection {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn state_of(&self, object: ObjectId) -> Option<LinkState> {
        self.members
            .iter()
            .find(|m| m.object == object)
            .map(|m| m.state)
    }

    pub fn set(&mut self, object: ObjectId, state: LinkState) {
        match self.members.iter_mut().find(|m| m.object == object) {
            Some(member) => member.state = state,
            None => self.members.push(LinkMember { object, state }),
        }
    }

    pub fn remove(&mut self, object: ObjectId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.object != object);
        self.members.len() != before
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Both linking collections of one light.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightLinking {
    pub receivers: Option<LinkCollection>,
    pub blockers: Option<LinkCollection>,
}

impl LightLinking {
    #[must_use]
    pub fn collection(&self, role: LinkRole) -> Option<&LinkCollection> {
        match role {
            LinkRole::Receiver => self.receivers.as_ref(),
            LinkRole::Blocker => self.blockers.as_ref(),
        }
    }

    pub fn collection_mut(&mut self, role: LinkRole) -> &mut Option<LinkCollection> {
        match role {
            LinkRole::Receiver => &mut self.receivers,
            LinkRole::Blocker => &mut self.blockers,
        }
    }

    /// Returns the collection for `role`, creating it when missing.
    pub fn ensure(&mut self, role: LinkRole, light_name: &str) -> &mut LinkCollection {
        self.collection_mut(role)
            .get_or_insert_with(|| LinkCollection::new(role.collection_name(light_name)))
    }
}
