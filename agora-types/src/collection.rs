//! The fixed set of remote collections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A remote collection (table) the synchronizer can operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Publications,
    Events,
    Categories,
    Teams,
    EventTypes,
    Media,
    Participants,
    Messages,
    SupportInfo,
    AdminLogs,
}

impl Collection {
    /// The remote table name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Publications => "publications",
            Collection::Events => "events",
            Collection::Categories => "categories",
            Collection::Teams => "teams",
            Collection::EventTypes => "event_types",
            Collection::Media => "media",
            Collection::Participants => "participants",
            Collection::Messages => "messages",
            Collection::SupportInfo => "support_info",
            Collection::AdminLogs => "admin_logs",
        }
    }

    /// All collections, in the order the admin console loads them.
    #[must_use]
    pub fn all() -> [Collection; 10] {
        [
            Collection::Publications,
            Collection::Events,
            Collection::Categories,
            Collection::Teams,
            Collection::EventTypes,
            Collection::Media,
            Collection::Participants,
            Collection::Messages,
            Collection::SupportInfo,
            Collection::AdminLogs,
        ]
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::all()
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownCollection(s.to_string()))
    }
}
