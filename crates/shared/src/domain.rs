use std::fmt;

use serde::{Deserialize, Serialize};

/// Team identifier as the backend sends it: numeric ids and string ids
/// (e.g. UUIDs) both occur.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamId::Number(id) => write!(f, "{id}"),
            TeamId::Text(id) => f.write_str(id),
        }
    }
}

/// Profile fields a user must fill in before their profile is considered complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Username,
    Interests,
    Bio,
    GithubHandle,
}

impl RequiredField {
    pub const ALL: [RequiredField; 5] = [
        RequiredField::Name,
        RequiredField::Username,
        RequiredField::Interests,
        RequiredField::Bio,
        RequiredField::GithubHandle,
    ];
}
