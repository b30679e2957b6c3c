use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::{RequiredField, TeamId};

/// Path segment of the profile resource; the request path is
/// `profile/{lowercase username}/`.
pub const PROFILE_RESOURCE: &str = "profile";

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HackathonSummary {
    #[serde(default)]
    pub slug: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl HackathonSummary {
    /// The slug, or the backend `id` when the slug is absent.
    pub fn identifier(&self) -> Option<String> {
        if !self.slug.is_empty() {
            return Some(self.slug.clone());
        }
        match self.details.get("id")? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMembership {
    pub id: TeamId,
    pub hackathon: HackathonSummary,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub github_handle: Option<String>,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<TeamMembership>,
}

fn is_blank(value: Option<&str>) -> bool {
    matches!(value, None | Some(""))
}

impl ProfileRecord {
    pub fn with_username(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// An empty interest list counts as filled in; only a null list is missing.
    pub fn is_missing(&self, field: RequiredField) -> bool {
        match field {
            RequiredField::Name => is_blank(self.name.as_deref()),
            RequiredField::Username => self.username.is_empty(),
            RequiredField::Interests => self.interests.is_none(),
            RequiredField::Bio => is_blank(self.bio.as_deref()),
            RequiredField::GithubHandle => is_blank(self.github_handle.as_deref()),
        }
    }

    pub fn missing_required_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|field| self.is_missing(*field))
            .collect()
    }
}
