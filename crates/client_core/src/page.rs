//! Presentation selection for the profile view.
//!
//! [`ProfileView::page`] is a pure function of the view state: it picks one
//! of four mutually exclusive pages and, for a loaded profile, builds the
//! view model the renderer consumes.

use serde::Serialize;
use shared::protocol::{HackathonSummary, ProfileRecord, TeamMembership};

use crate::view::{EditDialogState, FetchState, ProfileTab, ProfileView};

pub const DEFAULT_AVATAR_URL: &str = "../images/person.jpeg";
pub const DEFAULT_LOCATION_LABEL: &str = "IIT BHU Varanasi";
pub const NO_TEAMS_MESSAGE: &str = "No Teams to Show";
pub const NO_HACKATHONS_MESSAGE: &str = "No Participation in Hackathons to Show";
const GITHUB_BASE_URL: &str = "https://github.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewOptions {
    pub default_avatar_url: String,
    pub location_label: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            default_avatar_url: DEFAULT_AVATAR_URL.into(),
            location_label: DEFAULT_LOCATION_LABEL.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum ProfilePage {
    Loading,
    NotFound { status: u16 },
    Profile(Box<ProfileLayout>),
    Empty,
}

impl ProfilePage {
    pub fn layout(&self) -> Option<&ProfileLayout> {
        match self {
            ProfilePage::Profile(layout) => Some(layout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileLayout {
    pub sidebar: Sidebar,
    pub active_tab: ProfileTab,
    pub profile: ProfilePane,
    pub projects: ListPane<TeamCard>,
    pub hackathons: ListPane<HackathonCard>,
    pub edit_dialog: Option<EditProfileProps>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub avatar_url: String,
    pub name: Option<String>,
    pub username: String,
    pub github: Option<GithubLink>,
    pub location: String,
    pub tabs: Vec<TabEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GithubLink {
    pub handle: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabEntry {
    pub tab: ProfileTab,
    pub title: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilePane {
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub can_edit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListPane<T> {
    Items { items: Vec<T> },
    Empty { message: &'static str },
}

impl<T> ListPane<T> {
    fn from_items(items: Vec<T>, empty_message: &'static str) -> Self {
        if items.is_empty() {
            ListPane::Empty {
                message: empty_message,
            }
        } else {
            ListPane::Items { items }
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListPane::Items { items } => items,
            ListPane::Empty { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamCard {
    pub key: String,
    pub team: TeamMembership,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HackathonCard {
    pub key: String,
    pub hackathon: HackathonSummary,
}

/// Props handed to the edit-profile form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditProfileProps {
    pub show: bool,
    pub closable: bool,
    pub url: String,
    pub username: String,
    pub name: Option<String>,
    pub handle: Option<String>,
    pub bio: Option<String>,
    pub interest: Option<Vec<String>>,
}

/// Same hackathon can appear under several memberships, so the key carries
/// both the hackathon identifier and the membership id.
pub fn hackathon_key(membership: &TeamMembership) -> String {
    format!(
        "{}-{}",
        membership.hackathon.identifier().unwrap_or_default(),
        membership.id
    )
}

pub fn avatar_url(record: &ProfileRecord, options: &ViewOptions) -> String {
    record
        .photo_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(options.default_avatar_url.as_str())
        .to_string()
}

fn github_link(record: &ProfileRecord) -> Option<GithubLink> {
    let handle = record.github_handle.as_deref().filter(|h| !h.is_empty())?;
    Some(GithubLink {
        handle: handle.to_string(),
        url: format!("{GITHUB_BASE_URL}/{handle}"),
    })
}

fn edit_props(record: &ProfileRecord, dialog: EditDialogState, url: &str) -> EditProfileProps {
    EditProfileProps {
        show: dialog.show,
        closable: dialog.closable,
        url: url.to_string(),
        username: record.username.clone(),
        name: record.name.clone(),
        handle: record.github_handle.clone(),
        bio: record.bio.clone(),
        interest: record.interests.clone(),
    }
}

impl ProfileView {
    pub fn page(&self, options: &ViewOptions) -> ProfilePage {
        if self.is_loading() {
            return ProfilePage::Loading;
        }
        match self.fetch_state() {
            FetchState::Idle => ProfilePage::Empty,
            FetchState::Loading => ProfilePage::Loading,
            FetchState::NotFound => ProfilePage::NotFound { status: 404 },
            FetchState::Loaded(record) => {
                ProfilePage::Profile(Box::new(self.layout(record, options)))
            }
        }
    }

    fn layout(&self, record: &ProfileRecord, options: &ViewOptions) -> ProfileLayout {
        let current_user = self.is_current_user();
        let active_tab = self.active_tab();
        let avatar_url = avatar_url(record, options);
        let dialog = self.edit_dialog();

        let tabs = ProfileTab::ALL
            .into_iter()
            .map(|tab| TabEntry {
                tab,
                title: tab.title(),
                active: tab == active_tab,
            })
            .collect();

        let teams = record
            .teams
            .iter()
            .map(|team| TeamCard {
                key: team.id.to_string(),
                team: team.clone(),
            })
            .collect();

        let hackathons = record
            .teams
            .iter()
            .map(|team| HackathonCard {
                key: hackathon_key(team),
                hackathon: team.hackathon.clone(),
            })
            .collect();

        let edit_dialog =
            (current_user && dialog.show).then(|| edit_props(record, dialog, &avatar_url));

        ProfileLayout {
            sidebar: Sidebar {
                avatar_url,
                name: record.name.clone(),
                username: record.username.clone(),
                github: github_link(record),
                location: options.location_label.clone(),
                tabs,
            },
            active_tab,
            profile: ProfilePane {
                bio: record.bio.clone(),
                interests: record.interests.clone().unwrap_or_default(),
                can_edit: current_user,
            },
            projects: ListPane::from_items(teams, NO_TEAMS_MESSAGE),
            hackathons: ListPane::from_items(hackathons, NO_HACKATHONS_MESSAGE),
            edit_dialog,
        }
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
