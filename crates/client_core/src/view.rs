//! Profile view state: fetch lifecycle, ownership, and the edit dialog.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use shared::{domain::RequiredField, error::ProfileUnavailable, protocol::ProfileRecord};
use tracing::{debug, error, info};

/// Viewer identity as reported by the authentication provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthContext {
    pub token: Option<String>,
    pub profile: Option<ProfileRecord>,
    pub loading: bool,
}

impl AuthContext {
    pub fn resolving() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn signed_in(token: impl Into<String>, profile: ProfileRecord) -> Self {
        Self {
            token: Some(token.into()),
            profile: Some(profile),
            loading: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded(ProfileRecord),
    NotFound,
}

impl FetchState {
    pub fn record(&self) -> Option<&ProfileRecord> {
        match self {
            FetchState::Loaded(record) => Some(record),
            _ => None,
        }
    }
}

/// `closable == false` means the viewer cannot dismiss the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditDialogState {
    pub show: bool,
    pub closable: bool,
}

impl EditDialogState {
    pub const FORCED: EditDialogState = EditDialogState {
        show: true,
        closable: false,
    };
}

impl Default for EditDialogState {
    fn default() -> Self {
        Self {
            show: false,
            closable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileTab {
    #[default]
    Profile,
    Projects,
    Hackathons,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [
        ProfileTab::Profile,
        ProfileTab::Projects,
        ProfileTab::Hackathons,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ProfileTab::Profile => "profile",
            ProfileTab::Projects => "projects",
            ProfileTab::Hackathons => "hackathons",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ProfileTab::Profile => "Profile",
            ProfileTab::Projects => "Projects",
            ProfileTab::Hackathons => "Hackathons",
        }
    }
}

impl fmt::Display for ProfileTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProfileTab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ProfileTab::ALL
            .into_iter()
            .find(|tab| tab.key().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown profile tab '{value}'"))
    }
}

/// Handle for one issued fetch. Only the most recently issued ticket may
/// complete a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    username: String,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Lowercased username the fetch is keyed by.
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    ForcedEdit(Vec<RequiredField>),
    NotFound,
    Stale,
}

/// The viewer owns the profile iff auth has resolved with a token and
/// profile, a record is loaded, and the usernames match exactly.
pub fn derive_ownership(auth: &AuthContext, fetch: &FetchState) -> bool {
    if auth.loading || auth.token.is_none() {
        return false;
    }
    match (auth.profile.as_ref(), fetch.record()) {
        (Some(viewer), Some(record)) => viewer.username == record.username,
        _ => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileView {
    fetch: FetchState,
    dialog: EditDialogState,
    auth: AuthContext,
    current_user: bool,
    active_tab: ProfileTab,
    generation: u64,
    requested: Option<String>,
}

impl ProfileView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn edit_dialog(&self) -> EditDialogState {
        self.dialog
    }

    pub fn is_current_user(&self) -> bool {
        self.current_user
    }

    pub fn active_tab(&self) -> ProfileTab {
        self.active_tab
    }

    pub fn requested_username(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.auth.loading || self.fetch == FetchState::Loading
    }

    /// Starts a load for `username`. Returns `None` without touching state
    /// when no username is given.
    pub fn begin_load(&mut self, username: Option<&str>) -> Option<LoadTicket> {
        let username = username.filter(|name| !name.is_empty())?.to_lowercase();

        self.generation += 1;
        self.fetch = FetchState::Loading;
        self.dialog = EditDialogState::default();
        self.active_tab = ProfileTab::default();
        self.requested = Some(username.clone());
        self.refresh_ownership();

        info!(%username, generation = self.generation, "loading profile");
        Some(LoadTicket {
            generation: self.generation,
            username,
        })
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ProfileRecord, ProfileUnavailable>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            debug!(
                username = %ticket.username,
                generation = ticket.generation,
                latest = self.generation,
                "discarding superseded profile response"
            );
            return LoadOutcome::Stale;
        }

        let outcome = match result {
            Ok(record) => {
                let missing = record.missing_required_fields();
                self.fetch = FetchState::Loaded(record);
                if missing.is_empty() {
                    LoadOutcome::Loaded
                } else {
                    info!(
                        username = %ticket.username,
                        missing = ?missing,
                        "profile incomplete; forcing edit dialog"
                    );
                    self.dialog = EditDialogState::FORCED;
                    LoadOutcome::ForcedEdit(missing)
                }
            }
            Err(err) => {
                if err.is_not_found_status() {
                    info!(username = %ticket.username, "profile does not exist");
                } else {
                    error!(username = %ticket.username, error = %err, "profile fetch failed");
                }
                self.fetch = FetchState::NotFound;
                LoadOutcome::NotFound
            }
        };
        self.refresh_ownership();
        outcome
    }

    pub fn set_auth(&mut self, auth: AuthContext) {
        self.auth = auth;
        self.refresh_ownership();
    }

    /// Opens a dismissible dialog. Only the profile owner can open it.
    pub fn open_edit_dialog(&mut self) -> bool {
        if !self.current_user {
            return false;
        }
        self.dialog = EditDialogState {
            show: true,
            closable: true,
        };
        true
    }

    pub fn close_edit_dialog(&mut self) -> bool {
        if !self.dialog.closable {
            return false;
        }
        self.dialog = EditDialogState {
            show: false,
            closable: false,
        };
        true
    }

    pub fn select_tab(&mut self, tab: ProfileTab) {
        self.active_tab = tab;
    }

    fn refresh_ownership(&mut self) {
        self.current_user = derive_ownership(&self.auth, &self.fetch);
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
