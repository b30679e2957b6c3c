//! Headless profile screen: loads a user profile by username, tracks the
//! fetch lifecycle and ownership, and selects the page to present.

pub mod controller;
pub mod page;
pub mod transport;
pub mod view;

pub use controller::ProfileViewController;
pub use page::{
    EditProfileProps, GithubLink, HackathonCard, ListPane, ProfileLayout, ProfilePage,
    ProfilePane, Sidebar, TabEntry, TeamCard, ViewOptions,
};
pub use transport::{HttpProfileSource, MissingProfileSource, ProfileSource};
pub use view::{
    derive_ownership, AuthContext, EditDialogState, FetchState, LoadOutcome, LoadTicket,
    ProfileTab, ProfileView,
};
