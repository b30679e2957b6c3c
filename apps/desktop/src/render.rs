//! Plain-text rendering of a [`ProfilePage`] for the terminal.

use std::fmt::Write;

use client_core::{
    EditProfileProps, HackathonCard, ListPane, ProfileLayout, ProfilePage, ProfileTab, TeamCard,
};
use serde_json::{Map, Value};
use shared::protocol::HackathonSummary;

pub fn render_page(page: &ProfilePage) -> String {
    let mut out = String::new();
    match page {
        ProfilePage::Loading => out.push_str("Loading...\n"),
        ProfilePage::NotFound { status } => {
            let _ = writeln!(out, "{status} | This page could not be found.");
        }
        ProfilePage::Profile(layout) => render_layout(&mut out, layout),
        ProfilePage::Empty => {}
    }
    out
}

fn detail<'a>(details: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| details.get(*key).and_then(Value::as_str))
}

fn render_layout(out: &mut String, layout: &ProfileLayout) {
    let sidebar = &layout.sidebar;
    let _ = writeln!(out, "[avatar] {}", sidebar.avatar_url);
    if let Some(name) = &sidebar.name {
        let _ = writeln!(out, "{name}");
    }
    let _ = writeln!(out, "@{}", sidebar.username);
    if let Some(github) = &sidebar.github {
        let _ = writeln!(out, "github: {} ({})", github.handle, github.url);
    }
    let _ = writeln!(out, "location: {}", sidebar.location);

    let tabs: Vec<String> = sidebar
        .tabs
        .iter()
        .map(|entry| {
            if entry.active {
                format!("[{}]", entry.title)
            } else {
                entry.title.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "tabs: {}", tabs.join(" "));
    out.push('\n');

    match layout.active_tab {
        ProfileTab::Profile => {
            if layout.profile.can_edit {
                out.push_str("(Edit Profile)\n");
            }
            out.push_str("About Me\n");
            let _ = writeln!(out, "{}", layout.profile.bio.as_deref().unwrap_or_default());
            let _ = writeln!(out, "Interests: {}", layout.profile.interests.join(", "));
        }
        ProfileTab::Projects => render_list(out, &layout.projects, team_line),
        ProfileTab::Hackathons => render_list(out, &layout.hackathons, hackathon_line),
    }

    if let Some(props) = &layout.edit_dialog {
        out.push('\n');
        render_edit_dialog(out, props);
    }
}

fn render_list<T>(out: &mut String, pane: &ListPane<T>, line: fn(&T) -> String) {
    match pane {
        ListPane::Items { items } => {
            for item in items {
                let _ = writeln!(out, "- {}", line(item));
            }
        }
        ListPane::Empty { message } => {
            let _ = writeln!(out, "{message}");
        }
    }
}

fn hackathon_name(hackathon: &HackathonSummary) -> String {
    detail(&hackathon.details, &["title", "name"])
        .map(str::to_string)
        .or_else(|| hackathon.identifier())
        .unwrap_or_else(|| "unknown hackathon".to_string())
}

fn team_line(card: &TeamCard) -> String {
    let hackathon_name = hackathon_name(&card.team.hackathon);
    match detail(&card.team.details, &["name"]) {
        Some(name) => format!("{name} @ {hackathon_name}"),
        None => format!("team #{} @ {hackathon_name}", card.team.id),
    }
}

fn hackathon_line(card: &HackathonCard) -> String {
    let hackathon = &card.hackathon;
    match (
        detail(&hackathon.details, &["title", "name"]),
        hackathon.identifier(),
    ) {
        (Some(title), Some(id)) => format!("{title} ({id})"),
        _ => hackathon_name(hackathon),
    }
}

fn render_edit_dialog(out: &mut String, props: &EditProfileProps) {
    if props.closable {
        out.push_str("== Edit Profile ==\n");
    } else {
        out.push_str("== Complete your profile (required) ==\n");
    }
    let _ = writeln!(out, "username: {}", props.username);
    let _ = writeln!(out, "name: {}", props.name.as_deref().unwrap_or_default());
    let _ = writeln!(out, "github: {}", props.handle.as_deref().unwrap_or_default());
    let _ = writeln!(out, "bio: {}", props.bio.as_deref().unwrap_or_default());
    let interests = props.interest.as_deref().unwrap_or_default().join(", ");
    let _ = writeln!(out, "interests: {interests}");
}
