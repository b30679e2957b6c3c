use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    AuthContext, HttpProfileSource, MissingProfileSource, ProfileSource, ProfileTab,
    ProfileViewController,
};
use shared::protocol::ProfileRecord;
use tracing::{info, warn};

mod config;
mod render;

use config::{load_settings, load_settings_from, Settings};

/// Loads a user profile from the profile API and prints the page a viewer would see.
#[derive(Parser, Debug)]
#[command(name = "profile_view")]
struct Args {
    /// Profile to show. Without it nothing is fetched.
    #[arg(long)]
    username: Option<String>,
    /// Base URL of the profile API, overriding settings.
    #[arg(long)]
    api_url: Option<String>,
    /// Username of the signed-in viewer.
    #[arg(long, requires = "token")]
    viewer: Option<String>,
    #[arg(long)]
    token: Option<String>,
    #[arg(long, default_value_t = ProfileTab::Profile)]
    tab: ProfileTab,
    /// Open the edit dialog (owner only).
    #[arg(long)]
    open_edit: bool,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

fn viewer_auth(token: Option<String>, viewer: Option<String>) -> AuthContext {
    match (token, viewer) {
        (Some(token), Some(viewer)) => {
            AuthContext::signed_in(token, ProfileRecord::with_username(viewer))
        }
        (token, _) => AuthContext {
            token,
            ..AuthContext::default()
        },
    }
}

fn profile_source(settings: &Settings) -> Result<Arc<dyn ProfileSource>> {
    if settings.api_base_url.trim().is_empty() {
        warn!("no profile api url configured; every profile will show as not found");
        return Ok(Arc::new(MissingProfileSource));
    }
    let source =
        HttpProfileSource::with_timeout(&settings.api_base_url, settings.request_timeout())?;
    Ok(Arc::new(source))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let controller =
        ProfileViewController::new(profile_source(&settings)?, settings.view_options());
    controller.set_auth(viewer_auth(args.token, args.viewer)).await;

    if let Some(handle) = controller.load(args.username.as_deref()).await {
        let outcome = handle.await.context("profile load task failed")?;
        let view = controller.snapshot().await;
        info!(
            username = view.requested_username().unwrap_or_default(),
            current_user = view.is_current_user(),
            ?outcome,
            "profile load finished"
        );
    }

    controller.select_tab(args.tab).await;
    if args.open_edit && !controller.open_edit_dialog().await {
        warn!("edit dialog is only available to the profile owner");
    }

    let page = controller.page().await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", render::render_page(&page));
    }

    Ok(())
}
