//! Async driver around [`ProfileView`]: issues fetches and publishes pages.

use std::sync::Arc;

use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    page::{ProfilePage, ViewOptions},
    transport::ProfileSource,
    view::{AuthContext, LoadOutcome, ProfileTab, ProfileView},
};

pub struct ProfileViewController {
    source: Arc<dyn ProfileSource>,
    view: Arc<Mutex<ProfileView>>,
    options: ViewOptions,
    pages: Arc<watch::Sender<ProfilePage>>,
}

impl ProfileViewController {
    pub fn new(source: Arc<dyn ProfileSource>, options: ViewOptions) -> Self {
        let (pages, _) = watch::channel(ProfilePage::Empty);
        Self {
            source,
            view: Arc::new(Mutex::new(ProfileView::new())),
            options,
            pages: Arc::new(pages),
        }
    }

    /// Receives the current page after every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ProfilePage> {
        self.pages.subscribe()
    }

    pub async fn page(&self) -> ProfilePage {
        self.view.lock().await.page(&self.options)
    }

    pub async fn snapshot(&self) -> ProfileView {
        self.view.lock().await.clone()
    }

    pub async fn set_auth(&self, auth: AuthContext) {
        let mut view = self.view.lock().await;
        view.set_auth(auth);
        self.publish(&view);
    }

    /// Starts loading `username` and spawns the fetch. Returns `None` when no
    /// username is given. A load superseded by a later call completes as
    /// [`LoadOutcome::Stale`] and leaves the state untouched.
    pub async fn load(&self, username: Option<&str>) -> Option<JoinHandle<LoadOutcome>> {
        let ticket = {
            let mut view = self.view.lock().await;
            let ticket = view.begin_load(username)?;
            self.publish(&view);
            ticket
        };

        let source = Arc::clone(&self.source);
        let view = Arc::clone(&self.view);
        let pages = Arc::clone(&self.pages);
        let options = self.options.clone();

        debug!(
            username = ticket.username(),
            generation = ticket.generation(),
            "spawning profile fetch"
        );
        Some(tokio::spawn(async move {
            let result = source.fetch_profile(ticket.username()).await;

            let mut view = view.lock().await;
            let outcome = view.finish_load(ticket, result);
            if outcome != LoadOutcome::Stale {
                pages.send_replace(view.page(&options));
            }
            outcome
        }))
    }

    pub async fn open_edit_dialog(&self) -> bool {
        let mut view = self.view.lock().await;
        let opened = view.open_edit_dialog();
        if opened {
            self.publish(&view);
        } else {
            debug!("edit dialog requested by a viewer who does not own the profile");
        }
        opened
    }

    pub async fn close_edit_dialog(&self) -> bool {
        let mut view = self.view.lock().await;
        let closed = view.close_edit_dialog();
        if closed {
            self.publish(&view);
        }
        closed
    }

    pub async fn select_tab(&self, tab: ProfileTab) {
        let mut view = self.view.lock().await;
        view.select_tab(tab);
        self.publish(&view);
    }

    fn publish(&self, view: &ProfileView) {
        self.pages.send_replace(view.page(&self.options));
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
