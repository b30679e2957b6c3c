use super::*;
use std::collections::HashMap;

use async_trait::async_trait;
use shared::{
    error::{FetchFailure, ProfileUnavailable},
    protocol::ProfileRecord,
};
use tokio::sync::oneshot;

use crate::view::{EditDialogState, FetchState};

type Reply = Result<ProfileRecord, ProfileUnavailable>;

/// Holds each fetch until the test releases it, so completion order is
/// controlled by the test.
#[derive(Default)]
struct GatedProfileSource {
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    requests: Mutex<Vec<String>>,
}

impl GatedProfileSource {
    async fn gate(&self, username: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.insert(username.to_string(), rx);
        tx
    }

    async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ProfileSource for GatedProfileSource {
    async fn fetch_profile(&self, username: &str) -> Result<ProfileRecord, ProfileUnavailable> {
        self.requests.lock().await.push(username.to_string());
        let gate = self.gates.lock().await.remove(username);
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| {
                Err(ProfileUnavailable::new(
                    username,
                    FetchFailure::Transport("gate dropped".into()),
                ))
            }),
            None => Err(ProfileUnavailable::new(username, FetchFailure::Status(404))),
        }
    }
}

fn record(username: &str) -> ProfileRecord {
    ProfileRecord {
        username: username.to_string(),
        name: Some(format!("{username} name")),
        bio: Some("hi".into()),
        interests: Some(vec!["x".into()]),
        github_handle: Some(format!("{username}g")),
        ..ProfileRecord::default()
    }
}

fn controller(source: Arc<GatedProfileSource>) -> ProfileViewController {
    ProfileViewController::new(source, ViewOptions::default())
}

#[tokio::test]
async fn load_without_username_never_fetches() {
    let source = Arc::new(GatedProfileSource::default());
    let controller = controller(source.clone());

    assert!(controller.load(None).await.is_none());
    assert!(controller.load(Some("")).await.is_none());

    assert!(source.requests().await.is_empty());
    assert_eq!(controller.page().await, ProfilePage::Empty);
    assert_eq!(controller.snapshot().await.fetch_state(), &FetchState::Idle);
}

#[tokio::test]
async fn load_fetches_lowercased_username_and_publishes_profile() {
    let source = Arc::new(GatedProfileSource::default());
    let controller = controller(source.clone());
    let pages = controller.subscribe();
    let reply = source.gate("alice").await;

    let handle = controller.load(Some("Alice")).await.expect("fetch issued");
    assert_eq!(controller.page().await, ProfilePage::Loading);
    assert_eq!(*pages.borrow(), ProfilePage::Loading);

    reply.send(Ok(record("alice"))).expect("send reply");
    assert_eq!(handle.await.expect("join"), LoadOutcome::Loaded);

    assert_eq!(source.requests().await, vec!["alice".to_string()]);
    let page = pages.borrow().clone();
    let layout = page.layout().expect("profile layout");
    assert_eq!(layout.sidebar.username, "alice");
    assert_eq!(layout.sidebar.avatar_url, crate::page::DEFAULT_AVATAR_URL);
    assert!(layout.edit_dialog.is_none());
    assert_eq!(
        controller.snapshot().await.edit_dialog(),
        EditDialogState::default()
    );
}

#[tokio::test]
async fn incomplete_profile_forces_dialog_that_owner_cannot_close() {
    let source = Arc::new(GatedProfileSource::default());
    let controller = controller(source.clone());
    controller
        .set_auth(AuthContext::signed_in(
            "token",
            ProfileRecord::with_username("alice"),
        ))
        .await;
    let reply = source.gate("alice").await;

    let handle = controller.load(Some("alice")).await.expect("fetch issued");
    let mut incomplete = record("alice");
    incomplete.bio = Some(String::new());
    reply.send(Ok(incomplete)).expect("send reply");

    assert!(matches!(
        handle.await.expect("join"),
        LoadOutcome::ForcedEdit(_)
    ));
    assert!(!controller.close_edit_dialog().await);

    let page = controller.page().await;
    let props = page
        .layout()
        .and_then(|layout| layout.edit_dialog.clone())
        .expect("edit dialog props");
    assert!(props.show);
    assert!(!props.closable);
}

#[tokio::test]
async fn failed_fetch_publishes_not_found() {
    let source = Arc::new(GatedProfileSource::default());
    let controller = controller(source.clone());
    let pages = controller.subscribe();
    let reply = source.gate("ghost").await;

    let handle = controller.load(Some("ghost")).await.expect("fetch issued");
    reply
        .send(Err(ProfileUnavailable::new(
            "ghost",
            FetchFailure::Decode("expected value".into()),
        )))
        .expect("send reply");

    assert_eq!(handle.await.expect("join"), LoadOutcome::NotFound);
    assert_eq!(*pages.borrow(), ProfilePage::NotFound { status: 404 });
}

#[tokio::test]
async fn out_of_order_response_is_discarded() {
    let source = Arc::new(GatedProfileSource::default());
    let controller = controller(source.clone());
    let alice_reply = source.gate("alice").await;
    let bob_reply = source.gate("bob").await;

    let alice = controller.load(Some("alice")).await.expect("alice fetch");
    let bob = controller.load(Some("bob")).await.expect("bob fetch");

    bob_reply.send(Ok(record("bob"))).expect("send bob");
    assert_eq!(bob.await.expect("join bob"), LoadOutcome::Loaded);

    alice_reply.send(Ok(record("alice"))).expect("send alice");
    assert_eq!(alice.await.expect("join alice"), LoadOutcome::Stale);

    let page = controller.page().await;
    assert_eq!(
        page.layout().map(|layout| layout.sidebar.username.as_str()),
        Some("bob")
    );
}

#[tokio::test]
async fn owner_opens_and_closes_edit_dialog() {
    let source = Arc::new(GatedProfileSource::default());
    let controller = controller(source.clone());
    let reply = source.gate("alice").await;

    let handle = controller.load(Some("alice")).await.expect("fetch issued");
    reply.send(Ok(record("alice"))).expect("send reply");
    handle.await.expect("join");

    assert!(!controller.open_edit_dialog().await);

    controller
        .set_auth(AuthContext::signed_in(
            "token",
            ProfileRecord::with_username("alice"),
        ))
        .await;
    assert!(controller.open_edit_dialog().await);
    let page = controller.page().await;
    let props = page
        .layout()
        .and_then(|layout| layout.edit_dialog.clone())
        .expect("edit dialog props");
    assert!(props.closable);

    assert!(controller.close_edit_dialog().await);
    let page = controller.page().await;
    assert!(page.layout().expect("layout").edit_dialog.is_none());
    assert!(!controller.close_edit_dialog().await);
}

#[tokio::test]
async fn tab_selection_is_published() {
    let source = Arc::new(GatedProfileSource::default());
    let controller = controller(source.clone());
    let pages = controller.subscribe();
    let reply = source.gate("alice").await;

    let handle = controller.load(Some("alice")).await.expect("fetch issued");
    reply.send(Ok(record("alice"))).expect("send reply");
    handle.await.expect("join");

    controller.select_tab(ProfileTab::Hackathons).await;
    let active = pages.borrow().layout().map(|layout| layout.active_tab);
    assert_eq!(active, Some(ProfileTab::Hackathons));
}
