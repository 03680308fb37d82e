//! AdminViewer: view state for looking up one stored response.
//!
//! Starts at the credential prompt. Auth-class failures return to the
//! prompt with a message; anything else is a terminal error view.

use serde::Serialize;
use tokio::sync::watch;

use crate::evaluation::progress::{LoadingSnapshot, ProgressProfile, SimulatedProgress};

use super::auth::{AdminClient, AdminCredentials};
use super::record::AdminRecord;

/// What the admin viewer is showing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum AdminView {
    PromptCredentials { error: Option<String> },
    Loading,
    Ready(AdminRecord),
    Failed { message: String },
}

impl AdminView {
    pub fn is_prompt(&self) -> bool {
        matches!(self, Self::PromptCredentials { .. })
    }
}

pub struct AdminViewer {
    client: AdminClient,
    response_id: String,
    profile: ProgressProfile,
    view_tx: watch::Sender<AdminView>,
    snapshot_tx: watch::Sender<LoadingSnapshot>,
}

impl AdminViewer {
    pub fn new(client: AdminClient, response_id: impl Into<String>) -> Self {
        let (view_tx, _) = watch::channel(AdminView::PromptCredentials { error: None });
        let (snapshot_tx, _) = watch::channel(LoadingSnapshot::default());
        Self {
            client,
            response_id: response_id.into(),
            profile: ProgressProfile::admin(),
            view_tx,
            snapshot_tx,
        }
    }

    pub fn response_id(&self) -> &str {
        &self.response_id
    }

    pub fn view(&self) -> AdminView {
        self.view_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AdminView> {
        self.view_tx.subscribe()
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<LoadingSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> LoadingSnapshot {
        *self.snapshot_tx.borrow()
    }

    pub fn profile(&self) -> &ProgressProfile {
        &self.profile
    }

    /// Submit credentials from the prompt and load the response.
    pub async fn sign_in(&self, credentials: &AdminCredentials) -> AdminView {
        if let Err(err) = credentials.validate() {
            return self.show(AdminView::PromptCredentials {
                error: Some(err.detail()),
            });
        }

        self.show(AdminView::Loading);
        let mut progress = SimulatedProgress::start(&self.profile, &self.snapshot_tx);

        let fetch = self.client.fetch_response(&self.response_id, credentials);
        tokio::pin!(fetch);
        let outcome = loop {
            tokio::select! {
                result = &mut fetch => break result,
                _ = progress.tick() => {}
            }
        };

        let view = match outcome {
            Ok(record) => {
                progress.complete();
                AdminView::Ready(record)
            }
            Err(err) if err.is_auth_error() => {
                progress.stop();
                AdminView::PromptCredentials {
                    error: Some(err.detail()),
                }
            }
            Err(err) => {
                progress.stop();
                AdminView::Failed {
                    message: err.detail(),
                }
            }
        };
        self.show(view)
    }

    fn show(&self, view: AdminView) -> AdminView {
        tracing::debug!(response_id = %self.response_id, view = view_name(&view), "Admin view changed");
        self.view_tx.send_replace(view.clone());
        view
    }
}

fn view_name(view: &AdminView) -> &'static str {
    match view {
        AdminView::PromptCredentials { .. } => "prompt_credentials",
        AdminView::Loading => "loading",
        AdminView::Ready(_) => "ready",
        AdminView::Failed { .. } => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::auth::MISSING_CREDENTIALS_DETAIL;

    #[tokio::test]
    async fn starts_at_prompt_without_error() {
        let viewer = AdminViewer::new(AdminClient::new("http://127.0.0.1:9"), "abc");
        assert_eq!(viewer.view(), AdminView::PromptCredentials { error: None });
    }

    #[tokio::test]
    async fn empty_credentials_stay_on_prompt_without_loading() {
        let viewer = AdminViewer::new(AdminClient::new("http://127.0.0.1:9"), "abc");
        let mut rx = viewer.subscribe();
        rx.mark_unchanged();

        let view = viewer.sign_in(&AdminCredentials::new("admin", "")).await;
        assert_eq!(
            view,
            AdminView::PromptCredentials {
                error: Some(MISSING_CREDENTIALS_DETAIL.to_string())
            }
        );
        assert_eq!(*rx.borrow_and_update(), view);
        assert_eq!(viewer.snapshot(), LoadingSnapshot::default());
    }

    #[test]
    fn view_serializes_with_tag() {
        let json = serde_json::to_value(AdminView::Failed {
            message: "gone".into(),
        })
        .unwrap();
        assert_eq!(json["view"], "failed");
        assert_eq!(json["data"]["message"], "gone");
    }
}
