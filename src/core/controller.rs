use crate::core::notifier::Notifier;
use crate::core::{UploadView, Uploader};
use crate::domain::model::{SubmitEvent, SubmitOutcome, UploadSettings};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Drives one upload form: submits it, reports the outcome through banners and
/// keeps the submit button in step with the request.
pub struct UploadController<U: Uploader, V: UploadView> {
    uploader: U,
    view: Arc<V>,
    notifier: Notifier<V>,
    settings: UploadSettings,
}

/// Holds the submit button in its busy state until dropped.
///
/// Dropping happens on every way out of `handle_submit`: normal return, a
/// panic inside the uploader, or the future being cancelled.
struct BusyButton<'a, V: UploadView> {
    view: &'a V,
    idle_label: &'a str,
}

impl<'a, V: UploadView> BusyButton<'a, V> {
    fn engage(view: &'a V, settings: &'a UploadSettings) -> Self {
        view.set_submit_state(true, &settings.busy_label);
        Self {
            view,
            idle_label: &settings.idle_label,
        }
    }
}

impl<V: UploadView> Drop for BusyButton<'_, V> {
    fn drop(&mut self) {
        self.view.set_submit_state(false, self.idle_label);
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

impl<U: Uploader, V: UploadView> UploadController<U, V> {
    pub fn new(uploader: U, view: Arc<V>, settings: UploadSettings) -> Self {
        let notifier = Notifier::new(Arc::clone(&view), settings.banner_ttl);
        Self {
            uploader,
            view,
            notifier,
            settings,
        }
    }

    /// Handles one form submission end to end. Upload failures never escape
    /// as errors; they are shown to the user and returned as an outcome.
    pub async fn handle_submit(&self, event: SubmitEvent) -> SubmitOutcome {
        let _busy = BusyButton::engage(self.view.as_ref(), &self.settings);
        tracing::info!(fields = event.form.len(), "submitting upload form");

        match self.uploader.submit(&event.form).await {
            Ok(reply) if reply.is_ok() => {
                // An empty message is still the server's message; only a
                // missing one gets the configured text.
                let message = reply
                    .body
                    .message
                    .unwrap_or_else(|| self.settings.upload_succeeded.clone());
                tracing::info!(status = reply.status, s3_key = ?reply.body.s3_key, "upload accepted");

                self.notifier.success(message.clone());
                self.view.reset_form();
                self.schedule_reload();

                SubmitOutcome::Uploaded { message }
            }
            Ok(reply) => {
                let error = non_empty(reply.body.error)
                    .unwrap_or_else(|| self.settings.upload_failed.clone());
                tracing::warn!(status = reply.status, %error, "upload rejected");

                self.notifier.error(error.clone());

                SubmitOutcome::Rejected {
                    status: reply.status,
                    error,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "upload request did not complete");

                self.notifier.error(self.settings.network_error.clone());

                SubmitOutcome::NetworkFailure {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn schedule_reload(&self) {
        let view = Arc::clone(&self.view);
        let reload_at = tokio::time::Instant::now() + self.settings.reload_delay;
        tokio::spawn(async move {
            tokio::time::sleep_until(reload_at).await;
            tracing::debug!("reloading page after successful upload");
            view.reload();
        });
    }
}

impl<U, V> UploadController<U, V>
where
    U: Uploader + 'static,
    V: UploadView,
{
    /// Subscribes the controller to a stream of submit events.
    ///
    /// Events are handled one at a time in arrival order. The subscription
    /// lasts until the event sender closes or the returned handle is dropped.
    pub fn attach(self: Arc<Self>, mut events: mpsc::Receiver<SubmitEvent>) -> Subscription {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let outcome = self.handle_submit(event).await;
                // Nobody listening is fine; the page already shows the result.
                let _ = outcome_tx.send(outcome);
            }
            tracing::debug!("submit event source closed");
        });

        Subscription {
            task,
            outcomes: outcome_rx,
        }
    }
}

/// Live binding between a page's submit events and an [`UploadController`].
pub struct Subscription {
    task: JoinHandle<()>,
    outcomes: mpsc::UnboundedReceiver<SubmitOutcome>,
}

impl Subscription {
    /// Waits for the next handled submission. `None` once the subscription
    /// has ended and every outcome was taken.
    pub async fn next_outcome(&mut self) -> Option<SubmitOutcome> {
        self.outcomes.recv().await
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops listening. A request in flight is abandoned, but the submit
    /// button is still restored.
    pub fn detach(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
