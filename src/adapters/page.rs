use crate::core::UploadView;
use crate::domain::model::{Banner, BannerId, FieldValue, FormData, SubmitEvent};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

const SUBMIT_QUEUE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug)]
struct PageInner {
    defaults: FormData,
    form: FormData,
    button: SubmitButton,
    /// Children of the main region, first child first.
    banners: Vec<Banner>,
    reloads: usize,
    submit_tx: Option<mpsc::Sender<SubmitEvent>>,
}

/// In-memory model of the upload page: one form with a submit button and a
/// main region that hosts banners.
#[derive(Debug)]
pub struct PageState {
    inner: Mutex<PageInner>,
}

impl PageState {
    /// `defaults` is what the form holds on load and after a reset.
    pub fn new(defaults: FormData, idle_label: &str) -> Self {
        Self {
            inner: Mutex::new(PageInner {
                form: defaults.clone(),
                defaults,
                button: SubmitButton {
                    disabled: false,
                    label: idle_label.to_string(),
                },
                banners: Vec::new(),
                reloads: 0,
                submit_tx: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, PageInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fill(&self, name: &str, value: FieldValue) {
        self.state().form.set(name, value);
    }

    pub fn fill_text(&self, name: &str, value: &str) {
        self.fill(name, FieldValue::Text(value.to_string()));
    }

    pub fn form(&self) -> FormData {
        self.state().form.clone()
    }

    pub fn submit_button(&self) -> SubmitButton {
        self.state().button.clone()
    }

    pub fn banners(&self) -> Vec<Banner> {
        self.state().banners.clone()
    }

    pub fn reload_count(&self) -> usize {
        self.state().reloads
    }

    /// Binds the form's submit event to a new receiver, replacing any earlier
    /// binding.
    pub fn subscribe_submit(&self) -> mpsc::Receiver<SubmitEvent> {
        let (tx, rx) = mpsc::channel(SUBMIT_QUEUE);
        self.state().submit_tx = Some(tx);
        rx
    }

    /// Presses the submit button. Returns `false` when the button is disabled,
    /// nothing is bound, or the listener is gone.
    pub fn click_submit(&self) -> bool {
        let state = self.state();
        if state.button.disabled {
            tracing::debug!("submit ignored, button disabled");
            return false;
        }
        let Some(tx) = &state.submit_tx else {
            return false;
        };
        tx.try_send(SubmitEvent {
            form: state.form.clone(),
        })
        .is_ok()
    }
}

impl UploadView for PageState {
    fn set_submit_state(&self, disabled: bool, label: &str) {
        let mut state = self.state();
        state.button.disabled = disabled;
        state.button.label = label.to_string();
    }

    fn reset_form(&self) {
        let mut state = self.state();
        state.form = state.defaults.clone();
    }

    fn insert_banner(&self, banner: Banner) {
        self.state().banners.insert(0, banner);
    }

    fn remove_banner(&self, id: BannerId) {
        self.state().banners.retain(|b| b.id != id);
    }

    fn reload(&self) {
        tracing::info!("page reload requested");
        self.state().reloads += 1;
    }
}
