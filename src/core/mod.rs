pub mod controller;
pub mod notifier;

pub use crate::domain::model::{ServerReply, SubmitEvent, SubmitOutcome};
pub use crate::domain::ports::{UploadView, Uploader};
pub use crate::utils::error::Result;

#[cfg(test)]
pub(crate) mod test_support {
    /// Lets spawned tasks woken by a clock advance run to their next await.
    pub async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }
}
