use crate::core::UploadView;
use crate::domain::model::{Banner, BannerId, BannerKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shows banners in the page's main region and expires them after a fixed delay.
///
/// There is no limit on how many banners are visible and identical messages
/// are not merged. Every banner lives exactly `ttl`, so banners leave in the
/// order they arrived.
pub struct Notifier<V: UploadView> {
    view: Arc<V>,
    ttl: Duration,
    next_id: AtomicU64,
}

impl<V: UploadView> Notifier<V> {
    pub fn new(view: Arc<V>, ttl: Duration) -> Self {
        Self {
            view,
            ttl,
            next_id: AtomicU64::new(1),
        }
    }

    /// Inserts a banner on top and schedules its removal. Must be called
    /// from within a tokio runtime.
    pub fn show(&self, kind: BannerKind, message: impl Into<String>) -> BannerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let message = message.into();
        tracing::debug!(banner = id, ?kind, %message, "showing banner");

        self.view.insert_banner(Banner { id, kind, message });

        let view = Arc::clone(&self.view);
        let expires_at = tokio::time::Instant::now() + self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            tracing::debug!(banner = id, "banner expired");
            view.remove_banner(id);
        });

        id
    }

    pub fn success(&self, message: impl Into<String>) -> BannerId {
        self.show(BannerKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> BannerId {
        self.show(BannerKind::Error, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::page::PageState;
    use crate::core::test_support::settle;
    use crate::domain::model::FormData;

    #[tokio::test(start_paused = true)]
    async fn newest_banner_is_on_top() {
        let page = Arc::new(PageState::new(FormData::new(), "Upload CV"));
        let notifier = Notifier::new(Arc::clone(&page), Duration::from_millis(5000));

        notifier.success("first");
        notifier.error("second");

        let messages: Vec<String> = page.banners().into_iter().map(|b| b.message).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert_eq!(page.banners()[0].kind, BannerKind::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn banner_expires_exactly_at_ttl() {
        let page = Arc::new(PageState::new(FormData::new(), "Upload CV"));
        let notifier = Notifier::new(Arc::clone(&page), Duration::from_millis(5000));

        notifier.success("Saved");
        settle().await;

        tokio::time::advance(Duration::from_millis(4999)).await;
        settle().await;
        assert_eq!(page.banners().len(), 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert!(page.banners().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn banners_expire_in_insertion_order() {
        let page = Arc::new(PageState::new(FormData::new(), "Upload CV"));
        let notifier = Notifier::new(Arc::clone(&page), Duration::from_millis(5000));

        notifier.error("older");
        settle().await;
        tokio::time::advance(Duration::from_millis(1000)).await;
        notifier.error("newer");
        settle().await;

        tokio::time::advance(Duration::from_millis(4000)).await;
        settle().await;
        let left: Vec<String> = page.banners().into_iter().map(|b| b.message).collect();
        assert_eq!(left, vec!["newer"]);

        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        assert!(page.banners().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_messages_are_not_merged() {
        let page = Arc::new(PageState::new(FormData::new(), "Upload CV"));
        let notifier = Notifier::new(Arc::clone(&page), Duration::from_millis(5000));

        let a = notifier.error("Upload failed");
        let b = notifier.error("Upload failed");

        assert_ne!(a, b);
        assert_eq!(page.banners().len(), 2);
    }
}
