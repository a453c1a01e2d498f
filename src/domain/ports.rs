use crate::domain::model::{Banner, BannerId, FormData, ServerReply};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Sends a form to the upload endpoint.
///
/// `Err` means the exchange could not complete (connection failure, a body that
/// is not JSON). A reply with an error status is still `Ok`.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn submit(&self, form: &FormData) -> Result<ServerReply>;
}

/// The parts of the page the upload controller manipulates.
///
/// Methods take `&self`; implementations keep their own interior mutability so
/// the view can be shared with delayed tasks.
pub trait UploadView: Send + Sync + 'static {
    fn set_submit_state(&self, disabled: bool, label: &str);
    fn reset_form(&self);
    /// Inserts the banner as the first child of the main region.
    fn insert_banner(&self, banner: Banner);
    fn remove_banner(&self, id: BannerId);
    fn reload(&self);
}
