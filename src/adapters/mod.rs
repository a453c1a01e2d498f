// Adapters layer: concrete implementations of the upload ports.

pub mod http;
pub mod page;

pub use http::HttpUploader;
pub use page::{PageState, SubmitButton};
