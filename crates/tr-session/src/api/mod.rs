pub(crate) mod client;
pub(crate) mod error;
pub(crate) mod requests;
pub(crate) mod responses;

pub use client::ApiClient;
pub use error::{ClientError, Result as ClientResult};
