//! Confluence module providing the content API abstraction, the HTTP
//! transport, data models, endpoint composition, and input parsing helpers.

pub mod api;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod transport;
pub mod url;

pub use api::ContentApi;
pub use client::ContentClient;
pub use endpoint::{apply_expand, content_endpoint};
pub use error::{BoxError, ContentError, RequestError};
pub use models::{
  Container, Content, ContentBody, ContentUpdate, LinkMap, ProfilePicture, STORAGE_REPRESENTATION, StorageFormat,
  UpdateBody, UpdateVersion, User, UserInfo, Version, ViewFormat,
};
pub use transport::{ClientConfig, DEFAULT_API_PATH, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use url::{ContentTarget, parse_content_target};
