// beeswax-api: Async Rust client for the Beeswax advertising-operations REST API

pub mod api;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod models;
pub mod params;
pub mod resources;
pub mod session;
pub mod transport;

pub use api::BeeswaxApi;
pub use credentials::{CredentialProvider, NoCredentials, StaticCredentials, StoredCredentials};
pub use error::Error;
pub use params::Params;
pub use resources::Accessor;
pub use session::{RequestOptions, Session, UploadFile};
pub use transport::{TlsMode, TransportConfig};

// Re-exported so callers can name request methods without a direct reqwest dependency.
pub use reqwest::Method;
pub use secrecy::SecretString;
