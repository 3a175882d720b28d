pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod logging;
pub mod message;
pub mod reconcile;
pub mod retry;
pub mod store;
pub mod transport;

pub use dispatcher::FcmClient;
pub use message::{BatchResponse, Data, HttpMessage, Notification, RecipientResult};
pub use retry::{RetryPolicy, SendError};
pub use store::{MemStore, Store, StoreError, TokenDb};
