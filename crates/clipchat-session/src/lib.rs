pub mod store;
pub mod types;

pub use store::{SessionStore, SessionStoreConfig};
pub use types::Session;
