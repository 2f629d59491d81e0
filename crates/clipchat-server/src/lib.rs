pub mod conversation;
pub mod handlers;
pub mod logging;
pub mod server;

pub use conversation::{ConversationError, ConversationManager};
pub use server::{create_router, run_server, AppState, ServerConfig};
