pub mod error;
pub mod openai;
pub mod provider;

pub use error::{LLMError, Result};
pub use openai::{OpenAiProvider, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use provider::ChatProvider;
