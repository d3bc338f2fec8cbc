//! Text-completion client adapters.

mod anthropic_client;
mod mock_client;

pub use anthropic_client::{AnthropicClient, AnthropicClientConfig};
pub use mock_client::{MockCompletionClient, MockCompletionError};
