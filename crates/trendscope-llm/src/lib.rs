pub mod backend;
pub mod error;
pub mod gateway;
pub mod prompts;

pub mod test_support;

pub use backend::{LlmBackend, LocalBackend, RemoteBackend};
pub use error::LlmError;
pub use gateway::{LlmGateway, NO_RESPONSE_NARRATIVE};
pub use prompts::{build_trend_prompt, render_csv, NO_DATA_NARRATIVE};
