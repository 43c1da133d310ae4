pub mod language;
pub mod llm_model;
pub mod loaders;
pub mod prompts;
pub mod turn;

pub use language::ProgLang;
pub use llm_model::LlmModel;
pub use loaders::{default_prompt_catalog, load_prompt_catalog, resolve_prompt_catalog};
pub use prompts::PromptCatalog;
pub use turn::{ConversationTurn, Role};
