pub mod chunker;
pub mod conversation;
pub mod ledger;
pub mod reply;

pub use chunker::split_into_chunks;
pub use conversation::ConversationBuilder;
pub use ledger::CompletionLedger;
pub use reply::strip_code_fence;
