pub mod conversion_session;
pub mod session_ctx;

pub use conversion_session::{ConversionSession, SessionOptions, SessionOutcome, SessionState};
pub use session_ctx::{output_path_for, SessionCtx};
