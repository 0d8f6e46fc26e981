//! Request-scoped value types. Nothing here outlives a single invocation.

pub mod completion;
pub mod request;
pub mod response;

pub use completion::{CompletionQuery, CompletionReply, Message, MessageRole};
pub use request::{Mode, SubmitRequest};
pub use response::{ClarifyDecision, Outcome};
