//! Reviewbot core: pure poll-cycle state machine and response handling.
mod effect;
mod error;
mod msg;
mod state;
mod status;
mod update;
mod validate;

pub use effect::{Effect, Notice};
pub use error::CycleError;
pub use msg::Msg;
pub use state::AgentState;
pub use status::{compose_status_message, ReviewStatus};
pub use update::update;
pub use validate::{validate_response, CursorField, ValidatedResponse};
