use crate::CycleError;

/// Side effects requested by the state machine, executed by the runner.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deliver a notice to the messaging channel.
    Notify(Notice),
}

/// What a notification is about. Failure notices take part in
/// de-duplication; status changes always go out.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The latest homework changed its review status.
    StatusChange(String),
    /// A cycle failed and the user should hear about it once per streak.
    Failure(CycleError),
}

impl Notice {
    /// Renders the text sent to the chat.
    pub fn to_text(&self) -> String {
        match self {
            Notice::StatusChange(text) => text.clone(),
            Notice::Failure(error) => format!("Сбой в работе программы: {error}"),
        }
    }
}
