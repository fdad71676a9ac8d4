use thiserror::Error;

/// Failure of an asynchronous server request.
///
/// The server reports failures as bare numeric codes; interpretation
/// (such as 404 on create-default-repo) belongs to the setup state
/// machine, not the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("server request failed with code {code}")]
pub struct RemoteError {
    pub code: i32,
}

impl RemoteError {
    pub fn new(code: i32) -> Self {
        Self { code }
    }
}

/// Clone-command rejection from the local sync daemon, carrying the
/// daemon-supplied error string verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CloneError {
    pub message: String,
}

impl CloneError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
