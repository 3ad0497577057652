use serde::Deserialize;

/// Message shown when the service accepts a request without saying anything.
pub const DEFAULT_SUCCESS_MESSAGE: &str =
    "Request submitted successfully. Check your email for the CSV file.";

/// JSON body the service returns; both fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// An accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    /// 2xx status the service answered with
    pub status: u16,

    /// Service message, or [`DEFAULT_SUCCESS_MESSAGE`]
    pub message: String,

    /// Attempts used, including the successful one
    pub attempts: u32,
}
