use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Request for {resource} failed: {message}")]
    Transport { resource: String, message: String },

    #[error("Failed to fetch {resource}: {status} {body}")]
    Status {
        resource: String,
        status: u16,
        body: String,
    },

    #[error("Invalid {resource} response structure: {message}")]
    MalformedPayload { resource: String, message: String },
}

impl GatewayError {
    /// Upstream resource the failed request was for.
    pub fn resource(&self) -> &str {
        match self {
            GatewayError::Transport { resource, .. }
            | GatewayError::Status { resource, .. }
            | GatewayError::MalformedPayload { resource, .. } => resource,
        }
    }
}
