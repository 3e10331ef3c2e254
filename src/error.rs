use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// The request never produced a response. Carries the message shown to the user.
    #[error("{0}")]
    Network(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl ProbeError {
    /// Network error whose message includes the whole source chain, since
    /// reqwest's top-level message alone rarely says what went wrong.
    pub fn network(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        ProbeError::Network(message)
    }
}
