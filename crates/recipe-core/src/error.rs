use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("API error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Recipe store is no longer running")]
    StoreClosed,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_message_carries_status_and_body() {
        let err = RecipeError::Server {
            status: 503,
            body: "model overloaded".into(),
        };
        assert_eq!(err.to_string(), "API error 503: model overloaded");
    }
}
