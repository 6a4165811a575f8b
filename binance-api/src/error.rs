#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),

    #[error(transparent)]
    HttpError(#[from] http::Error),

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    UrlError(#[from] url::ParseError),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("{endpoint} responded with {status}: {body}")]
    StatusError {
        endpoint: String,
        status: http::StatusCode,
        body: String,
    },
}
