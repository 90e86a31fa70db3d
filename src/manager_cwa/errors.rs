use thiserror::Error;

#[derive(Error, Debug)]
pub enum CwaError {
    #[error("http request error: {0}")]
    Request(String),
    #[error("dataset request rejected with status {0}")]
    Status(u16),
    #[error("dataset document error: {0}")]
    Document(String),
}
impl From<ureq::Error> for CwaError {
    fn from(e: ureq::Error) -> CwaError {
        match e {
            ureq::Error::StatusCode(code) => CwaError::Status(code),
            other => CwaError::Request(other.to_string()),
        }
    }
}
impl From<std::io::Error> for CwaError {
    fn from(e: std::io::Error) -> CwaError {
        CwaError::Document(e.to_string())
    }
}
