use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The location text is empty")]
    EmptyLocation,
}
