use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Preparing or running a query against the store failed.
    #[error("problems persisting: {message}")]
    ProblemsPersisting {
        message: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub fn problems_persisting<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ProblemsPersisting {
            message: source.to_string(),
            source: Box::new(source),
        }
    }
}
