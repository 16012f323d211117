use crate::bundle::LoadError;
use crate::hierarchy::ResolveError;
use crate::lookup::LookupError;
use crate::materialize::ValueError;
use crate::pipeline::EmitError;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Value error: {0}")]
    Value(#[from] ValueError),
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),
    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),
    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// Renders the error together with every `source()` below it.
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_message = cause.to_string();
            if !message.contains(&cause_message) {
                message.push_str(": ");
                message.push_str(&cause_message);
            }
            source = cause.source();
        }
        message
    }
}

// Convert from eyre::Report to our Error type
impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
