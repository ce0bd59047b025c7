// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the generation pipeline

use shellgen_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by a generation pass
#[derive(Error, Debug)]
pub enum Error {
    /// Level or catalogue lookup failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Design parameter rejected by the geometry core
    #[error(transparent)]
    Geometry(#[from] shellgen_geometry::Error),

    /// Configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Transaction could not be opened, committed or rolled back
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Host document refused a mutation
    #[error("Document error: {0}")]
    Document(String),

    /// Malformed JSON input
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of pipeline failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidParameter,
    LevelNotFound,
    CatalogEntryNotFound,
    Other,
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a transaction error
    pub fn transaction(msg: impl Into<String>) -> Self {
        Error::Transaction(msg.into())
    }

    /// Create a document error
    pub fn document(msg: impl Into<String>) -> Self {
        Error::Document(msg.into())
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Geometry(e) if e.is_invalid_parameter() => ErrorKind::InvalidParameter,
            Error::Model(ModelError::LevelNotFound(_) | ModelError::DuplicateLevel(..)) => {
                ErrorKind::LevelNotFound
            }
            Error::Model(ModelError::CatalogEntryNotFound { .. }) => {
                ErrorKind::CatalogEntryNotFound
            }
            _ => ErrorKind::Other,
        }
    }
}
