#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the contributor grid crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::{
    path::{Path, PathBuf},
    time::Duration
};

/// Unified error type returned by the lister, renderer, writer and CLI.
///
/// Request-level variants ([`Error::Service`], [`Error::Status`],
/// [`Error::Timeout`]) are recoverable: the lister records them per page and
/// the renderer replaces the affected avatar with a placeholder. Only
/// [`Error::Write`] and [`Error::Validation`] normally reach the process exit
/// code.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Returned when user supplied input violates invariants.
    #[error("invalid input: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Transport or decoding failures when talking to upstream services.
    #[error("service error: {message}")]
    Service {
        /// Human readable message describing the service error.
        message: String
    },
    /// Non-success HTTP status returned by the avatar host.
    #[error("request to {url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url:    String,
        /// Numeric status code.
        status: u16
    },
    /// A bounded request did not complete in time.
    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        /// Short description of the request that stalled.
        operation: String,
        /// Configured timeout in whole seconds.
        seconds:   u64
    },
    /// Wraps I/O errors that occur while persisting the rendered SVG.
    #[error("failed to write SVG to {path:?}: {source}")]
    Write {
        /// Destination of the SVG document.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a service error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the service error.
    pub fn service<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Service {
            message: message.into()
        }
    }

    /// Constructs a timeout error for the named operation.
    pub fn timeout<M>(operation: M, limit: Duration) -> Self
    where
        M: Into<String>
    {
        Self::Timeout {
            operation: operation.into(),
            seconds:   limit.as_secs()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<octocrab::Error> for Error {
    fn from(error: octocrab::Error) -> Self {
        Self::Service {
            message: error.to_string()
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::Status {
                url:    error
                    .url()
                    .map(|url| url.to_string())
                    .unwrap_or_default(),
                status: status.as_u16()
            },
            None => Self::Service {
                message: error.to_string()
            }
        }
    }
}

/// Creates an [`Error::Write`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the SVG file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source
    }
}
