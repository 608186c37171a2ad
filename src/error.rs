/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Top-level error type for simulation runs.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a simulation run.
///
/// Malformed command lines are not fatal and never surface here; see
/// [`CommandError`](crate::sequencer::CommandError).
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// The command input could not be opened or read.
    #[error("error reading input file {path}: {source}")]
    Input {
        /// Input path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already open command stream failed.
    #[error("error reading command stream: {0}")]
    Stream(#[from] std::io::Error),

    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
