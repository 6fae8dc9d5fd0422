use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, RouteError>;

/// The two cells a route must connect
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Endpoint {
    Start,
    Finish,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Endpoint::Start => "start",
                Endpoint::Finish => "finish",
            }
        )
    }
}

/// Every way finding a route can fail. None of them leave a partial result behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    /// The map text contains a character that is not part of the legend.
    #[error("unrecognized map symbol {symbol:?} at row {row}, column {col}")]
    Parse { symbol: char, row: usize, col: usize },

    /// The map has no start or no finish cell.
    #[error("no {0} node in map")]
    MissingEndpoint(Endpoint),

    /// The search ran out of candidates before reaching the finish.
    #[error("no path found")]
    NoPath,

    /// The configured legend cannot be used to read a map.
    #[error("invalid legend: {0}")]
    Legend(String),
}
