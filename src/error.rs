//! Error and diagnostic types.
//!
//! Nothing in the rotation core fails at runtime. Errors here come from
//! loading files, and [`ContentDefect`]s describe authoring mistakes in room
//! content that are tolerated and logged.

use std::path::PathBuf;

use thiserror::Error;

use crate::orientation::Face;

/// Failure to load or validate a configuration or room file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Room content problem found while caching a room's geometry.
///
/// The room is still usable; the affected collection is empty or the later
/// of two conflicting walls wins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentDefect {
    #[error("room has no `{name}` subtree")]
    MissingSubtree { name: &'static str },
    #[error("two {} walls are tagged {face}; the later one wins", group_name(.interior))]
    DuplicateFace { face: Face, interior: bool },
    #[error("puzzle `{id}` appears more than once")]
    DuplicatePuzzle { id: String },
}

fn group_name(interior: &bool) -> &'static str {
    if *interior {
        "interior"
    } else {
        "exterior"
    }
}

/// Unrecognized move notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown move {0:?}; expected one of X, X', Y, Y', Z, Z'")]
pub struct ParseMoveError(pub String);
