// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::id::ElementId;
use crate::kind::ElementKind;

/// Why the store rejected an operation.
///
/// A rejected operation never leaves a partial mutation behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No element with this id exists.
    UnknownElement(ElementId),
    /// The requested parent does not exist.
    UnknownParent(ElementId),
    /// No defaults are registered for this kind.
    UnknownKind(ElementKind),
    /// A restored snapshot does not describe a valid tree.
    CorruptTree(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement(id) => write!(f, "no element with id {id}"),
            Self::UnknownParent(id) => write!(f, "parent element {id} does not exist"),
            Self::UnknownKind(kind) => write!(f, "element kind `{kind}` is not registered"),
            Self::CorruptTree(reason) => write!(f, "corrupt element tree: {reason}"),
        }
    }
}

impl core::error::Error for StoreError {}

/// Why a directory move was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// Source and target are the same element.
    SameElement(ElementId),
    /// One of the elements does not exist.
    UnknownElement(ElementId),
    /// The target is the source or one of its descendants.
    WouldCreateCycle {
        /// The element being moved.
        source: ElementId,
        /// The intended new parent.
        target: ElementId,
    },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameElement(id) => write!(f, "cannot move element {id} relative to itself"),
            Self::UnknownElement(id) => write!(f, "no element with id {id}"),
            Self::WouldCreateCycle { source, target } => write!(
                f,
                "moving {source} under {target} would make it its own ancestor"
            ),
        }
    }
}

impl core::error::Error for MoveError {}
