// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the controller crate.

use thiserror::Error;

use crate::manifest::ShapeId;

/// Errors from loading or checking a [`MapConfig`](crate::MapConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid JSON for a configuration.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of its valid range.
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Configuration key, as spelled in JSON.
        key: &'static str,
        /// What the value must satisfy.
        reason: &'static str,
    },
}

/// Errors from [`MapController::mount`](crate::MapController::mount).
#[derive(Error, Debug)]
pub enum MountError {
    /// There is no content layer to control.
    #[error("map content is missing")]
    MissingContent,

    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from selection operations on a mounted controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The id is not a shape of the current content.
    #[error("unknown shape '{0}'")]
    UnknownShape(ShapeId),
}
