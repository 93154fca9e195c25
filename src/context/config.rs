// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Engine configuration.

use crate::phases::RotationMode;
use crate::strategy::SelectionOrder;
use serde::Serialize;

/// Knobs that change how a run is carried out, never what a stable
/// matching is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Order used to pick free participants and multi-entry lists.
    pub selection: SelectionOrder,
    /// Which part of the traversed chain is eliminated as a rotation.
    pub rotation_mode: RotationMode,
}

impl EngineConfig {
    pub fn with_selection(mut self, selection: SelectionOrder) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_rotation_mode(mut self, rotation_mode: RotationMode) -> Self {
        self.rotation_mode = rotation_mode;
        self
    }
}
