//! Geometry descriptors for the level-editor overlay.
//!
//! While a spatial trigger is being edited, the overlay draws two shapes:
//! the committed region and the region from the unsaved edit buffer. This
//! module only produces those descriptors; drawing is the overlay's job.

use serde::{Deserialize, Serialize};

use crate::core::Region;
use crate::triggers::{SpatialCondition, TriggerCondition, TriggerId, TriggerRegistry};

/// Saved and in-progress geometry for one spatial trigger.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialPreview {
    /// Region of the committed trigger.
    pub saved: Region,
    /// Region of the edit buffer, when one is supplied and resolvable.
    pub preview: Option<Region>,
}

impl SpatialPreview {
    /// Whether the edit buffer differs from the committed trigger.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.preview.is_some_and(|p| p != self.saved)
    }
}

/// Build the preview for a spatial trigger.
///
/// Returns `None` for unknown triggers and for triggers that are not
/// spatial. An edit buffer that fails its schema check yields no preview
/// shape; the saved shape is still reported.
pub fn spatial_preview(
    triggers: &TriggerRegistry,
    id: &TriggerId,
    edit_buffer: Option<&SpatialCondition>,
) -> Option<SpatialPreview> {
    let TriggerCondition::Spatial(saved) = &triggers.get(id)?.condition else {
        return None;
    };

    let preview = edit_buffer
        .filter(|buffer| buffer.validate().is_ok())
        .and_then(SpatialCondition::region);

    Some(SpatialPreview {
        saved: saved.region()?,
        preview,
    })
}
