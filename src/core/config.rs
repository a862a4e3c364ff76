//! Diagram configuration: block dimensions, viewport and relationship policy.
//!
//! Defaults match the built-in block size. Hosts may override them with
//! `DiagramConfig::from_env()` after calling `dotenvy::dotenv()`.

use crate::core::geometry::{Position, Rect};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the placement viewport width
pub const VIEWPORT_WIDTH_VAR: &str = "SCHEMASKETCH_VIEWPORT_WIDTH";
/// Environment variable overriding the placement viewport height
pub const VIEWPORT_HEIGHT_VAR: &str = "SCHEMASKETCH_VIEWPORT_HEIGHT";
/// Environment variable enabling strict relationship validation
pub const STRICT_RELATIONSHIPS_VAR: &str = "SCHEMASKETCH_STRICT_RELATIONSHIPS";

/// Largest viewport side accepted from configuration or the host, in pixels
pub const MAX_VIEWPORT_EXTENT: f64 = 100_000.0;

/// Fixed dimensions of a rendered table block.
///
/// Shared by the placement engine (footprint of a block) and the renderer
/// (where relationship lines attach).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockDimensions {
    pub width: f64,
    pub height: f64,
    /// Space left between neighbouring grid slots
    pub gap: f64,
    /// Distance of the first grid slot from the canvas edge
    pub padding: f64,
    /// Offset from the block top to the first column's attach point
    pub header_height: f64,
    /// Vertical distance between consecutive columns
    pub row_height: f64,
}

impl Default for BlockDimensions {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 160.0,
            gap: 20.0,
            padding: 10.0,
            header_height: 48.0,
            row_height: 24.0,
        }
    }
}

impl BlockDimensions {
    /// Footprint of a block whose top-left corner sits at `position`
    pub fn rect_at(&self, position: Position) -> Rect {
        Rect::new(position, self.width, self.height)
    }

    /// Position used when no free grid slot is left
    pub fn fallback_position(&self) -> Position {
        Position::new(self.padding, self.padding)
    }

    /// Vertical offset of a column's attach point from the block top
    pub fn column_offset(&self, column_index: usize) -> f64 {
        self.header_height + column_index as f64 * self.row_height
    }

    /// Height of the drawn header bar; half a row short of `header_height`
    /// so the first attach point lands on the first row's centre
    pub fn header_bar_height(&self) -> f64 {
        (self.header_height - self.row_height / 2.0).max(0.0)
    }
}

/// Visible canvas area that automatic placement tiles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite, positive and at most [`MAX_VIEWPORT_EXTENT`]
    pub fn is_usable(&self) -> bool {
        is_usable_extent(self.width) && is_usable_extent(self.height)
    }
}

fn is_usable_extent(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= MAX_VIEWPORT_EXTENT
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// How strictly new relationships are checked before they are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RelationshipPolicy {
    /// Accept any link between placed tables, duplicates included
    #[default]
    Permissive,
    /// Require existing columns and reject self-links and duplicates,
    /// mirrored ones included
    Strict,
}

impl RelationshipPolicy {
    pub fn is_strict(self) -> bool {
        self == RelationshipPolicy::Strict
    }
}

/// Complete configuration of a diagram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramConfig {
    pub dimensions: BlockDimensions,
    pub viewport: Viewport,
    pub relationship_policy: RelationshipPolicy,
}

impl DiagramConfig {
    /// Load configuration overrides from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing keys keep their defaults; malformed values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(width) = parse_dimension(&lookup, VIEWPORT_WIDTH_VAR) {
            config.viewport.width = width;
        }
        if let Some(height) = parse_dimension(&lookup, VIEWPORT_HEIGHT_VAR) {
            config.viewport.height = height;
        }
        if let Some(raw) = lookup(STRICT_RELATIONSHIPS_VAR) {
            match parse_flag(&raw) {
                Some(true) => config.relationship_policy = RelationshipPolicy::Strict,
                Some(false) => config.relationship_policy = RelationshipPolicy::Permissive,
                None => tracing::warn!(
                    "Ignoring {}={:?}: expected true/false",
                    STRICT_RELATIONSHIPS_VAR,
                    raw
                ),
            }
        }

        config
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_relationship_policy(mut self, policy: RelationshipPolicy) -> Self {
        self.relationship_policy = policy;
        self
    }
}

fn parse_dimension(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if is_usable_extent(value) => Some(value),
        _ => {
            tracing::warn!(
                "Ignoring {}={:?}: expected a positive number up to {}",
                key,
                raw,
                MAX_VIEWPORT_EXTENT
            );
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
