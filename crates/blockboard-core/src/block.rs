//! Content blocks placed on the canvas.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default size of a freshly added block, in canvas pixels.
pub const DEFAULT_BLOCK_SIZE: Size = Size::new(300.0, 200.0);

/// Offset applied to a duplicated block, in canvas pixels.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Unique identifier for a block.
///
/// Stored as a plain string so records written by other clients keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BlockId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The kind of content a block holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Text,
    Image,
    File,
    Link,
}

/// A positioned, resizable content card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique identifier.
    pub id: BlockId,
    /// Content kind.
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Content shown in the block's editor.
    pub content: String,
    /// Top-left corner in canvas coordinates.
    pub position: Point,
    /// Size in canvas pixels.
    pub size: Size,
}

impl Block {
    /// Create an empty text block with its top-left corner at `position`.
    pub fn new_text(position: Point) -> Self {
        Self {
            id: BlockId::new(),
            kind: BlockKind::Text,
            content: String::new(),
            position,
            size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Create an empty text block of the default size centred on `center`.
    pub fn centered_at(center: Point) -> Self {
        let position = Point::new(
            center.x - DEFAULT_BLOCK_SIZE.width / 2.0,
            center.y - DEFAULT_BLOCK_SIZE.height / 2.0,
        );
        Self::new_text(position)
    }

    /// Bounding rectangle in canvas coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Centre point in canvas coordinates.
    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Clone this block under a new id, shifted by [`DUPLICATE_OFFSET`].
    pub fn duplicate(&self) -> Self {
        Self {
            id: BlockId::new(),
            position: self.position + DUPLICATE_OFFSET,
            ..self.clone()
        }
    }
}
