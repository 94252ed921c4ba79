//! Viewport selection model

/// Kind of sketch entity a selection row refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Point,
    Line,
    Arc,
    Circle,
}

/// One selected entity, as reported by the viewport
///
/// The id is kept as the raw string the viewport produced; it is
/// validated when the selection is acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEntity {
    pub kind: EntityKind,
    pub id: String,
}

impl SelectedEntity {
    /// Create a selection row
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}
