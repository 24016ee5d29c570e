use serde::{Deserialize, Serialize};

/// Color given to every freshly partitioned cell.
pub const DEFAULT_COLOR: &str = "#ff0000";

/// Capacity given to every freshly partitioned cell.
pub const DEFAULT_CAPACITY: u32 = 1;

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_capacity() -> u32 {
    DEFAULT_CAPACITY
}

/// One addressable, reservable unit of the partition.
///
/// Serialized with the camelCase keys of the persisted layout
/// (`reservedBy`). Fields the minimal variant never wrote
/// (`color`, `tags`, `capacity`) fall back to their defaults on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub id: usize,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub reserved_by: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

impl Cell {
    /// A defaulted cell at position `id`.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            details: String::new(),
            reserved: false,
            reserved_by: String::new(),
            color: default_color(),
            tags: Vec::new(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// `reserved` and `reserved_by` agree: reserved iff an owner is recorded.
    pub fn reservation_consistent(&self) -> bool {
        self.reserved == !self.reserved_by.is_empty()
    }

    /// Tags joined for display and export.
    pub fn tags_display(&self) -> String {
        self.tags.join(", ")
    }

    /// 1-based number shown to people ("Square 1" is id 0).
    pub fn display_number(&self) -> usize {
        self.id + 1
    }

    /// Case-insensitive containment over details, tags and owner.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.details.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
            || self.reserved_by.to_lowercase().contains(needle)
    }

    pub(crate) fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Details(details) => self.details = details,
            FieldUpdate::Color(color) => self.color = color,
            FieldUpdate::Tags(raw) => self.tags = parse_tags(&raw),
            FieldUpdate::Capacity(capacity) => self.capacity = capacity,
        }
    }
}

/// Editable annotation fields of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellField {
    Details,
    Color,
    Tags,
    Capacity,
}

impl CellField {
    pub fn name(&self) -> &'static str {
        match self {
            CellField::Details => "details",
            CellField::Color => "color",
            CellField::Tags => "tags",
            CellField::Capacity => "capacity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "details" => Some(CellField::Details),
            "color" | "colour" => Some(CellField::Color),
            "tags" => Some(CellField::Tags),
            "capacity" => Some(CellField::Capacity),
            _ => None,
        }
    }
}

/// A new value for one annotation field.
///
/// `Tags` carries the raw comma-delimited input; splitting happens when the
/// update is applied. `Capacity` is already parsed: non-numeric input is
/// rejected before it gets here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Details(String),
    Color(String),
    Tags(String),
    Capacity(u32),
}

impl FieldUpdate {
    pub fn field(&self) -> CellField {
        match self {
            FieldUpdate::Details(_) => CellField::Details,
            FieldUpdate::Color(_) => CellField::Color,
            FieldUpdate::Tags(_) => CellField::Tags,
            FieldUpdate::Capacity(_) => CellField::Capacity,
        }
    }
}

/// Split a comma-delimited tag string.
///
/// Parts are trimmed and empty parts dropped. Order and duplicates are kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
