//! Board geometry: sizes, strips, row ordering and edge extras.

use serde::{Deserialize, Serialize};

/// Every board is composed from up to three editable strips.
pub const STRIP_COUNT: usize = 3;

/// One grid cell: a wood-token identifier, or empty.
pub type WoodCell = Option<String>;

/// Fixed board sizes. Columns and physical row counts are intrinsic to the
/// size, never stored per layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardSize {
    Small,
    #[default]
    Regular,
    Large,
}

impl BoardSize {
    /// Cells per strip.
    pub const fn columns(self) -> usize {
        match self {
            BoardSize::Small => 10,
            BoardSize::Regular => 12,
            BoardSize::Large => 14,
        }
    }

    /// Physical rows on the finished board.
    pub const fn rows(self) -> usize {
        match self {
            BoardSize::Small => 8,
            BoardSize::Regular => 10,
            BoardSize::Large => 12,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "small" => Some(BoardSize::Small),
            "regular" => Some(BoardSize::Regular),
            "large" => Some(BoardSize::Large),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BoardSize::Small => "small",
            BoardSize::Regular => "regular",
            BoardSize::Large => "large",
        }
    }
}

/// Which strip a physical row displays, and whether it is mirrored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowOrder {
    /// 1-based strip number; strip 3 is valid only when the owning
    /// configuration enables it.
    pub strip_no: u8,
    pub reflected: bool,
}

impl RowOrder {
    pub fn new(strip_no: u8, reflected: bool) -> Self {
        Self { strip_no, reflected }
    }

    /// Clamp a strip number into the active range.
    pub fn clamp_strip(strip_no: u8, strip3_enabled: bool) -> u8 {
        let max = if strip3_enabled { 3 } else { 2 };
        strip_no.clamp(1, max)
    }
}

/// The editable state of one board: 3 strips of cells plus the per-row
/// strip assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLayout {
    /// Always exactly [`STRIP_COUNT`] rows, each `columns(size)` cells wide.
    pub strips: Vec<Vec<WoodCell>>,
    /// One entry per physical board row.
    pub order: Vec<RowOrder>,
}

impl BoardLayout {
    /// A blank layout for `size`: empty strips and the alternating default
    /// row order.
    pub fn blank(size: BoardSize) -> Self {
        Self {
            strips: vec![vec![None; size.columns()]; STRIP_COUNT],
            order: Self::default_order(size),
        }
    }

    /// Default row order: strips 1 and 2 alternating, never reflected.
    pub fn default_order(size: BoardSize) -> Vec<RowOrder> {
        (0..size.rows())
            .map(|row| RowOrder::new(if row % 2 == 0 { 1 } else { 2 }, false))
            .collect()
    }

    /// Uniform column count across strips. Zero for a degenerate layout.
    pub fn columns(&self) -> usize {
        self.strips.first().map(Vec::len).unwrap_or(0)
    }

    /// Strip indexes that count toward pricing and painting.
    pub fn active_strips(strip3_enabled: bool) -> std::ops::Range<usize> {
        0..if strip3_enabled { 3 } else { 2 }
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        BoardLayout::blank(BoardSize::default())
    }
}

/// Edge treatment for the finished board. Geometry only; priced flat by the
/// extras table, not per profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeProfile {
    #[default]
    Square,
    Roundover,
    Chamfer,
}

impl EdgeProfile {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "square" => Some(EdgeProfile::Square),
            "roundover" => Some(EdgeProfile::Roundover),
            "chamfer" => Some(EdgeProfile::Chamfer),
            _ => None,
        }
    }
}

/// Optional board add-ons.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardExtras {
    pub edge_profile: EdgeProfile,
    /// Roundover radius in millimetres; meaningful only for `Roundover`.
    #[serde(default)]
    pub border_radius: u32,
    /// Chamfer width in millimetres; meaningful only for `Chamfer`.
    #[serde(default)]
    pub chamfer_size: u32,
    #[serde(default)]
    pub groove_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_layout_dimensions() {
        let layout = BoardLayout::blank(BoardSize::Small);
        assert_eq!(layout.strips.len(), STRIP_COUNT);
        assert!(layout.strips.iter().all(|s| s.len() == 10));
        assert_eq!(layout.order.len(), 8);
    }

    #[test]
    fn test_default_order_alternates() {
        let order = BoardLayout::default_order(BoardSize::Regular);
        assert_eq!(order.len(), 10);
        assert_eq!(order[0].strip_no, 1);
        assert_eq!(order[1].strip_no, 2);
        assert_eq!(order[2].strip_no, 1);
        assert!(order.iter().all(|o| !o.reflected));
    }

    #[test]
    fn test_clamp_strip() {
        assert_eq!(RowOrder::clamp_strip(3, false), 2);
        assert_eq!(RowOrder::clamp_strip(3, true), 3);
        assert_eq!(RowOrder::clamp_strip(0, false), 1);
        assert_eq!(RowOrder::clamp_strip(9, true), 3);
    }

    #[test]
    fn test_size_parse_round_trip() {
        for size in [BoardSize::Small, BoardSize::Regular, BoardSize::Large] {
            assert_eq!(BoardSize::parse(size.as_str()), Some(size));
        }
        assert_eq!(BoardSize::parse("jumbo"), None);
    }
}
