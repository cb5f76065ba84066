//! Key matrix: per-key colors and the row messages sent to the daemon.
//!
//! The daemon takes a custom frame one row at a time. Each row message is
//! `[row, start_col, end_col, r, g, b, r, g, b, ...]` with one RGB triple per
//! column from `start_col` to `end_col` inclusive. A frame only becomes visible
//! once `setCustom` is called after the rows.

use std::collections::BTreeMap;

use crate::color::RgbColor;
use crate::error::DeviceError;

/// Matrix dimensions of the Ornata
pub const ORNATA_ROWS: usize = 6;
pub const ORNATA_COLS: usize = 22;

/// Logical key groups used by themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Letters,
    FnKeys,
    Numerics,
    Symbols,
    Commandos,
    Actions,
    Cursor,
    Arrows,
    Special,
}

impl Region {
    pub const ALL: [Region; 9] = [
        Self::Letters,
        Self::FnKeys,
        Self::Numerics,
        Self::Symbols,
        Self::Commandos,
        Self::Actions,
        Self::Cursor,
        Self::Arrows,
        Self::Special,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Letters => "letters",
            Self::FnKeys => "fn-keys",
            Self::Numerics => "numerics",
            Self::Symbols => "symbols",
            Self::Commandos => "commandos",
            Self::Actions => "actions",
            Self::Cursor => "cursor",
            Self::Arrows => "arrows",
            Self::Special => "special",
        }
    }
}

/// Ornata region layout: (region, row, first col, last col), inclusive spans.
#[rustfmt::skip]
const ORNATA_LAYOUT: &[(Region, usize, usize, usize)] = &[
    (Region::FnKeys, 0, 2, 14),

    (Region::Letters, 2, 2, 11),
    (Region::Letters, 3, 2, 10),
    (Region::Letters, 4, 3, 9),

    (Region::Numerics, 1, 2, 11),
    (Region::Numerics, 2, 18, 20),
    (Region::Numerics, 3, 18, 20),
    (Region::Numerics, 4, 18, 20),
    (Region::Numerics, 5, 18, 19),

    (Region::Symbols, 1, 1, 1),
    (Region::Symbols, 1, 12, 13),
    (Region::Symbols, 2, 12, 13),
    (Region::Symbols, 3, 11, 13),
    (Region::Symbols, 4, 2, 2),
    (Region::Symbols, 4, 10, 12),
    (Region::Symbols, 1, 19, 21),
    (Region::Symbols, 2, 21, 21),
    (Region::Symbols, 5, 20, 20),

    (Region::Commandos, 2, 1, 1),
    (Region::Commandos, 3, 1, 1),
    (Region::Commandos, 4, 1, 1),
    (Region::Commandos, 4, 14, 14),
    (Region::Commandos, 5, 1, 3),
    (Region::Commandos, 5, 11, 14),

    (Region::Actions, 0, 1, 1),
    (Region::Actions, 1, 14, 14),
    (Region::Actions, 3, 14, 14),
    (Region::Actions, 5, 4, 10),
    (Region::Actions, 4, 21, 21),

    (Region::Cursor, 1, 15, 17),
    (Region::Cursor, 2, 15, 17),

    (Region::Arrows, 4, 16, 16),
    (Region::Arrows, 5, 15, 17),

    (Region::Special, 0, 15, 17),
    (Region::Special, 1, 18, 18),
];

/// A set of key positions `(row, col)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet(Vec<(usize, usize)>);

impl KeySet {
    pub fn positions(&self) -> &[(usize, usize)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn extend(&mut self, other: KeySet) {
        self.0.extend(other.0);
    }
}

/// Colors of every key on the keyboard, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMatrix {
    rows: usize,
    cols: usize,
    colors: Vec<RgbColor>,
    regions: BTreeMap<Region, KeySet>,
}

impl KeyMatrix {
    /// Create an all-black matrix.
    ///
    /// Known layouts (currently the 6×22 Ornata) get their key regions
    /// attached; other sizes have empty regions.
    pub fn new(rows: usize, cols: usize) -> Result<Self, DeviceError> {
        // Row index and last column travel as single bytes
        if !(1..=256).contains(&rows) || !(1..=256).contains(&cols) {
            return Err(DeviceError::InvalidParameter(format!(
                "matrix dimensions out of range: {rows}x{cols}"
            )));
        }

        let mut matrix = Self {
            rows,
            cols,
            colors: vec![RgbColor::BLACK; rows * cols],
            regions: BTreeMap::new(),
        };

        if rows == ORNATA_ROWS && cols == ORNATA_COLS {
            for &(region, row, start, end) in ORNATA_LAYOUT {
                let span = matrix.span(row, start, end);
                matrix.regions.entry(region).or_default().extend(span);
            }
        }

        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Color of a single key
    pub fn key(&self, row: usize, col: usize) -> Option<RgbColor> {
        self.index(row, col).map(|i| self.colors[i])
    }

    /// Set a single key
    pub fn set_key(&mut self, row: usize, col: usize, color: RgbColor) -> Result<(), DeviceError> {
        let i = self.index(row, col).ok_or_else(|| {
            DeviceError::InvalidParameter(format!(
                "key {row},{col} outside {}x{} matrix",
                self.rows, self.cols
            ))
        })?;
        self.colors[i] = color;
        Ok(())
    }

    /// Set every key to one color
    pub fn set_all(&mut self, color: RgbColor) {
        self.colors.fill(color);
    }

    /// Set every key of a column
    pub fn set_column(&mut self, col: usize, color: RgbColor) {
        if col >= self.cols {
            return;
        }
        for row in 0..self.rows {
            self.colors[row * self.cols + col] = color;
        }
    }

    /// Keys `start..=end` of a row, clipped to the matrix
    pub fn span(&self, row: usize, start: usize, end: usize) -> KeySet {
        if row >= self.rows || start >= self.cols {
            return KeySet::default();
        }
        let end = end.min(self.cols - 1);
        KeySet((start..=end).map(|col| (row, col)).collect())
    }

    /// Keys belonging to a region (empty for unknown layouts)
    pub fn region(&self, region: Region) -> KeySet {
        self.regions.get(&region).cloned().unwrap_or_default()
    }

    /// Whether this matrix carries region information
    pub fn has_layout(&self) -> bool {
        !self.regions.is_empty()
    }

    /// Set every key in a set to one color
    pub fn paint(&mut self, keys: &KeySet, color: RgbColor) {
        for &(row, col) in keys.positions() {
            if let Some(i) = self.index(row, col) {
                self.colors[i] = color;
            }
        }
    }

    /// Set every key in a region to one color
    pub fn paint_region(&mut self, region: Region, color: RgbColor) {
        let keys = self.region(region);
        self.paint(&keys, color);
    }

    /// Daemon message for one row
    pub fn row_message(&self, row: usize) -> Option<Vec<u8>> {
        if row >= self.rows {
            return None;
        }

        let mut msg = Vec::with_capacity(3 + self.cols * 3);
        msg.push(row as u8);
        msg.push(0);
        msg.push((self.cols - 1) as u8);

        let start = row * self.cols;
        for color in &self.colors[start..start + self.cols] {
            msg.extend_from_slice(&color.to_bytes());
        }

        Some(msg)
    }

    /// Daemon messages for all rows, top row first
    pub fn row_messages(&self) -> Vec<Vec<u8>> {
        (0..self.rows).filter_map(|row| self.row_message(row)).collect()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ornata() -> KeyMatrix {
        KeyMatrix::new(ORNATA_ROWS, ORNATA_COLS).unwrap()
    }

    #[test]
    fn test_new_is_black() {
        let m = KeyMatrix::new(2, 3).unwrap();
        assert_eq!(m.key(1, 2), Some(RgbColor::BLACK));
        assert_eq!(m.key(2, 0), None);
        assert_eq!(m.key(0, 3), None);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(KeyMatrix::new(0, 22).is_err());
        assert!(KeyMatrix::new(6, 0).is_err());
        assert!(KeyMatrix::new(6, 257).is_err());
    }

    #[test]
    fn test_span_inclusive_and_clipped() {
        let m = ornata();
        assert_eq!(m.span(0, 2, 4).positions(), &[(0, 2), (0, 3), (0, 4)]);
        assert_eq!(m.span(1, 20, 30).positions(), &[(1, 20), (1, 21)]);
        assert!(m.span(6, 0, 3).is_empty());
        assert!(m.span(0, 22, 23).is_empty());
    }

    #[test]
    fn test_ornata_region_sizes() {
        let m = ornata();
        let size = |r| m.region(r).len();
        assert_eq!(size(Region::FnKeys), 13);
        assert_eq!(size(Region::Letters), 26);
        assert_eq!(size(Region::Numerics), 21);
        assert_eq!(size(Region::Symbols), 17);
        assert_eq!(size(Region::Commandos), 11);
        assert_eq!(size(Region::Actions), 11);
        assert_eq!(size(Region::Cursor), 6);
        assert_eq!(size(Region::Arrows), 4);
        assert_eq!(size(Region::Special), 4);
    }

    #[test]
    fn test_ornata_regions_do_not_overlap() {
        let m = ornata();
        let mut seen = std::collections::HashSet::new();
        for region in Region::ALL {
            for pos in m.region(region).positions() {
                assert!(seen.insert(*pos), "{pos:?} in more than one region");
            }
        }
    }

    #[test]
    fn test_other_layouts_have_no_regions() {
        let m = KeyMatrix::new(6, 16).unwrap();
        assert!(!m.has_layout());
        assert!(m.region(Region::Letters).is_empty());
        assert!(ornata().has_layout());
    }

    #[test]
    fn test_paint_region() {
        let mut m = ornata();
        m.paint_region(Region::Arrows, RgbColor::BLUE);
        assert_eq!(m.key(4, 16), Some(RgbColor::BLUE));
        assert_eq!(m.key(5, 15), Some(RgbColor::BLUE));
        assert_eq!(m.key(4, 15), Some(RgbColor::BLACK));
    }

    #[test]
    fn test_set_key_out_of_range() {
        let mut m = KeyMatrix::new(2, 2).unwrap();
        assert!(m.set_key(1, 1, RgbColor::RED).is_ok());
        assert!(matches!(
            m.set_key(2, 0, RgbColor::RED),
            Err(DeviceError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_set_column() {
        let mut m = KeyMatrix::new(3, 2).unwrap();
        m.set_column(1, RgbColor::GREEN);
        m.set_column(5, RgbColor::RED);
        for row in 0..3 {
            assert_eq!(m.key(row, 0), Some(RgbColor::BLACK));
            assert_eq!(m.key(row, 1), Some(RgbColor::GREEN));
        }
    }

    #[test]
    fn test_row_message_layout() {
        let mut m = KeyMatrix::new(2, 3).unwrap();
        m.set_key(1, 0, RgbColor::new(1, 2, 3)).unwrap();
        m.set_key(1, 2, RgbColor::new(7, 8, 9)).unwrap();

        assert_eq!(
            m.row_message(1).unwrap(),
            vec![1, 0, 2, 1, 2, 3, 0, 0, 0, 7, 8, 9]
        );
        assert_eq!(m.row_message(0).unwrap(), vec![0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(m.row_message(2), None);
    }

    #[test]
    fn test_row_messages_cover_ornata() {
        let mut m = ornata();
        m.set_all(RgbColor::WHITE);
        let rows = m.row_messages();
        assert_eq!(rows.len(), 6);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 3 + 22 * 3);
            assert_eq!(&row[..3], &[i as u8, 0, 21]);
            assert!(row[3..].iter().all(|&b| b == 255));
        }
    }
}
