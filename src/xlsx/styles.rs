//! Cell formatting resolved down to what the timetable needs: fill colour.
//!
//! A cell's `s` attribute indexes `cellXfs`; each `xf` names a `fillId`
//! into the `fills` list. Fonts, borders and number formats are not kept.

use crate::sheet::Color;

/// Fill-related part of `xl/styles.xml`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styles {
    /// Pattern foreground colour of each `<fill>`, in document order
    pub fills: Vec<Option<Color>>,
    /// `fillId` of each `<xf>` in `cellXfs`, in document order
    pub cell_xfs: Vec<Option<u32>>,
}

impl Styles {
    /// Create an empty style table; every lookup yields no fill.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the fill colour for a cell style index.
    pub fn fill_for_style(&self, style_index: u32) -> Option<Color> {
        let fill_id = self
            .cell_xfs
            .get(usize::try_from(style_index).ok()?)
            .copied()
            .flatten()?;
        self.fills
            .get(usize::try_from(fill_id).ok()?)
            .copied()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_for_style() {
        let styles = Styles {
            fills: vec![None, None, Some(Color::Argb(0xFF00FF00))],
            cell_xfs: vec![Some(0), Some(2), None, Some(9)],
        };
        assert_eq!(styles.fill_for_style(0), None);
        assert_eq!(styles.fill_for_style(1), Some(Color::Argb(0xFF00FF00)));
        assert_eq!(styles.fill_for_style(2), None);
        assert_eq!(styles.fill_for_style(3), None);
        assert_eq!(styles.fill_for_style(42), None);
        assert_eq!(Styles::new().fill_for_style(0), None);
    }
}
