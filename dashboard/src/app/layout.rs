//! Layout engine
//!
//! Picks a column count from viewport width and distributes items into
//! masonry columns without reordering them.

/// Every Nth item (by arrival index) is featured and may span two columns
pub const FEATURED_EVERY: usize = 5;

/// Vertical gap applied to odd rows, in pixels
pub const ODD_ROW_GAP_PX: u32 = 8;

/// Ordered `(min_width -> columns)` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBreakpoints {
    /// Sorted by ascending min width
    breakpoints: Vec<(u32, usize)>,
    default_columns: usize,
}

impl ColumnBreakpoints {
    /// Build a table. Column counts below 1 are raised to 1.
    pub fn new(default_columns: usize, breakpoints: impl IntoIterator<Item = (u32, usize)>) -> Self {
        let mut breakpoints: Vec<(u32, usize)> = breakpoints
            .into_iter()
            .map(|(width, columns)| (width, columns.max(1)))
            .collect();
        breakpoints.sort_by_key(|(width, _)| *width);
        breakpoints.dedup_by_key(|(width, _)| *width);

        Self {
            breakpoints,
            default_columns: default_columns.max(1),
        }
    }

    /// 4K: 5, 1080p: 4, desktop: 3, tablet landscape: 2, mobile: 1
    pub fn standard() -> Self {
        Self::new(
            1,
            [(2560, 5), (1920, 4), (1440, 3), (1024, 2), (768, 1)],
        )
    }

    /// Largest breakpoint not exceeding `width` wins
    pub fn columns_for(&self, width: u32) -> usize {
        self.breakpoints
            .iter()
            .rev()
            .find(|(min_width, _)| *min_width <= width)
            .map(|(_, columns)| *columns)
            .unwrap_or(self.default_columns)
    }
}

impl Default for ColumnBreakpoints {
    fn default() -> Self {
        Self::standard()
    }
}

/// Round-robin items into `columns` columns, keeping each item's arrival index.
/// Within a column items stay in arrival order.
pub fn distribute<T>(items: &[T], columns: usize) -> Vec<Vec<(usize, &T)>> {
    let columns = columns.max(1);
    let mut out: Vec<Vec<(usize, &T)>> = (0..columns).map(|_| Vec::new()).collect();
    for (index, item) in items.iter().enumerate() {
        out[index % columns].push((index, item));
    }
    out
}

pub fn is_featured(index: usize) -> bool {
    index % FEATURED_EVERY == 0
}

/// Alternating row gap: even rows 0, odd rows `ODD_ROW_GAP_PX`
pub fn row_gap(index: usize, columns: usize) -> u32 {
    let row = index / columns.max(1);
    if row % 2 == 0 {
        0
    } else {
        ODD_ROW_GAP_PX
    }
}
