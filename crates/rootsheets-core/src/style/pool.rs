//! Style pool for deduplication

use super::Style;
use ahash::AHashMap;

/// Interns the styles used by one worksheet
///
/// Cells reference styles by index; index 0 is always the default style.
/// Every header cell of a sheet shares one bold/centered entry.
#[derive(Debug)]
pub struct StylePool {
    styles: Vec<Style>,
    index_map: AHashMap<Style, u32>,
}

impl StylePool {
    /// Create a pool holding only the default style
    pub fn new() -> Self {
        let default = Style::default();
        let mut index_map = AHashMap::with_capacity(8);
        index_map.insert(default.clone(), 0);
        Self {
            styles: vec![default],
            index_map,
        }
    }

    /// Index of `style`, inserting it if new
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        if let Some(&idx) = self.index_map.get(&style) {
            return idx;
        }
        let idx = self.styles.len() as u32;
        self.index_map.insert(style.clone(), idx);
        self.styles.push(style);
        idx
    }

    /// Get a style by index
    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Number of styles, default included
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// True when only the default style is present
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::HorizontalAlignment;

    #[test]
    fn test_default_style() {
        let pool = StylePool::new();
        assert_eq!(pool.len(), 1);
        assert!(pool.is_empty());
        assert_eq!(pool.get(0), Some(&Style::default()));
    }

    #[test]
    fn test_deduplication() {
        let mut pool = StylePool::new();
        let header = Style::new()
            .bold(true)
            .horizontal_alignment(HorizontalAlignment::Center);

        let idx1 = pool.get_or_insert(header.clone());
        let idx2 = pool.get_or_insert(header);
        let idx3 = pool.get_or_insert(Style::new().bold(true));

        assert_eq!(idx1, 1);
        assert_eq!(idx1, idx2);
        assert_ne!(idx1, idx3);
        assert_eq!(pool.get_or_insert(Style::default()), 0);
        assert_eq!(pool.len(), 3);
    }
}
