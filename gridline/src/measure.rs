//! Text measurement for column auto-sizing.

use unicode_width::UnicodeWidthStr;

/// Measures the rendered width of cell text in pixels.
///
/// Hosts with a real text layout engine implement this over it; the grid
/// only needs widths to be comparable across cells of one column.
pub trait TextMeasurer {
    /// Width of a header cell showing `label`.
    fn header_width(&self, label: &str) -> f64;

    /// Width of a body cell showing `text`.
    fn cell_width(&self, text: &str) -> f64;
}

/// Monospace measurer: display columns from `unicode-width` times a fixed
/// advance, plus horizontal cell padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub char_width: f64,
    pub cell_padding: f64,
    /// Extra header room for the sort indicator and menu affordance.
    pub header_extra: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            cell_padding: 16.0,
            header_extra: 20.0,
        }
    }
}

impl MonospaceMeasurer {
    pub fn new(char_width: f64) -> Self {
        Self {
            char_width,
            ..Self::default()
        }
    }

    fn text_width(&self, text: &str) -> f64 {
        text.width() as f64 * self.char_width
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn header_width(&self, label: &str) -> f64 {
        self.text_width(label) + self.cell_padding + self.header_extra
    }

    fn cell_width(&self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        self.text_width(text) + self.cell_padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_characters_count_double() {
        let measurer = MonospaceMeasurer::new(10.0);
        assert_eq!(measurer.cell_width("ab"), 36.0);
        assert_eq!(measurer.cell_width("日本"), 56.0);
        assert_eq!(measurer.cell_width(""), 0.0);
    }
}
