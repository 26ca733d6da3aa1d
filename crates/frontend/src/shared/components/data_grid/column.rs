#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

/// Описание колонки сетки
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataGridColumn {
    /// Key passed to the cell renderer
    pub field: &'static str,
    pub title: &'static str,
    /// Relative width; columns without a weight shrink to their content
    pub width: Option<u8>,
    /// Column keeps its width instead of stretching with the table
    pub fixed: bool,
    pub text_align: TextAlign,
}

impl DataGridColumn {
    pub fn class(&self) -> String {
        let mut class = format!("data-grid__cell data-grid__cell--{}", self.field);
        if self.fixed {
            class.push_str(" data-grid__cell--fixed");
        }
        if self.text_align == TextAlign::Right {
            class.push_str(" data-grid__cell--right");
        }
        class
    }

    /// Share of the table width for weighted columns
    pub fn style(&self, total_weight: u32) -> String {
        match self.width {
            Some(w) if total_weight > 0 => {
                format!("width: {:.2}%;", f64::from(w) * 100.0 / f64::from(total_weight))
            }
            _ => "width: 1%; white-space: nowrap;".to_string(),
        }
    }
}

pub fn total_weight(columns: &[DataGridColumn]) -> u32 {
    columns.iter().filter_map(|c| c.width).map(u32::from).sum()
}
