use crate::error::{IngestError, Result};

// One fixed-width column: a constant character offset and width into a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

impl FieldSlot {
    pub const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        FieldSlot {
            name,
            offset,
            width,
        }
    }

    pub const fn shifted(self, by: usize) -> Self {
        FieldSlot {
            name: self.name,
            offset: self.offset + by,
            width: self.width,
        }
    }

    /// Extract and trim this slot's substring from a line.
    pub fn get<'a>(&self, line: &'a str) -> Result<&'a str> {
        slice(line, self.offset, self.width)
            .ok_or(IngestError::LineTooShort {
                field: self.name,
                offset: self.offset,
            })
            .map(str::trim)
    }

    pub fn get_int(&self, line: &str) -> Result<i32> {
        let raw = self.get(line)?;
        raw.parse::<i32>().map_err(|_| IngestError::FieldParse {
            field: self.name,
            offset: self.offset,
            value: raw.to_string(),
            expected: "integer",
        })
    }

    pub fn get_double(&self, line: &str) -> Result<f64> {
        let raw = self.get(line)?;
        raw.parse::<f64>().map_err(|_| IngestError::FieldParse {
            field: self.name,
            offset: self.offset,
            value: raw.to_string(),
            expected: "real",
        })
    }
}

/// Slice `width` characters starting at `offset`, clamped to the line end.
/// Returns None when the line ends before the slot starts.
pub fn slice(line: &str, offset: usize, width: usize) -> Option<&str> {
    if offset >= line.len() {
        return None;
    }
    let end = line.len().min(offset + width);
    line.get(offset..end)
}

/// Parse one dynamic value column (unnamed slot) as a real number.
pub fn parse_double_at(line: &str, offset: usize, width: usize) -> Result<f64> {
    let raw = slice(line, offset, width)
        .ok_or(IngestError::LineTooShort {
            field: "value",
            offset,
        })?
        .trim();
    raw.parse::<f64>().map_err(|_| IngestError::FieldParse {
        field: "value",
        offset,
        value: raw.to_string(),
        expected: "real",
    })
}
