//! A1-style cell references.

use std::fmt;

/// Number of columns in an Excel 2007+ worksheet (A..XFD).
pub const MAX_COLUMNS: usize = 16_384;

/// Number of rows in an Excel 2007+ worksheet.
pub const MAX_ROWS: usize = 1_048_576;

/// Zero-based position of a cell within a worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub col: usize,
    pub row: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Parse a reference such as `B7` or `$AA$10`.
    ///
    /// Returns `None` for malformed input or positions outside the worksheet
    /// limits.
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        let split = reference
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit())
            .map(|(i, _)| i)?;
        let (letters, digits) = reference.split_at(split);
        let letters = letters.trim_matches('$');
        if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
            return None;
        }

        let col = column_index(letters)?;
        let row = digits.parse::<usize>().ok()?.checked_sub(1)?;
        (row < MAX_ROWS).then_some(Self { col, row })
    }

    /// Letters of a zero-based column index (0 -> A, 26 -> AA).
    pub fn column_letters(col: usize) -> String {
        let mut letters = Vec::new();
        let mut n = col + 1;
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        String::from_utf8_lossy(&letters).into_owned()
    }
}

/// Zero-based index of a column given in letters, `None` past XFD.
fn column_index(letters: &str) -> Option<usize> {
    let mut acc = 0usize;
    for b in letters.bytes() {
        let digit = (b.to_ascii_uppercase() - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
        if acc > MAX_COLUMNS {
            return None;
        }
    }
    acc.checked_sub(1)
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_letters(self.col), self.row + 1)
    }
}
