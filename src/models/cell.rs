use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Cell {
    pub row: u32,
    pub column: u32,
    pub value: String,
}

impl Cell {
    pub fn new(row: u32, column: u32, value: impl Into<String>) -> Self {
        Self {
            row,
            column,
            value: value.into(),
        }
    }

    /// A1 position of the cell, e.g. `AB3` for row 2, column 27.
    pub fn pos(&self) -> String {
        format!("{}{}", column_letters(self.column), self.row + 1)
    }
}

/// Bijective base-26 column name: 0 is `A`, 25 is `Z`, 26 is `AA`.
pub fn column_letters(column: u32) -> String {
    let mut n = column as u64 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Parse an A1 position into zero-based `(row, column)`.
pub fn parse_position(pos: &str) -> Result<(u32, u32)> {
    let invalid = || AppError::InvalidRequest(format!("invalid cell position {:?}", pos));

    let split = pos
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (letters, digits) = pos.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }

    let mut column: u64 = 0;
    for c in letters.chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as u64 + 1;
        column = column * 26 + digit;
        if column > u32::MAX as u64 {
            return Err(invalid());
        }
    }

    let row: u32 = digits.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }

    Ok((row - 1, (column - 1) as u32))
}
