use crate::models::cell::Cell;
use crate::models::properties::SheetProperties;
use serde::Deserialize;
use std::collections::BTreeSet;

/// A sheet of a fetched spreadsheet.
///
/// Cell edits are local until the sheet is synced. The sheet tracks which
/// cells were modified and how large the grid has to grow to hold them; both
/// are reset once a sync succeeds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawSheet")]
pub struct Sheet {
    pub properties: SheetProperties,
    spreadsheet_id: String,
    rows: Vec<Vec<Cell>>,
    modified: BTreeSet<(u32, u32)>,
    new_max_row: u32,
    new_max_column: u32,
}

// https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets/sheets
#[derive(Debug, Deserialize)]
struct RawSheet {
    #[serde(default)]
    properties: SheetProperties,
    #[serde(default)]
    data: Vec<GridData>,
}

#[derive(Debug, Deserialize)]
struct GridData {
    #[serde(default, rename = "rowData")]
    row_data: Vec<RowData>,
}

#[derive(Debug, Deserialize)]
struct RowData {
    #[serde(default)]
    values: Vec<CellData>,
}

#[derive(Debug, Deserialize)]
struct CellData {
    #[serde(default, rename = "formattedValue")]
    formatted_value: Option<String>,
}

impl From<RawSheet> for Sheet {
    fn from(raw: RawSheet) -> Self {
        // Without explicit ranges the API returns a single GridData anchored at A1
        let rows = raw
            .data
            .into_iter()
            .next()
            .map(|grid| {
                grid.row_data
                    .into_iter()
                    .enumerate()
                    .map(|(r, row)| {
                        row.values
                            .into_iter()
                            .enumerate()
                            .map(|(c, cell)| {
                                Cell::new(r as u32, c as u32, cell.formatted_value.unwrap_or_default())
                            })
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut sheet = Sheet::new(String::new(), raw.properties);
        sheet.rows = rows;
        sheet
    }
}

impl Sheet {
    pub fn new(spreadsheet_id: impl Into<String>, properties: SheetProperties) -> Self {
        let grid = properties.grid_properties;
        Self {
            properties,
            spreadsheet_id: spreadsheet_id.into(),
            rows: Vec::new(),
            modified: BTreeSet::new(),
            new_max_row: grid.row_count,
            new_max_column: grid.column_count,
        }
    }

    pub fn id(&self) -> i32 {
        self.properties.sheet_id
    }

    pub fn title(&self) -> &str {
        &self.properties.title
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub(crate) fn set_spreadsheet_id(&mut self, id: &str) {
        self.spreadsheet_id = id.to_string();
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: u32, column: u32) -> Option<&Cell> {
        self.rows
            .get(row as usize)
            .and_then(|cells| cells.get(column as usize))
    }

    /// Set a cell value locally and mark it for the next sync.
    pub fn update(&mut self, row: u32, column: u32, value: impl Into<String>) {
        let (r, c) = (row as usize, column as usize);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let cells = &mut self.rows[r];
        while cells.len() <= c {
            cells.push(Cell::new(row, cells.len() as u32, ""));
        }
        cells[c].value = value.into();

        self.modified.insert((row, column));
        self.new_max_row = self.new_max_row.max(row.saturating_add(1));
        self.new_max_column = self.new_max_column.max(column.saturating_add(1));
    }

    pub fn modified_cells(&self) -> impl Iterator<Item = &Cell> {
        self.modified
            .iter()
            .filter_map(|&(row, column)| self.cell(row, column))
    }

    /// Grid size the sheet needs on the server, as `(rows, columns)`.
    pub fn pending_size(&self) -> (u32, u32) {
        (self.new_max_row, self.new_max_column)
    }

    pub fn needs_expansion(&self) -> bool {
        let grid = &self.properties.grid_properties;
        self.new_max_row > grid.row_count || self.new_max_column > grid.column_count
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.modified.is_empty() || self.needs_expansion()
    }

    pub(crate) fn mark_synced(&mut self) {
        self.modified.clear();
        self.new_max_row = self.properties.grid_properties.row_count;
        self.new_max_column = self.properties.grid_properties.column_count;
    }

    /// Swap in server-confirmed properties, keeping room for unsynced edits.
    pub(crate) fn replace_properties(&mut self, properties: SheetProperties) {
        self.properties = properties;
        self.reserve_for_edits();
    }

    /// Record a server-confirmed grid size. Edits outside it still need room.
    pub(crate) fn set_grid_size(&mut self, rows: u32, columns: u32) {
        self.properties.grid_properties.row_count = rows;
        self.properties.grid_properties.column_count = columns;
        self.reserve_for_edits();
    }

    fn reserve_for_edits(&mut self) {
        let grid = self.properties.grid_properties;
        let edited_rows = self.modified.iter().map(|&(r, _)| r.saturating_add(1)).max();
        let edited_columns = self.modified.iter().map(|&(_, c)| c.saturating_add(1)).max();
        self.new_max_row = grid.row_count.max(edited_rows.unwrap_or(0));
        self.new_max_column = grid.column_count.max(edited_columns.unwrap_or(0));
    }

    /// Drop rows `[start, end)` from the local model, shifting later rows up.
    /// Only the part of the range inside the grid is counted.
    pub(crate) fn remove_rows(&mut self, start: u32, end: u32) {
        let grid = &mut self.properties.grid_properties;
        let count = end.min(grid.row_count).saturating_sub(start);
        grid.row_count -= count;
        self.new_max_row = self.new_max_row.saturating_sub(count);

        let len = self.rows.len();
        let (from, to) = ((start as usize).min(len), (end as usize).min(len));
        self.rows.drain(from..to);
        for (r, cells) in self.rows.iter_mut().enumerate().skip(from) {
            cells.iter_mut().for_each(|cell| cell.row = r as u32);
        }

        self.modified = shift_positions(&self.modified, start, end, |&(r, _)| r, |(r, c), n| {
            (r - n, c)
        });
    }

    /// Drop columns `[start, end)` from the local model, shifting later columns left.
    pub(crate) fn remove_columns(&mut self, start: u32, end: u32) {
        let grid = &mut self.properties.grid_properties;
        let count = end.min(grid.column_count).saturating_sub(start);
        grid.column_count -= count;
        self.new_max_column = self.new_max_column.saturating_sub(count);

        for cells in self.rows.iter_mut() {
            let len = cells.len();
            let (from, to) = ((start as usize).min(len), (end as usize).min(len));
            cells.drain(from..to);
            for (c, cell) in cells.iter_mut().enumerate().skip(from) {
                cell.column = c as u32;
            }
        }

        self.modified = shift_positions(&self.modified, start, end, |&(_, c)| c, |(r, c), n| {
            (r, c - n)
        });
    }

    pub(crate) fn clear_cells(&mut self) {
        self.rows.clear();
        self.modified.clear();
    }
}

/// Remove positions whose selected coordinate falls in `[start, end)` and
/// shift the ones past `end` back by the width of the range.
fn shift_positions(
    positions: &BTreeSet<(u32, u32)>,
    start: u32,
    end: u32,
    coord: impl Fn(&(u32, u32)) -> u32,
    shift: impl Fn((u32, u32), u32) -> (u32, u32),
) -> BTreeSet<(u32, u32)> {
    positions
        .iter()
        .filter(|pos| !(start..end).contains(&coord(*pos)))
        .map(|&pos| match coord(&pos) >= end {
            true => shift(pos, end - start),
            false => pos,
        })
        .collect()
}
