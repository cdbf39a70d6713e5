use crate::error::{AppError, Result};
use crate::models::{Sheet, SheetProperties};
use crate::sheets::Service;
use crate::sheets::request::{
    AddSheetRequest, AppendDimensionRequest, BatchUpdateResponse, DeleteDimensionRequest,
    DeleteSheetRequest, Dimension, DimensionRange, GridPropertiesPatch, GridRange,
    InsertDimensionRequest, NewSheetProperties, Request, SheetPropertiesPatch,
    UpdateCellsRequest, UpdateSheetPropertiesRequest,
};
use google_sheets4::FieldMask;
use tracing::debug;

/// A list of requests sent to one spreadsheet as a single `batchUpdate`.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    spreadsheet_id: String,
    service: Option<Service>,
    requests: Vec<Request>,
}

impl UpdateRequest {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            service: None,
            requests: Vec::with_capacity(1),
        }
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.service = Some(service);
        self
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn push(mut self, request: Request) -> Self {
        self.requests.push(request);
        self
    }

    /// Update the sheet's properties to `desired`, sending only what changed.
    ///
    /// With `check` false the row and column counts are always sent, which is
    /// how a grid is grown unconditionally. If nothing differs no request is
    /// added.
    pub fn update_sheet_properties(
        self,
        sheet: &Sheet,
        desired: &SheetProperties,
        check: bool,
    ) -> Self {
        let current = &sheet.properties;
        let mut fields: Vec<&str> = Vec::new();
        let mut patch = SheetPropertiesPatch {
            sheet_id: current.sheet_id,
            ..Default::default()
        };

        if desired.title != current.title {
            patch.title = Some(desired.title.clone());
            fields.push("title");
        }
        if desired.index != current.index {
            patch.index = Some(desired.index);
            fields.push("index");
        }

        let (want, have) = (&desired.grid_properties, &current.grid_properties);
        let mut grid = GridPropertiesPatch::default();
        if !check || want.row_count != have.row_count {
            grid.row_count = Some(want.row_count);
            fields.push("gridProperties.rowCount");
        }
        if !check || want.column_count != have.column_count {
            grid.column_count = Some(want.column_count);
            fields.push("gridProperties.columnCount");
        }
        if want.frozen_row_count != have.frozen_row_count {
            grid.frozen_row_count = Some(want.frozen_row_count);
            fields.push("gridProperties.frozenRowCount");
        }
        if want.frozen_column_count != have.frozen_column_count {
            grid.frozen_column_count = Some(want.frozen_column_count);
            fields.push("gridProperties.frozenColumnCount");
        }
        if want.hide_gridlines != have.hide_gridlines {
            grid.hide_gridlines = Some(want.hide_gridlines);
            fields.push("gridProperties.hideGridlines");
        }
        if !grid.is_empty() {
            patch.grid_properties = Some(grid);
        }

        if desired.hidden != current.hidden {
            patch.hidden = Some(desired.hidden);
            fields.push("hidden");
        }
        if desired.tab_color != current.tab_color {
            patch.tab_color = Some(desired.tab_color);
            fields.push("tabColor");
        }
        if desired.right_to_left != current.right_to_left {
            patch.right_to_left = Some(desired.right_to_left);
            fields.push("rightToLeft");
        }

        if fields.is_empty() {
            debug!(sheet_id = current.sheet_id, "Sheet properties unchanged");
            return self;
        }

        self.push(Request::UpdateSheetProperties(UpdateSheetPropertiesRequest {
            properties: patch,
            fields: FieldMask::new(&fields[..]),
        }))
    }

    /// Delete rows or columns `[start, end)`.
    pub fn delete_dimension(self, sheet: &Sheet, dimension: Dimension, start: u32, end: u32) -> Self {
        self.push(Request::DeleteDimension(DeleteDimensionRequest {
            range: DimensionRange {
                sheet_id: sheet.id(),
                dimension,
                start_index: start,
                end_index: end,
            },
        }))
    }

    /// Insert empty rows or columns at `[start, end)`.
    pub fn insert_dimension(
        self,
        sheet: &Sheet,
        dimension: Dimension,
        start: u32,
        end: u32,
        inherit_from_before: bool,
    ) -> Self {
        self.push(Request::InsertDimension(InsertDimensionRequest {
            range: DimensionRange {
                sheet_id: sheet.id(),
                dimension,
                start_index: start,
                end_index: end,
            },
            inherit_from_before,
        }))
    }

    pub fn append_dimension(self, sheet: &Sheet, dimension: Dimension, length: u32) -> Self {
        self.push(Request::AppendDimension(AppendDimensionRequest {
            sheet_id: sheet.id(),
            dimension,
            length,
        }))
    }

    pub fn add_sheet(self, title: impl Into<String>) -> Self {
        self.push(Request::AddSheet(AddSheetRequest {
            properties: NewSheetProperties {
                title: title.into(),
                index: None,
            },
        }))
    }

    pub fn delete_sheet(self, sheet_id: i32) -> Self {
        self.push(Request::DeleteSheet(DeleteSheetRequest { sheet_id }))
    }

    /// Clear every cell of the sheet: values, formats and notes.
    pub fn clear_cells(self, sheet: &Sheet) -> Self {
        self.push(Request::UpdateCells(UpdateCellsRequest {
            range: GridRange {
                sheet_id: sheet.id(),
                ..Default::default()
            },
            fields: FieldMask::new(&["*"]),
        }))
    }

    /// Send through the service attached with [`UpdateRequest::with_service`].
    pub async fn send(&self) -> Result<BatchUpdateResponse> {
        let service = self.service.as_ref().ok_or_else(|| {
            AppError::InvalidRequest("update request has no attached service".to_string())
        })?;
        self.send_with(service).await
    }

    pub async fn send_with(&self, service: &Service) -> Result<BatchUpdateResponse> {
        if self.requests.is_empty() {
            return Err(AppError::InvalidRequest(
                "requests must not be empty".to_string(),
            ));
        }
        service
            .batch_update(&self.spreadsheet_id, &self.requests)
            .await
    }
}
