//! Typed bodies for the Sheets API `batchUpdate` and `values:batchUpdate` calls.
//!
//! Each [`Request`] variant serializes to the externally tagged shape the API
//! expects, e.g. `{"deleteDimension": {"range": {...}}}`.

use crate::models::{Color, SheetProperties};
use google_sheets4::FieldMask;
use serde::{Deserialize, Serialize};

// https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets/request#request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum Request {
    UpdateSheetProperties(UpdateSheetPropertiesRequest),
    DeleteDimension(DeleteDimensionRequest),
    InsertDimension(InsertDimensionRequest),
    AppendDimension(AppendDimensionRequest),
    AddSheet(AddSheetRequest),
    DeleteSheet(DeleteSheetRequest),
    UpdateCells(UpdateCellsRequest),
}

impl Request {
    /// API name of the request, as used in the serialized tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::UpdateSheetProperties(_) => "updateSheetProperties",
            Request::DeleteDimension(_) => "deleteDimension",
            Request::InsertDimension(_) => "insertDimension",
            Request::AppendDimension(_) => "appendDimension",
            Request::AddSheet(_) => "addSheet",
            Request::DeleteSheet(_) => "deleteSheet",
            Request::UpdateCells(_) => "updateCells",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Rows,
    Columns,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSheetPropertiesRequest {
    pub properties: SheetPropertiesPatch,
    pub fields: FieldMask,
}

/// The subset of sheet properties carried by an update. Absent fields are
/// not serialized; the field mask says which ones the server applies.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPropertiesPatch {
    pub sheet_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_properties: Option<GridPropertiesPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// `Some(None)` clears the tab color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<Option<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_to_left: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GridPropertiesPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frozen_row_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frozen_column_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_gridlines: Option<bool>,
}

impl GridPropertiesPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i32,
    pub dimension: Dimension,
    pub start_index: u32,
    pub end_index: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDimensionRequest {
    pub range: DimensionRange,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertDimensionRequest {
    pub range: DimensionRange,
    pub inherit_from_before: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendDimensionRequest {
    pub sheet_id: i32,
    pub dimension: Dimension,
    pub length: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSheetRequest {
    pub properties: NewSheetProperties,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSheetProperties {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSheetRequest {
    pub sheet_id: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCellsRequest {
    pub range: GridRange,
    pub fields: FieldMask,
}

/// Unbounded ends cover the rest of the sheet.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchUpdateBody<'a> {
    pub requests: &'a [Request],
}

// https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets/batchUpdate#response-body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchUpdateResponse {
    pub spreadsheet_id: String,
    pub replies: Vec<Response>,
}

/// One reply per request, in request order. Requests without a reply body
/// come back as `{}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Response {
    pub add_sheet: Option<AddSheetResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddSheetResponse {
    pub properties: SheetProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValuesBatchUpdateBody {
    pub value_input_option: &'static str,
    pub data: Vec<ValueRange>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValueRange {
    pub range: String,
    pub major_dimension: Dimension,
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateSpreadsheetBody<'a> {
    pub properties: CreateSpreadsheetProperties<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateSpreadsheetProperties<'a> {
    pub title: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedSpreadsheet {
    pub spreadsheet_id: String,
}

/// Quote a sheet title for use in an A1 range, doubling embedded quotes.
pub(crate) fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}
