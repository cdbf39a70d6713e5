use serde::{Deserialize, Serialize};

// https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets#SpreadsheetProperties
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

// https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets/sheets#SheetProperties
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetProperties {
    pub sheet_id: i32,
    pub title: String,
    pub index: u32,
    pub grid_properties: GridProperties,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<Color>,
    pub right_to_left: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GridProperties {
    pub row_count: u32,
    pub column_count: u32,
    pub frozen_row_count: u32,
    pub frozen_column_count: u32,
    pub hide_gridlines: bool,
}

/// RGBA color with components in `[0, 1]`. The API omits zero components.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
}
