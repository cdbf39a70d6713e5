use super::Transport;
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::models::{Sheet, SheetProperties, Spreadsheet, SpreadsheetProperties};
use crate::sheets::client::HttpTransport;
use crate::sheets::envelope::decode;
use crate::sheets::request::{
    BatchUpdateBody, BatchUpdateResponse, CreateSpreadsheetBody, CreateSpreadsheetProperties,
    CreatedSpreadsheet, Dimension, Request, ValueRange, ValuesBatchUpdateBody, quote_sheet_title,
};
use crate::sheets::update::UpdateRequest;
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Response fields requested when fetching a spreadsheet.
const SPREADSHEET_FIELDS: &str =
    "spreadsheetId,properties.title,sheets(properties,data.rowData.values(formattedValue))";

/// Entry point for all Sheets API operations.
#[derive(Clone)]
pub struct Service {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service").finish_non_exhaustive()
    }
}

impl Service {
    /// Authenticate with the configured service account key.
    pub async fn new(config: &GoogleConfig) -> Result<Self> {
        let transport = HttpTransport::new(config).await?;
        Ok(Self::with_transport(transport))
    }

    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let body = self.transport.get(path, query).await?;
        decode(&body)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.transport.post(path, &body).await?;
        decode(&response)
    }

    pub(crate) async fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: &[Request],
    ) -> Result<BatchUpdateResponse> {
        debug!(count = requests.len(), "Sending batch update");
        let path = format!("/spreadsheets/{}:batchUpdate", spreadsheet_id);
        self.post(&path, &BatchUpdateBody { requests }).await
    }

    /// Create a spreadsheet with the given title and fetch it back, since the
    /// create response lacks the defaults the server fills in.
    #[instrument(name = "Creating spreadsheet", skip(self))]
    pub async fn create_spreadsheet(
        &self,
        properties: &SpreadsheetProperties,
    ) -> Result<Spreadsheet> {
        let body = CreateSpreadsheetBody {
            properties: CreateSpreadsheetProperties {
                title: &properties.title,
            },
        };
        let created: CreatedSpreadsheet = self.post("/spreadsheets", &body).await?;
        debug!(id = %created.spreadsheet_id, "Created spreadsheet");

        self.fetch_spreadsheet(&created.spreadsheet_id).await
    }

    #[instrument(name = "Fetching spreadsheet", skip(self))]
    pub async fn fetch_spreadsheet(&self, id: &str) -> Result<Spreadsheet> {
        let path = format!("/spreadsheets/{}", id);
        let mut spreadsheet: Spreadsheet =
            self.get(&path, &[("fields", SPREADSHEET_FIELDS)]).await?;
        spreadsheet.attach(self.clone());

        debug!(sheets = spreadsheet.sheets.len(), "Fetched spreadsheet");
        Ok(spreadsheet)
    }

    /// Resize the grid to exactly `rows` x `columns`.
    #[instrument(name = "Expanding sheet", skip(self, sheet), fields(sheet = %sheet.title()))]
    pub async fn expand_sheet(&self, sheet: &mut Sheet, rows: u32, columns: u32) -> Result<()> {
        let mut desired = sheet.properties.clone();
        desired.grid_properties.row_count = rows;
        desired.grid_properties.column_count = columns;

        UpdateRequest::new(owning_spreadsheet(sheet)?)
            .update_sheet_properties(sheet, &desired, false)
            .send_with(self)
            .await?;

        sheet.set_grid_size(rows, columns);
        Ok(())
    }

    /// Push local edits: grow the grid if needed, then write modified cells.
    #[instrument(name = "Syncing sheet", skip(self, sheet), fields(sheet = %sheet.title()))]
    pub async fn sync_sheet(&self, sheet: &mut Sheet) -> Result<()> {
        if sheet.needs_expansion() {
            let (rows, columns) = sheet.pending_size();
            let grid = sheet.properties.grid_properties;
            self.expand_sheet(sheet, rows.max(grid.row_count), columns.max(grid.column_count))
                .await?;
        }

        self.sync_cells(sheet).await?;
        sheet.mark_synced();
        Ok(())
    }

    async fn sync_cells(&self, sheet: &Sheet) -> Result<()> {
        let title = quote_sheet_title(sheet.title());
        let data: Vec<ValueRange> = sheet
            .modified_cells()
            .map(|cell| ValueRange {
                range: format!("{}!{}", title, cell.pos()),
                major_dimension: Dimension::Columns,
                values: vec![vec![cell.value.clone()]],
            })
            .collect();

        if data.is_empty() {
            return Ok(());
        }
        debug!(cells = data.len(), "Writing modified cells");

        let path = format!("/spreadsheets/{}/values:batchUpdate", owning_spreadsheet(sheet)?);
        let body = ValuesBatchUpdateBody {
            value_input_option: "USER_ENTERED",
            data,
        };
        let _: IgnoredAny = self.post(&path, &body).await?;
        Ok(())
    }

    #[instrument(name = "Deleting rows", skip(self, sheet), fields(sheet = %sheet.title()))]
    pub async fn delete_rows(&self, sheet: &mut Sheet, start: u32, end: u32) -> Result<()> {
        self.delete_dimension(sheet, Dimension::Rows, start, end).await
    }

    #[instrument(name = "Deleting columns", skip(self, sheet), fields(sheet = %sheet.title()))]
    pub async fn delete_columns(&self, sheet: &mut Sheet, start: u32, end: u32) -> Result<()> {
        self.delete_dimension(sheet, Dimension::Columns, start, end).await
    }

    /// The local model only changes once the server has accepted the delete.
    async fn delete_dimension(
        &self,
        sheet: &mut Sheet,
        dimension: Dimension,
        start: u32,
        end: u32,
    ) -> Result<()> {
        let grid = sheet.properties.grid_properties;
        let count = match dimension {
            Dimension::Rows => grid.row_count,
            Dimension::Columns => grid.column_count,
        };
        if start >= end || start >= count {
            return Err(AppError::InvalidRequest(format!(
                "invalid range [{}, {}) for a grid of {} {:?}",
                start, end, count, dimension
            )));
        }

        UpdateRequest::new(owning_spreadsheet(sheet)?)
            .delete_dimension(sheet, dimension, start, end)
            .send_with(self)
            .await?;

        match dimension {
            Dimension::Rows => sheet.remove_rows(start, end),
            Dimension::Columns => sheet.remove_columns(start, end),
        }
        Ok(())
    }

    /// Apply the properties that differ from the sheet's current ones.
    #[instrument(name = "Updating sheet properties", skip_all, fields(sheet = %sheet.title()))]
    pub async fn update_sheet_properties(
        &self,
        sheet: &mut Sheet,
        desired: &SheetProperties,
    ) -> Result<()> {
        let request = UpdateRequest::new(owning_spreadsheet(sheet)?)
            .update_sheet_properties(sheet, desired, true);
        if request.is_empty() {
            return Ok(());
        }
        request.send_with(self).await?;

        let sheet_id = sheet.id();
        sheet.replace_properties(SheetProperties {
            sheet_id,
            ..desired.clone()
        });
        Ok(())
    }

    #[instrument(name = "Adding sheet", skip(self, spreadsheet), fields(id = %spreadsheet.id))]
    pub async fn add_sheet<'a>(
        &self,
        spreadsheet: &'a mut Spreadsheet,
        title: &str,
    ) -> Result<&'a mut Sheet> {
        let response = UpdateRequest::new(&spreadsheet.id)
            .add_sheet(title)
            .send_with(self)
            .await?;

        let properties = response
            .replies
            .into_iter()
            .next()
            .and_then(|reply| reply.add_sheet)
            .map(|add_sheet| add_sheet.properties)
            .ok_or_else(|| {
                AppError::Sheets("Failed to get sheet properties from add response".to_string())
            })?;
        debug!(sheet_id = properties.sheet_id, "Added sheet");

        Ok(spreadsheet.push_sheet(Sheet::new(String::new(), properties)))
    }

    #[instrument(name = "Deleting sheet", skip(self, spreadsheet), fields(id = %spreadsheet.id))]
    pub async fn delete_sheet(&self, spreadsheet: &mut Spreadsheet, sheet_id: i32) -> Result<()> {
        if spreadsheet.sheet_by_id(sheet_id).is_none() {
            return Err(AppError::InvalidRequest(format!(
                "spreadsheet has no sheet with id {}",
                sheet_id
            )));
        }

        UpdateRequest::new(&spreadsheet.id)
            .delete_sheet(sheet_id)
            .send_with(self)
            .await?;

        spreadsheet.remove_sheet(sheet_id);
        Ok(())
    }

    /// Clear all cell data of the sheet, on the server and locally.
    #[instrument(name = "Clearing sheet", skip(self, sheet), fields(sheet = %sheet.title()))]
    pub async fn clear_sheet(&self, sheet: &mut Sheet) -> Result<()> {
        UpdateRequest::new(owning_spreadsheet(sheet)?)
            .clear_cells(sheet)
            .send_with(self)
            .await?;

        sheet.clear_cells();
        Ok(())
    }
}

fn owning_spreadsheet(sheet: &Sheet) -> Result<&str> {
    match sheet.spreadsheet_id() {
        "" => Err(AppError::InvalidRequest(format!(
            "sheet {:?} does not belong to a fetched spreadsheet",
            sheet.title()
        ))),
        id => Ok(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sheet::test_helpers::{mock_properties, mock_sheet};
    use crate::sheets::mock::MockTransport;
    use serde_json::json;

    const PERMISSION_DENIED: &str =
        r#"{"error":{"code":403,"status":"PERMISSION_DENIED","message":"m"}}"#;

    fn spreadsheet_body(id: &str, title: &str) -> String {
        json!({
            "spreadsheetId": id,
            "properties": {"title": title},
            "sheets": [{
                "properties": {
                    "sheetId": 0,
                    "title": "Sheet1",
                    "index": 0,
                    "gridProperties": {"rowCount": 2, "columnCount": 2}
                },
                "data": [{"rowData": [{"values": [{"formattedValue": "hello"}]}]}]
            }]
        })
        .to_string()
    }

    fn mock_service() -> (MockTransport, Service) {
        let mock = MockTransport::new();
        (mock.clone(), Service::with_transport(mock))
    }

    #[tokio::test]
    async fn test_fetch_spreadsheet() {
        let (mock, service) = mock_service();
        mock.respond(&spreadsheet_body("abc", "Budget"));

        let spreadsheet = service.fetch_spreadsheet("abc").await.unwrap();

        assert_eq!(spreadsheet.id, "abc");
        assert_eq!(spreadsheet.title(), "Budget");
        let sheet = spreadsheet.sheet_by_title("Sheet1").unwrap();
        assert_eq!(sheet.spreadsheet_id(), "abc");
        assert_eq!(sheet.cell(0, 0).unwrap().value, "hello");
        assert!(spreadsheet.service().is_ok());

        let calls = mock.calls();
        assert_eq!(calls[0].method, "GET");
        assert_eq!(calls[0].path, "/spreadsheets/abc");
        assert_eq!(
            calls[0].query,
            vec![("fields".to_string(), SPREADSHEET_FIELDS.to_string())]
        );
    }

    #[tokio::test]
    async fn test_create_then_fetch_keeps_title() {
        let (mock, service) = mock_service();
        mock.respond(r#"{"spreadsheetId": "new1", "properties": {"title": "T"}}"#);
        mock.respond(&spreadsheet_body("new1", "T"));

        let properties = SpreadsheetProperties {
            title: "T".to_string(),
        };
        let spreadsheet = service.create_spreadsheet(&properties).await.unwrap();

        assert_eq!(spreadsheet.id, "new1");
        assert_eq!(spreadsheet.title(), "T");

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path, "/spreadsheets");
        assert_eq!(calls[0].body, Some(json!({"properties": {"title": "T"}})));
        assert_eq!(calls[1].path, "/spreadsheets/new1");
    }

    #[tokio::test]
    async fn test_create_surfaces_api_error() {
        let (mock, service) = mock_service();
        mock.respond(PERMISSION_DENIED);

        let err = service
            .create_spreadsheet(&SpreadsheetProperties::default())
            .await
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("403") && text.contains("PERMISSION_DENIED") && text.contains("m"));
        assert_eq!(mock.calls().len(), 1, "should not fetch after a failed create");
    }

    #[tokio::test]
    async fn test_expand_then_sync() {
        let (mock, service) = mock_service();
        let mut sheet = mock_sheet(2, 2);

        service.expand_sheet(&mut sheet, 10, 5).await.unwrap();
        service.sync_sheet(&mut sheet).await.unwrap();

        let grid = sheet.properties.grid_properties;
        assert_eq!((grid.row_count, grid.column_count), (10, 5));
        assert_eq!(sheet.pending_size(), (10, 5));

        let calls = mock.calls();
        assert_eq!(calls.len(), 1, "sync has nothing left to send: {:?}", calls);
        assert_eq!(calls[0].path, "/spreadsheets/spreadsheet_123:batchUpdate");
        assert_eq!(
            calls[0].body,
            Some(json!({"requests": [{"updateSheetProperties": {
                "properties": {"sheetId": 7, "gridProperties": {"rowCount": 10, "columnCount": 5}},
                "fields": "gridProperties.rowCount,gridProperties.columnCount"
            }}]}))
        );
    }

    #[tokio::test]
    async fn test_shrinking_expand_keeps_room_for_edits() {
        let (mock, service) = mock_service();
        let mut sheet = mock_sheet(2, 2);
        sheet.update(9, 4, "far");

        service.expand_sheet(&mut sheet, 5, 5).await.unwrap();
        assert_eq!(sheet.pending_size(), (10, 5));
        service.sync_sheet(&mut sheet).await.unwrap();

        let grid = sheet.properties.grid_properties;
        assert_eq!((grid.row_count, grid.column_count), (10, 5));

        let calls = mock.calls();
        assert_eq!(calls.len(), 3, "{:?}", calls);
        assert_eq!(
            calls[1].body.as_ref().unwrap()["requests"][0]["updateSheetProperties"]["properties"]
                ["gridProperties"],
            json!({"rowCount": 10, "columnCount": 5})
        );
        assert_eq!(
            calls[2].body.as_ref().unwrap()["data"][0]["range"],
            json!("'Sheet1'!E10")
        );
    }

    #[tokio::test]
    async fn test_sync_expands_and_writes_cells() {
        let (mock, service) = mock_service();
        let mut sheet = mock_sheet(2, 2);
        sheet.update(0, 1, "b1");
        sheet.update(9, 4, "=SUM(A1:A9)");

        service.sync_sheet(&mut sheet).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].body.as_ref().unwrap()["requests"][0]["updateSheetProperties"]["properties"]
                ["gridProperties"],
            json!({"rowCount": 10, "columnCount": 5})
        );
        assert_eq!(calls[1].path, "/spreadsheets/spreadsheet_123/values:batchUpdate");
        assert_eq!(
            calls[1].body,
            Some(json!({
                "valueInputOption": "USER_ENTERED",
                "data": [
                    {"range": "'Sheet1'!B1", "majorDimension": "COLUMNS", "values": [["b1"]]},
                    {"range": "'Sheet1'!E10", "majorDimension": "COLUMNS", "values": [["=SUM(A1:A9)"]]}
                ]
            }))
        );

        assert!(!sheet.has_pending_changes());
        let grid = sheet.properties.grid_properties;
        assert_eq!((grid.row_count, grid.column_count), (10, 5));
    }

    #[tokio::test]
    async fn test_sync_within_grid_skips_expansion() {
        let (mock, service) = mock_service();
        let mut sheet = mock_sheet(10, 10);
        sheet.update(1, 1, "x");

        service.sync_sheet(&mut sheet).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].path.ends_with("/values:batchUpdate"));
    }

    #[tokio::test]
    async fn test_failed_sync_keeps_modified_cells() {
        let (mock, service) = mock_service();
        mock.respond(PERMISSION_DENIED);
        let mut sheet = mock_sheet(10, 10);
        sheet.update(1, 1, "x");

        assert!(service.sync_sheet(&mut sheet).await.is_err());
        assert_eq!(sheet.modified_cells().count(), 1);
    }

    #[tokio::test]
    async fn test_failed_expand_leaves_grid_unchanged() {
        let (mock, service) = mock_service();
        mock.respond(PERMISSION_DENIED);
        let mut sheet = mock_sheet(2, 2);
        sheet.update(5, 5, "x");

        let err = service.sync_sheet(&mut sheet).await.unwrap_err();
        assert!(matches!(err, AppError::Api { code: 403, .. }), "got {:?}", err);
        assert_eq!(sheet.properties.grid_properties.row_count, 2);
        assert_eq!(sheet.pending_size(), (6, 6));
        assert_eq!(mock.calls().len(), 1, "cells are not written after a failed expand");
    }

    #[tokio::test]
    async fn test_delete_rows() {
        let (mock, service) = mock_service();
        let mut sheet = mock_sheet(10, 4);

        service.delete_rows(&mut sheet, 2, 5).await.unwrap();

        assert_eq!(sheet.properties.grid_properties.row_count, 7);
        assert_eq!(sheet.pending_size(), (7, 4));
        assert_eq!(
            mock.calls()[0].body,
            Some(json!({"requests": [{"deleteDimension": {"range": {
                "sheetId": 7, "dimension": "ROWS", "startIndex": 2, "endIndex": 5
            }}}]}))
        );
    }

    #[tokio::test]
    async fn test_delete_columns_only_touches_columns() {
        let (_mock, service) = mock_service();
        let mut sheet = mock_sheet(10, 4);

        service.delete_columns(&mut sheet, 0, 1).await.unwrap();

        let grid = sheet.properties.grid_properties;
        assert_eq!((grid.row_count, grid.column_count), (10, 3));
        assert_eq!(sheet.pending_size(), (10, 3));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_local_state() {
        let (mock, service) = mock_service();
        mock.respond(PERMISSION_DENIED);
        let mut sheet = mock_sheet(10, 4);
        sheet.update(3, 0, "keep");

        assert!(service.delete_rows(&mut sheet, 0, 3).await.is_err());
        assert_eq!(sheet.properties.grid_properties.row_count, 10);
        assert_eq!(sheet.pending_size(), (10, 4));
        assert_eq!(sheet.cell(3, 0).unwrap().value, "keep");
    }

    #[tokio::test]
    async fn test_failed_column_delete_leaves_local_state() {
        let (mock, service) = mock_service();
        mock.respond(PERMISSION_DENIED);
        let mut sheet = mock_sheet(4, 6);
        sheet.update(0, 3, "keep");

        assert!(service.delete_columns(&mut sheet, 0, 2).await.is_err());
        let grid = sheet.properties.grid_properties;
        assert_eq!((grid.row_count, grid.column_count), (4, 6));
        assert_eq!(sheet.pending_size(), (4, 6));
        assert_eq!(sheet.cell(0, 3).unwrap().value, "keep");
    }

    #[tokio::test]
    async fn test_delete_rejects_range_past_grid() {
        let (mock, service) = mock_service();
        let mut sheet = mock_sheet(3, 3);

        let err = service.delete_rows(&mut sheet, 5, 10).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)), "got {:?}", err);
        let err = service.delete_columns(&mut sheet, 3, 4).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)), "got {:?}", err);
        assert!(mock.calls().is_empty());
        assert_eq!(sheet.properties.grid_properties.row_count, 3);
    }

    #[tokio::test]
    async fn test_delete_overhanging_range_removes_overlap() {
        let (_mock, service) = mock_service();
        let mut sheet = mock_sheet(5, 2);

        service.delete_rows(&mut sheet, 3, 8).await.unwrap();

        assert_eq!(sheet.properties.grid_properties.row_count, 3);
        assert_eq!(sheet.pending_size(), (3, 2));
    }

    #[tokio::test]
    async fn test_delete_rejects_empty_range() {
        let (mock, service) = mock_service();
        let mut sheet = mock_sheet(10, 4);

        let err = service.delete_rows(&mut sheet, 3, 3).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)), "got {:?}", err);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_detached_sheet_is_rejected() {
        let (mock, service) = mock_service();
        let mut sheet = Sheet::new("", mock_properties(1, "Loose", 5, 5));

        let err = service.expand_sheet(&mut sheet, 6, 6).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)), "got {:?}", err);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_sheet_properties() {
        let (mock, service) = mock_service();
        let mut sheet = mock_sheet(10, 4);

        let unchanged = sheet.properties.clone();
        service
            .update_sheet_properties(&mut sheet, &unchanged)
            .await
            .unwrap();
        assert!(mock.calls().is_empty(), "no request for unchanged properties");

        let mut desired = sheet.properties.clone();
        desired.title = "Renamed".to_string();
        desired.hidden = true;
        service
            .update_sheet_properties(&mut sheet, &desired)
            .await
            .unwrap();

        assert_eq!(sheet.title(), "Renamed");
        assert!(sheet.properties.hidden);
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].body.as_ref().unwrap()["requests"][0]["updateSheetProperties"]["fields"],
            json!("title,hidden")
        );
    }

    #[tokio::test]
    async fn test_add_and_delete_sheet() {
        let (mock, service) = mock_service();
        mock.respond(&spreadsheet_body("abc", "Budget"));
        let mut spreadsheet = service.fetch_spreadsheet("abc").await.unwrap();

        mock.respond(
            r#"{"spreadsheetId": "abc", "replies": [{"addSheet": {"properties": {
                "sheetId": 55, "title": "Extra", "index": 1,
                "gridProperties": {"rowCount": 1000, "columnCount": 26}
            }}}]}"#,
        );
        let added = service.add_sheet(&mut spreadsheet, "Extra").await.unwrap();
        assert_eq!(added.id(), 55);
        assert_eq!(added.spreadsheet_id(), "abc");
        assert_eq!(added.pending_size(), (1000, 26));
        assert_eq!(spreadsheet.sheets.len(), 2);

        service.delete_sheet(&mut spreadsheet, 55).await.unwrap();
        assert!(spreadsheet.sheet_by_id(55).is_none());

        let calls = mock.calls();
        assert_eq!(
            calls[1].body,
            Some(json!({"requests": [{"addSheet": {"properties": {"title": "Extra"}}}]}))
        );
        assert_eq!(
            calls[2].body,
            Some(json!({"requests": [{"deleteSheet": {"sheetId": 55}}]}))
        );
    }

    #[tokio::test]
    async fn test_add_sheet_without_reply() {
        let (mock, service) = mock_service();
        mock.respond(&spreadsheet_body("abc", "Budget"));
        let mut spreadsheet = service.fetch_spreadsheet("abc").await.unwrap();

        let err = service.add_sheet(&mut spreadsheet, "Extra").await.unwrap_err();
        assert!(matches!(err, AppError::Sheets(_)), "got {:?}", err);
        assert_eq!(spreadsheet.sheets.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_sheet() {
        let (mock, service) = mock_service();
        mock.respond(&spreadsheet_body("abc", "Budget"));
        let mut spreadsheet = service.fetch_spreadsheet("abc").await.unwrap();

        assert!(service.delete_sheet(&mut spreadsheet, 404).await.is_err());
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_sheet() {
        let (mock, service) = mock_service();
        let mut sheet = mock_sheet(3, 3);
        sheet.update(0, 0, "x");

        service.clear_sheet(&mut sheet).await.unwrap();

        assert!(sheet.rows().is_empty());
        assert_eq!(sheet.modified_cells().count(), 0);
        assert_eq!(
            mock.calls()[0].body,
            Some(json!({"requests": [{"updateCells": {"range": {"sheetId": 7}, "fields": "*"}}]}))
        );
    }

    #[tokio::test]
    async fn test_spreadsheet_synchronizes_itself() {
        let (mock, service) = mock_service();
        mock.respond(&spreadsheet_body("abc", "Budget"));
        let mut spreadsheet = service.fetch_spreadsheet("abc").await.unwrap();

        spreadsheet
            .sheet_by_title_mut("Sheet1")
            .unwrap()
            .update(0, 0, "changed");
        spreadsheet.synchronize().await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].path, "/spreadsheets/abc/values:batchUpdate");
        assert!(!spreadsheet.sheets[0].has_pending_changes());
    }

    #[tokio::test]
    async fn test_spreadsheet_update_request_uses_attached_service() {
        let (mock, service) = mock_service();
        mock.respond(&spreadsheet_body("abc", "Budget"));
        let spreadsheet = service.fetch_spreadsheet("abc").await.unwrap();

        let sheet = spreadsheet.sheet_by_index(0).unwrap();
        spreadsheet
            .update_request()
            .unwrap()
            .append_dimension(sheet, Dimension::Rows, 3)
            .send()
            .await
            .unwrap();

        assert_eq!(mock.calls()[1].path, "/spreadsheets/abc:batchUpdate");
    }
}
