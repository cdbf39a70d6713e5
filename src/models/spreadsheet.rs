use crate::error::{AppError, Result};
use crate::models::properties::SpreadsheetProperties;
use crate::models::sheet::Sheet;
use crate::sheets::{Service, UpdateRequest};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Clone, Deserialize)]
pub struct Spreadsheet {
    #[serde(rename = "spreadsheetId")]
    pub id: String,
    #[serde(default)]
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
    #[serde(skip)]
    service: Option<Service>,
}

impl Spreadsheet {
    pub fn title(&self) -> &str {
        &self.properties.title
    }

    pub(crate) fn attach(&mut self, service: Service) {
        for sheet in self.sheets.iter_mut() {
            sheet.set_spreadsheet_id(&self.id);
        }
        self.service = Some(service);
    }

    /// The service this spreadsheet was fetched with.
    pub fn service(&self) -> Result<&Service> {
        self.service.as_ref().ok_or_else(|| {
            AppError::InvalidRequest("spreadsheet is not attached to a service".to_string())
        })
    }

    /// Start a batch update that will be sent through the attached service.
    pub fn update_request(&self) -> Result<UpdateRequest> {
        Ok(UpdateRequest::new(&self.id).with_service(self.service()?.clone()))
    }

    pub fn sheet_by_index(&self, index: u32) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.properties.index == index)
    }

    pub fn sheet_by_id(&self, id: i32) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id() == id)
    }

    pub fn sheet_by_title(&self, title: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.title() == title)
    }

    pub fn sheet_by_index_mut(&mut self, index: u32) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.properties.index == index)
    }

    pub fn sheet_by_id_mut(&mut self, id: i32) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.id() == id)
    }

    pub fn sheet_by_title_mut(&mut self, title: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.title() == title)
    }

    /// Sync every sheet that has local edits or needs a larger grid.
    #[instrument(name = "Synchronizing spreadsheet", skip(self), fields(id = %self.id))]
    pub async fn synchronize(&mut self) -> Result<()> {
        let service = self.service()?.clone();
        for sheet in self.sheets.iter_mut().filter(|s| s.has_pending_changes()) {
            service.sync_sheet(sheet).await?;
        }
        Ok(())
    }

    pub(crate) fn push_sheet(&mut self, mut sheet: Sheet) -> &mut Sheet {
        sheet.set_spreadsheet_id(&self.id);
        self.sheets.push(sheet);
        let last = self.sheets.len() - 1;
        &mut self.sheets[last]
    }

    pub(crate) fn remove_sheet(&mut self, id: i32) {
        self.sheets.retain(|s| s.id() != id);
    }
}
