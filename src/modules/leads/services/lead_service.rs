use std::sync::Arc;

use tracing::{info, warn};

use crate::core::{AppError, Clock, Result};
use crate::modules::activity::models::{ActivityAction, ActivityLog};
use crate::modules::activity::repositories::{record_activity, ActivityRepository};
use crate::modules::clients::models::Client;
use crate::modules::clients::services::ClientService;
use crate::modules::leads::models::{
    ConvertLeadRequest, CreateLeadRequest, Lead, LeadStatus, LeadSyncResponse,
};
use crate::modules::leads::repositories::LeadRepository;
use crate::modules::leads::services::sheet_parser::parse_lead_rows;
use crate::modules::leads::services::sheet_source::LeadSheetSource;

/// Lead import, lead upkeep and lead-to-client conversion
pub struct LeadService {
    lead_repo: Arc<dyn LeadRepository>,
    sheet_source: Arc<dyn LeadSheetSource>,
    client_service: Arc<ClientService>,
    activity_repo: Arc<dyn ActivityRepository>,
    clock: Arc<dyn Clock>,
}

impl LeadService {
    pub fn new(
        lead_repo: Arc<dyn LeadRepository>,
        sheet_source: Arc<dyn LeadSheetSource>,
        client_service: Arc<ClientService>,
        activity_repo: Arc<dyn ActivityRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            lead_repo,
            sheet_source,
            client_service,
            activity_repo,
            clock,
        }
    }

    /// Pull the spreadsheet and upsert its rows by phone number
    pub async fn sync_from_sheet(&self) -> Result<LeadSyncResponse> {
        info!("Lead sheet sync started");

        let csv = self.sheet_source.fetch_csv().await?;
        let rows = parse_lead_rows(&csv)?;
        let now = self.clock.now();

        let mut leads = Vec::with_capacity(rows.len());
        let mut skipped = 0;
        for row in rows {
            match Lead::from_import(row, now) {
                Ok(lead) => leads.push(self.lead_repo.upsert_by_phone(&lead).await?),
                Err(e) => {
                    warn!(error = %e, "Skipping lead sheet row");
                    skipped += 1;
                }
            }
        }

        info!(total = leads.len(), skipped, "Lead sheet sync finished");

        record_activity(
            self.activity_repo.as_ref(),
            ActivityLog::new(
                ActivityAction::GoogleSheetsSync,
                format!("Synced {} leads from Google Sheets", leads.len()),
                now,
            ),
        )
        .await;

        Ok(LeadSyncResponse::from_leads(leads, skipped))
    }

    /// Store a lead entered by hand
    pub async fn create_lead(&self, request: CreateLeadRequest) -> Result<Lead> {
        let lead = Lead::new(request, self.clock.now())?;
        let created = self.lead_repo.create(&lead).await?;

        info!(lead_id = %created.id, "Lead created");

        Ok(created)
    }

    pub async fn get_lead(&self, id: &str) -> Result<Lead> {
        self.lead_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Lead not found"))
    }

    pub async fn list_leads(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>> {
        self.lead_repo.list(status).await
    }

    /// Move a lead between new and contacted
    pub async fn update_status(&self, id: &str, status: LeadStatus) -> Result<Lead> {
        let lead = self.get_lead(id).await?;

        if !lead.status.can_transition_to(status) {
            return Err(AppError::validation(format!(
                "Cannot change lead status from {} to {}",
                lead.status.as_str(),
                status.as_str()
            )));
        }

        let now = self.clock.now();
        self.lead_repo.update_status(id, status, now).await?;

        info!(lead_id = %id, status = status.as_str(), "Lead status updated");

        Ok(Lead {
            status,
            updated_at: now,
            ..lead
        })
    }

    pub async fn delete_lead(&self, id: &str) -> Result<()> {
        let lead = self.get_lead(id).await?;

        if !self.lead_repo.delete(id).await? {
            return Err(AppError::not_found("Lead not found"));
        }

        info!(lead_id = %id, "Lead deleted");

        record_activity(
            self.activity_repo.as_ref(),
            ActivityLog::new(
                ActivityAction::LeadDeleted,
                format!("Lead {} deleted", lead.display_name()),
                self.clock.now(),
            )
            .for_lead(Some(lead.id.clone())),
        )
        .await;

        Ok(())
    }

    /// Create a client from a lead. A stored lead fills in whatever the request
    /// leaves blank and is marked converted afterwards.
    pub async fn convert_to_client(&self, request: ConvertLeadRequest) -> Result<Client> {
        let lead_id = request
            .lead_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let (request, lead) = match lead_id {
            Some(lead_id) => {
                let lead = self.get_lead(&lead_id).await?;
                if lead.status == LeadStatus::Converted {
                    return Err(AppError::conflict(format!(
                        "Lead {} has already been converted",
                        lead.display_name()
                    )));
                }
                let request = ConvertLeadRequest {
                    lead_id: Some(lead_id),
                    ..request
                };
                (request.merge_lead(&lead), Some(lead))
            }
            None => (
                ConvertLeadRequest {
                    lead_id: None,
                    ..request
                },
                None,
            ),
        };

        if request.display_name().is_empty() {
            return Err(AppError::validation("Lead needs a name or a phone number"));
        }

        let client = self
            .client_service
            .create_client(request.to_client_request())
            .await?;

        let now = self.clock.now();
        if let Some(lead) = &lead {
            self.lead_repo
                .update_status(&lead.id, LeadStatus::Converted, now)
                .await?;
        }

        info!(
            client_id = %client.id,
            lead_id = ?request.lead_id,
            "Lead converted to client"
        );

        record_activity(
            self.activity_repo.as_ref(),
            ActivityLog::new(
                ActivityAction::LeadConverted,
                format!("Lead {} converted to client", request.display_name()),
                now,
            )
            .for_client(client.id.clone())
            .for_lead(request.lead_id.clone()),
        )
        .await;

        Ok(client)
    }
}
