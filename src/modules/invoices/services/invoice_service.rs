use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::IssuerProfile;
use crate::core::{AppError, Clock, Currency, Result};
use crate::modules::activity::models::{ActivityAction, ActivityLog};
use crate::modules::activity::repositories::{record_activity, ActivityRepository};
use crate::modules::catalog::repositories::ServiceRepository;
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::invoices::document::{DocumentRenderer, InvoiceDocument, RenderedPdf};
use crate::modules::invoices::models::{
    CreateInvoiceRequest, Invoice, InvoiceResponse, InvoiceStatus, RawLineItem,
    RawTotalsInput, TotalsRequest, TotalsResponse,
};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::invoices::services::calculator::InvoiceCalculator;
use crate::modules::invoices::services::number_generator::InvoiceNumberGenerator;

/// Attempts at finding an unused invoice number before giving up
const MAX_NUMBER_ATTEMPTS: usize = 5;

/// Service for invoice business logic
pub struct InvoiceService {
    invoice_repo: Arc<dyn InvoiceRepository>,
    client_repo: Arc<dyn ClientRepository>,
    service_repo: Arc<dyn ServiceRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
    renderer: Arc<dyn DocumentRenderer>,
    clock: Arc<dyn Clock>,
    calculator: InvoiceCalculator,
    numbers: InvoiceNumberGenerator,
    issuer: IssuerProfile,
    currency: Currency,
}

impl InvoiceService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        client_repo: Arc<dyn ClientRepository>,
        service_repo: Arc<dyn ServiceRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        renderer: Arc<dyn DocumentRenderer>,
        clock: Arc<dyn Clock>,
        numbers: InvoiceNumberGenerator,
        issuer: IssuerProfile,
        currency: Currency,
    ) -> Self {
        Self {
            invoice_repo,
            client_repo,
            service_repo,
            activity_repo,
            renderer,
            clock,
            calculator: InvoiceCalculator::new(),
            numbers,
            issuer,
            currency,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Rows picked from the catalog take the service name and base price for
    /// whichever of description and unit price were left blank. The service
    /// must exist and be active.
    async fn resolve_catalog_items(&self, items: Vec<RawLineItem>) -> Result<Vec<RawLineItem>> {
        let mut resolved = Vec::with_capacity(items.len());

        for mut item in items {
            let Some(service_id) = item
                .service_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
            else {
                resolved.push(item);
                continue;
            };

            let service = self
                .service_repo
                .find_by_id(service_id)
                .await?
                .ok_or_else(|| AppError::not_found("Service not found"))?;

            if !service.is_active {
                return Err(AppError::validation(format!(
                    "Service '{}' is no longer offered",
                    service.name
                )));
            }

            if item.description.trim().is_empty() {
                item.description = service.name.clone();
            }
            let price_blank = match &item.unit_price {
                None => true,
                Some(price) => price.parse("unit_price")?.is_none(),
            };
            if price_blank {
                item.unit_price = Some(service.base_price.into());
            }

            resolved.push(item);
        }

        Ok(resolved)
    }

    /// Live totals for an unsaved form. Blank rows are ignored; malformed
    /// numbers are rejected.
    pub async fn preview_totals(&self, input: RawTotalsInput) -> Result<TotalsResponse> {
        let input = RawTotalsInput {
            items: self.resolve_catalog_items(input.items).await?,
            ..input
        };
        let request = TotalsRequest::from_raw(&input)?;
        let totals = self.calculator.compute_totals(&request)?;

        Ok(TotalsResponse::from_totals(
            &totals,
            request.items.len(),
            self.currency,
        ))
    }

    /// Create a draft invoice for an existing client
    pub async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<InvoiceResponse> {
        let client = self
            .client_repo
            .find_by_id(&request.client_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))?;

        let totals_request = TotalsRequest::from_raw(&RawTotalsInput {
            items: self.resolve_catalog_items(request.items).await?,
            tax_rate: request.tax_rate,
            discount: request.discount,
        })?;

        if totals_request.items.is_empty() {
            return Err(AppError::validation(
                "Invoice must have at least one line item",
            ));
        }

        let now = self.clock.now();
        let invoice_date = self.clock.today();
        if request.due_date < invoice_date {
            return Err(AppError::validation(
                "Due date cannot be before the invoice date",
            ));
        }

        let totals = self.calculator.compute_totals(&totals_request)?;

        let mut created = None;
        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let invoice_number = self.numbers.next();

            if self.invoice_repo.number_exists(&invoice_number).await? {
                warn!(invoice_number = %invoice_number, attempt, "Invoice number taken, retrying");
                continue;
            }

            let invoice = Invoice::new(
                invoice_number,
                client.id.clone(),
                invoice_date,
                request.due_date,
                totals.clone(),
                totals_request.items.clone(),
                request.notes.clone(),
                now,
            )?;

            match self.invoice_repo.create(&invoice).await {
                Ok(invoice) => {
                    created = Some(invoice);
                    break;
                }
                Err(AppError::Conflict(message)) => {
                    warn!(attempt, %message, "Invoice number collided on insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        let invoice = created.ok_or_else(|| {
            AppError::conflict("Could not allocate a unique invoice number")
        })?;

        let formatted_total = self.currency.format_amount(invoice.totals.total);
        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            total = %invoice.totals.total,
            "Invoice created"
        );

        record_activity(
            self.activity_repo.as_ref(),
            ActivityLog::new(
                ActivityAction::InvoiceCreated,
                format!(
                    "Invoice {} created for {}",
                    invoice.invoice_number, formatted_total
                ),
                now,
            )
            .for_invoice(invoice.id.clone())
            .for_client(client.id.clone()),
        )
        .await;

        Ok(InvoiceResponse::from_invoice(
            invoice,
            Some(client.name),
            self.currency,
        ))
    }

    pub async fn get_invoice(&self, id: &str) -> Result<InvoiceResponse> {
        let invoice = self.find_invoice(id).await?;
        self.to_response(invoice).await
    }

    /// Newest first. `search` matches invoice number or client name,
    /// case-insensitively.
    pub async fn list_invoices(
        &self,
        status: Option<InvoiceStatus>,
        search: Option<&str>,
    ) -> Result<Vec<InvoiceResponse>> {
        let invoices = self.invoice_repo.list(status).await?;

        let mut client_names: HashMap<String, Option<String>> = HashMap::new();
        for invoice in &invoices {
            if !client_names.contains_key(&invoice.client_id) {
                let name = self
                    .client_repo
                    .find_by_id(&invoice.client_id)
                    .await?
                    .map(|c| c.name);
                client_names.insert(invoice.client_id.clone(), name);
            }
        }

        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        Ok(invoices
            .into_iter()
            .filter_map(|invoice| {
                let client_name = client_names.get(&invoice.client_id).cloned().flatten();

                if let Some(needle) = &needle {
                    let number_matches = invoice.invoice_number.to_lowercase().contains(needle);
                    let name_matches = client_name
                        .as_deref()
                        .map(|n| n.to_lowercase().contains(needle))
                        .unwrap_or(false);
                    if !number_matches && !name_matches {
                        return None;
                    }
                }

                Some(InvoiceResponse::from_invoice(
                    invoice,
                    client_name,
                    self.currency,
                ))
            })
            .collect())
    }

    /// Move an invoice forward in its lifecycle
    pub async fn update_status(
        &self,
        id: &str,
        new_status: InvoiceStatus,
    ) -> Result<InvoiceResponse> {
        let mut invoice = self.find_invoice(id).await?;
        let previous = invoice.status;
        let now = self.clock.now();

        invoice.update_status(new_status, now)?;

        if previous != new_status {
            self.invoice_repo
                .update_status(&invoice.id, new_status, now)
                .await?;

            info!(
                invoice_id = %invoice.id,
                invoice_number = %invoice.invoice_number,
                from = %previous,
                to = %new_status,
                "Invoice status updated"
            );

            if new_status == InvoiceStatus::Paid {
                record_activity(
                    self.activity_repo.as_ref(),
                    ActivityLog::new(
                        ActivityAction::InvoicePaid,
                        format!("Invoice {} marked as paid", invoice.invoice_number),
                        now,
                    )
                    .for_invoice(invoice.id.clone())
                    .for_client(invoice.client_id.clone()),
                )
                .await;
            }
        }

        self.to_response(invoice).await
    }

    pub async fn delete_invoice(&self, id: &str) -> Result<()> {
        let invoice = self.find_invoice(id).await?;

        if !self.invoice_repo.delete(&invoice.id).await? {
            return Err(AppError::not_found("Invoice not found"));
        }

        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            "Invoice deleted"
        );

        record_activity(
            self.activity_repo.as_ref(),
            ActivityLog::new(
                ActivityAction::InvoiceDeleted,
                format!("Invoice {} deleted", invoice.invoice_number),
                self.clock.now(),
            )
            .for_client(invoice.client_id),
        )
        .await;

        Ok(())
    }

    /// Build the printable layout of a stored invoice
    pub async fn build_document(&self, id: &str) -> Result<InvoiceDocument> {
        let invoice = self.find_invoice(id).await?;
        let client = self
            .client_repo
            .find_by_id(&invoice.client_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))?;

        Ok(InvoiceDocument::build(
            &invoice,
            &client,
            &self.issuer,
            self.currency,
        ))
    }

    /// Render the stored invoice to PDF. The stored totals are printed as-is.
    pub async fn render_invoice(&self, id: &str) -> Result<RenderedPdf> {
        let document = self.build_document(id).await?;
        let renderer = Arc::clone(&self.renderer);

        let rendered = tokio::task::spawn_blocking(move || renderer.render(&document))
            .await
            .map_err(|e| AppError::rendering(format!("Render task failed: {}", e)))??;

        info!(
            invoice_id = %id,
            file_name = %rendered.file_name,
            size = rendered.bytes.len(),
            "Invoice PDF generated"
        );

        Ok(rendered)
    }

    async fn find_invoice(&self, id: &str) -> Result<Invoice> {
        self.invoice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice not found"))
    }

    async fn to_response(&self, invoice: Invoice) -> Result<InvoiceResponse> {
        let client_name = self
            .client_repo
            .find_by_id(&invoice.client_id)
            .await?
            .map(|c| c.name);

        Ok(InvoiceResponse::from_invoice(
            invoice,
            client_name,
            self.currency,
        ))
    }
}
