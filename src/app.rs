use std::sync::Arc;

use actix_web::web;
use sqlx::MySqlPool;

use crate::config::IssuerProfile;
use crate::core::{Clock, Currency, SystemClock};
use crate::middleware::error_handler;
use crate::modules::activity::{
    self, ActivityRepository, InMemoryActivityRepository, MySqlActivityRepository,
};
use crate::modules::catalog::{
    self, CatalogService, InMemoryServiceRepository, MySqlServiceRepository, ServiceRepository,
};
use crate::modules::clients::{
    self, ClientRepository, ClientService, InMemoryClientRepository, MySqlClientRepository,
};
use crate::modules::health;
use crate::modules::invoices::document::{DocumentRenderer, PdfRenderer};
use crate::modules::invoices::{
    self, InMemoryInvoiceRepository, InvoiceNumberGenerator, InvoiceRepository, InvoiceService,
    MySqlInvoiceRepository,
};
use crate::modules::leads::{
    self, InMemoryLeadRepository, LeadRepository, LeadService, LeadSheetSource,
    MySqlLeadRepository,
};
use crate::modules::reports::{self, ReportService};
use crate::modules::tasks::{
    self, InMemoryTaskRepository, MySqlTaskRepository, TaskRepository, TaskService,
};

/// The storage implementations every service is built on
#[derive(Clone)]
pub struct Repositories {
    pub invoices: Arc<dyn InvoiceRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub leads: Arc<dyn LeadRepository>,
    pub catalog: Arc<dyn ServiceRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub activity: Arc<dyn ActivityRepository>,
}

impl Repositories {
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            invoices: Arc::new(MySqlInvoiceRepository::new(pool.clone())),
            clients: Arc::new(MySqlClientRepository::new(pool.clone())),
            leads: Arc::new(MySqlLeadRepository::new(pool.clone())),
            catalog: Arc::new(MySqlServiceRepository::new(pool.clone())),
            tasks: Arc::new(MySqlTaskRepository::new(pool.clone())),
            activity: Arc::new(MySqlActivityRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            invoices: Arc::new(InMemoryInvoiceRepository::new()),
            clients: Arc::new(InMemoryClientRepository::new()),
            leads: Arc::new(InMemoryLeadRepository::new()),
            catalog: Arc::new(InMemoryServiceRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            activity: Arc::new(InMemoryActivityRepository::new()),
        }
    }
}

/// Everything needed to assemble the services
pub struct AppDependencies {
    pub repositories: Repositories,
    pub sheet_source: Arc<dyn LeadSheetSource>,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub clock: Arc<dyn Clock>,
    pub issuer: IssuerProfile,
    pub currency: Currency,
}

impl AppDependencies {
    /// In-memory storage, system clock, PDF renderer and the default issuer
    pub fn in_memory(sheet_source: Arc<dyn LeadSheetSource>) -> Self {
        Self {
            repositories: Repositories::in_memory(),
            sheet_source,
            renderer: Arc::new(PdfRenderer::new()),
            clock: Arc::new(SystemClock),
            issuer: IssuerProfile::default(),
            currency: Currency::default(),
        }
    }
}

/// Shared service handles, cloned into every actix worker
#[derive(Clone)]
pub struct AppServices {
    pub invoices: Arc<InvoiceService>,
    pub clients: Arc<ClientService>,
    pub leads: Arc<LeadService>,
    pub catalog: Arc<CatalogService>,
    pub tasks: Arc<TaskService>,
    pub reports: Arc<ReportService>,
    pub activity: Arc<dyn ActivityRepository>,
}

impl AppServices {
    pub fn new(deps: AppDependencies) -> Self {
        let AppDependencies {
            repositories,
            sheet_source,
            renderer,
            clock,
            issuer,
            currency,
        } = deps;

        let clients = Arc::new(ClientService::new(
            repositories.clients.clone(),
            clock.clone(),
        ));

        let invoices = Arc::new(InvoiceService::new(
            repositories.invoices.clone(),
            repositories.clients.clone(),
            repositories.catalog.clone(),
            repositories.activity.clone(),
            renderer,
            clock.clone(),
            InvoiceNumberGenerator::from_clock(clock.as_ref()),
            issuer,
            currency,
        ));

        let leads = Arc::new(LeadService::new(
            repositories.leads.clone(),
            sheet_source,
            clients.clone(),
            repositories.activity.clone(),
            clock.clone(),
        ));

        let catalog = Arc::new(CatalogService::new(
            repositories.catalog.clone(),
            clock.clone(),
        ));

        let tasks = Arc::new(TaskService::new(
            repositories.tasks.clone(),
            repositories.leads.clone(),
            repositories.clients.clone(),
            clock,
        ));

        let reports = Arc::new(ReportService::new(
            repositories.invoices,
            repositories.clients,
            currency,
        ));

        Self {
            invoices,
            clients,
            leads,
            catalog,
            tasks,
            reports,
            activity: repositories.activity,
        }
    }

    /// Register shared state, extractor error handlers and every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.invoices.clone()))
            .app_data(web::Data::new(self.clients.clone()))
            .app_data(web::Data::new(self.leads.clone()))
            .app_data(web::Data::new(self.catalog.clone()))
            .app_data(web::Data::new(self.tasks.clone()))
            .app_data(web::Data::new(self.reports.clone()))
            .app_data(web::Data::new(self.activity.clone()))
            .configure(error_handler::configure)
            .configure(health::controllers::configure)
            .configure(invoices::controllers::configure)
            .configure(clients::controllers::configure)
            .configure(leads::controllers::configure)
            .configure(catalog::controllers::configure)
            .configure(tasks::controllers::configure)
            .configure(reports::controllers::configure)
            .configure(activity::controllers::configure);
    }
}
