//! Typed client for the Merge unified API.
//!
//! Each category (`ats`, `accounting`, `crm`, `hris`, `ticketing`,
//! `filestorage`) exposes resource clients whose operations build a query
//! from optional named parameters, send it through a [`Transport`], and parse
//! the body into a [`Model`]. Every resource client has an async twin that
//! returns a [`Task`] instead of blocking.
//!
//! ```no_run
//! use merge_api::{ClientConfig, MergeClient};
//! use merge_api::ticketing::ProjectsListRequest;
//!
//! let client = MergeClient::new(ClientConfig::from_env()?);
//! let page = client.ticketing.projects.list(&ProjectsListRequest::default(), None)?;
//! for project in &page {
//!     println!("{:?}", project.name);
//! }
//! # Ok::<(), merge_api::Error>(())
//! ```

pub mod accounting;
pub mod ats;
pub mod config;
pub mod crm;
pub mod error;
pub mod filestorage;
pub mod hris;
pub mod http;
pub mod model;
pub mod pagination;
pub mod request;
pub mod task;
pub mod ticketing;
pub mod union;
pub mod wire_enum;

use std::sync::Arc;

pub use config::{ClientConfig, Environment};
pub use error::{Error, ErrorKind, Result};
pub use http::{HttpRequest, HttpResponse, HttpTransport, Transport};
pub use model::{AdditionalProperties, Model};
pub use pagination::Paginated;
pub use request::{RequestClient, RequestOptions};
pub use task::Task;
pub use union::{EnumOrString, Union};
pub use wire_enum::{EnumTable, WireEnum};

/// Blocking entry point: one client per category, all sharing one
/// [`RequestClient`].
#[derive(Debug, Clone)]
pub struct MergeClient {
    pub accounting: accounting::AccountingClient,
    pub ats: ats::AtsClient,
    pub crm: crm::CrmClient,
    pub filestorage: filestorage::FilestorageClient,
    pub hris: hris::HrisClient,
    pub ticketing: ticketing::TicketingClient,
}

impl MergeClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::from_request_client(RequestClient::new(config))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self::from_request_client(RequestClient::with_transport(config, transport))
    }

    fn from_request_client(request_client: RequestClient) -> Self {
        Self {
            accounting: accounting::AccountingClient::new(request_client.clone()),
            ats: ats::AtsClient::new(request_client.clone()),
            crm: crm::CrmClient::new(request_client.clone()),
            filestorage: filestorage::FilestorageClient::new(request_client.clone()),
            hris: hris::HrisClient::new(request_client.clone()),
            ticketing: ticketing::TicketingClient::new(request_client),
        }
    }
}

/// Same surface as [`MergeClient`]; every call returns a [`Task`] that must
/// be awaited inside a tokio runtime. The client itself may be built inside
/// or outside one.
#[derive(Debug, Clone)]
pub struct AsyncMergeClient {
    pub accounting: accounting::AsyncAccountingClient,
    pub ats: ats::AsyncAtsClient,
    pub crm: crm::AsyncCrmClient,
    pub filestorage: filestorage::AsyncFilestorageClient,
    pub hris: hris::AsyncHrisClient,
    pub ticketing: ticketing::AsyncTicketingClient,
}

impl AsyncMergeClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::from_request_client(RequestClient::new(config))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self::from_request_client(RequestClient::with_transport(config, transport))
    }

    fn from_request_client(request_client: RequestClient) -> Self {
        Self {
            accounting: accounting::AsyncAccountingClient::new(request_client.clone()),
            ats: ats::AsyncAtsClient::new(request_client.clone()),
            crm: crm::AsyncCrmClient::new(request_client.clone()),
            filestorage: filestorage::AsyncFilestorageClient::new(request_client.clone()),
            hris: hris::AsyncHrisClient::new(request_client.clone()),
            ticketing: ticketing::AsyncTicketingClient::new(request_client),
        }
    }
}
