//! CRM category: pipeline stages and leads.

mod leads;
mod stages;
mod types;

pub use leads::{AsyncLeadsClient, LeadsClient, LeadsRetrieveRequest};
pub use stages::{AsyncStagesClient, StagesClient, StagesListRequest, StagesRetrieveRequest};
pub use types::*;

use crate::request::RequestClient;

#[derive(Debug, Clone)]
pub struct CrmClient {
    pub leads: LeadsClient,
    pub stages: StagesClient,
}

impl CrmClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            leads: LeadsClient::new(request_client.clone()),
            stages: StagesClient::new(request_client),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AsyncCrmClient {
    pub leads: AsyncLeadsClient,
    pub stages: AsyncStagesClient,
}

impl AsyncCrmClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            leads: AsyncLeadsClient::new(request_client.clone()),
            stages: AsyncStagesClient::new(request_client),
        }
    }
}
