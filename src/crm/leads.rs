use super::types::{Lead, LeadsRetrieveRequestExpand};
use crate::error::Result;
use crate::request::{QueryParams, RequestClient, RequestOptions, path_segment};
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct LeadsRetrieveRequest {
    pub expand: Option<LeadsRetrieveRequestExpand>,
    pub include_remote_data: Option<bool>,
    pub include_remote_fields: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct LeadsClient {
    request_client: RequestClient,
}

impl LeadsClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self { request_client }
    }

    /// Returns a `Lead` object with the given `id`.
    pub fn retrieve(
        &self,
        id: &str,
        request: &LeadsRetrieveRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Lead> {
        let query = QueryParams::new()
            .opt("expand", &request.expand)
            .opt("include_remote_data", &request.include_remote_data)
            .opt("include_remote_fields", &request.include_remote_fields);
        self.request_client
            .get(&format!("/api/crm/v1/leads/{}", path_segment(id)), query, options)
    }
}

#[derive(Debug, Clone)]
pub struct AsyncLeadsClient {
    inner: LeadsClient,
}

impl AsyncLeadsClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            inner: LeadsClient::new(request_client),
        }
    }

    pub fn retrieve(
        &self,
        id: impl Into<String>,
        request: LeadsRetrieveRequest,
        options: Option<RequestOptions>,
    ) -> Task<Lead> {
        let inner = self.inner.clone();
        let id = id.into();
        Task::spawn(move || inner.retrieve(&id, &request, options.as_ref()))
    }
}
