use chrono::{DateTime, Utc};

use super::types::{PaginatedStageList, Stage};
use crate::error::Result;
use crate::request::{QueryParams, RequestClient, RequestOptions, path_segment};
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct StagesListRequest {
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub cursor: Option<String>,
    pub include_deleted_data: Option<bool>,
    pub include_remote_data: Option<bool>,
    pub include_remote_fields: Option<bool>,
    pub modified_after: Option<DateTime<Utc>>,
    pub modified_before: Option<DateTime<Utc>>,
    pub page_size: Option<i64>,
    pub remote_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StagesRetrieveRequest {
    pub include_remote_data: Option<bool>,
    pub include_remote_fields: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct StagesClient {
    request_client: RequestClient,
}

impl StagesClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self { request_client }
    }

    /// Returns a list of `Stage` objects.
    pub fn list(
        &self,
        request: &StagesListRequest,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedStageList> {
        let query = QueryParams::new()
            .opt("created_after", &request.created_after)
            .opt("created_before", &request.created_before)
            .opt("cursor", &request.cursor)
            .opt("include_deleted_data", &request.include_deleted_data)
            .opt("include_remote_data", &request.include_remote_data)
            .opt("include_remote_fields", &request.include_remote_fields)
            .opt("modified_after", &request.modified_after)
            .opt("modified_before", &request.modified_before)
            .opt("page_size", &request.page_size)
            .opt("remote_id", &request.remote_id);
        self.request_client.get("/api/crm/v1/stages", query, options)
    }

    pub fn retrieve(
        &self,
        id: &str,
        request: &StagesRetrieveRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Stage> {
        let query = QueryParams::new()
            .opt("include_remote_data", &request.include_remote_data)
            .opt("include_remote_fields", &request.include_remote_fields);
        self.request_client
            .get(&format!("/api/crm/v1/stages/{}", path_segment(id)), query, options)
    }
}

#[derive(Debug, Clone)]
pub struct AsyncStagesClient {
    inner: StagesClient,
}

impl AsyncStagesClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            inner: StagesClient::new(request_client),
        }
    }

    pub fn list(
        &self,
        request: StagesListRequest,
        options: Option<RequestOptions>,
    ) -> Task<PaginatedStageList> {
        let inner = self.inner.clone();
        Task::spawn(move || inner.list(&request, options.as_ref()))
    }

    pub fn retrieve(
        &self,
        id: impl Into<String>,
        request: StagesRetrieveRequest,
        options: Option<RequestOptions>,
    ) -> Task<Stage> {
        let inner = self.inner.clone();
        let id = id.into();
        Task::spawn(move || inner.retrieve(&id, &request, options.as_ref()))
    }
}
