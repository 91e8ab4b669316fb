use chrono::{DateTime, Utc};

use super::types::{
    PaginatedTimeOffBalanceList, TimeOffBalance, TimeOffBalancesListRequestExpand,
    TimeOffBalancesListRequestPolicyType,
};
use crate::error::Result;
use crate::request::{QueryParams, RequestClient, RequestOptions, path_segment};
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct TimeOffBalancesListRequest {
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub cursor: Option<String>,
    pub employee_id: Option<String>,
    pub expand: Option<TimeOffBalancesListRequestExpand>,
    pub include_deleted_data: Option<bool>,
    pub include_remote_data: Option<bool>,
    pub modified_after: Option<DateTime<Utc>>,
    pub modified_before: Option<DateTime<Utc>>,
    pub page_size: Option<i64>,
    pub policy_type: Option<TimeOffBalancesListRequestPolicyType>,
    pub remote_fields: Option<String>,
    pub remote_id: Option<String>,
    pub show_enum_origins: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TimeOffBalancesRetrieveRequest {
    pub expand: Option<TimeOffBalancesListRequestExpand>,
    pub include_remote_data: Option<bool>,
    pub remote_fields: Option<String>,
    pub show_enum_origins: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TimeOffBalancesClient {
    request_client: RequestClient,
}

impl TimeOffBalancesClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self { request_client }
    }

    /// Returns a list of `TimeOffBalance` objects.
    pub fn list(
        &self,
        request: &TimeOffBalancesListRequest,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedTimeOffBalanceList> {
        let query = QueryParams::new()
            .opt("created_after", &request.created_after)
            .opt("created_before", &request.created_before)
            .opt("cursor", &request.cursor)
            .opt("employee_id", &request.employee_id)
            .opt("expand", &request.expand)
            .opt("include_deleted_data", &request.include_deleted_data)
            .opt("include_remote_data", &request.include_remote_data)
            .opt("modified_after", &request.modified_after)
            .opt("modified_before", &request.modified_before)
            .opt("page_size", &request.page_size)
            .opt("policy_type", &request.policy_type)
            .opt("remote_fields", &request.remote_fields)
            .opt("remote_id", &request.remote_id)
            .opt("show_enum_origins", &request.show_enum_origins);
        self.request_client
            .get("/api/hris/v1/time-off-balances", query, options)
    }

    /// Returns a `TimeOffBalance` object with the given `id`.
    pub fn retrieve(
        &self,
        id: &str,
        request: &TimeOffBalancesRetrieveRequest,
        options: Option<&RequestOptions>,
    ) -> Result<TimeOffBalance> {
        let query = QueryParams::new()
            .opt("expand", &request.expand)
            .opt("include_remote_data", &request.include_remote_data)
            .opt("remote_fields", &request.remote_fields)
            .opt("show_enum_origins", &request.show_enum_origins);
        self.request_client
            .get(&format!("/api/hris/v1/time-off-balances/{}", path_segment(id)), query, options)
    }
}

#[derive(Debug, Clone)]
pub struct AsyncTimeOffBalancesClient {
    inner: TimeOffBalancesClient,
}

impl AsyncTimeOffBalancesClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            inner: TimeOffBalancesClient::new(request_client),
        }
    }

    pub fn list(
        &self,
        request: TimeOffBalancesListRequest,
        options: Option<RequestOptions>,
    ) -> Task<PaginatedTimeOffBalanceList> {
        let inner = self.inner.clone();
        Task::spawn(move || inner.list(&request, options.as_ref()))
    }

    pub fn retrieve(
        &self,
        id: impl Into<String>,
        request: TimeOffBalancesRetrieveRequest,
        options: Option<RequestOptions>,
    ) -> Task<TimeOffBalance> {
        let inner = self.inner.clone();
        let id = id.into();
        Task::spawn(move || inner.retrieve(&id, &request, options.as_ref()))
    }
}
