use chrono::{DateTime, Utc};

use super::types::{Issue, IssuesListRequestStatus, PaginatedIssueList};
use crate::error::Result;
use crate::request::{QueryParams, RequestClient, RequestOptions, path_segment};
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct IssuesListRequest {
    pub account_token: Option<String>,
    pub cursor: Option<String>,
    /// Issues most recently seen before this date (inclusive).
    pub end_date: Option<String>,
    pub end_user_organization_name: Option<String>,
    pub first_incident_time_after: Option<DateTime<Utc>>,
    pub first_incident_time_before: Option<DateTime<Utc>>,
    /// `"true"` to include muted issues.
    pub include_muted: Option<String>,
    pub integration_name: Option<String>,
    pub last_incident_time_after: Option<DateTime<Utc>>,
    pub last_incident_time_before: Option<DateTime<Utc>>,
    pub linked_account_id: Option<String>,
    pub page_size: Option<i64>,
    pub start_date: Option<String>,
    pub status: Option<IssuesListRequestStatus>,
}

#[derive(Debug, Clone)]
pub struct IssuesClient {
    request_client: RequestClient,
}

impl IssuesClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self { request_client }
    }

    /// Gets all issues for the organization.
    pub fn list(
        &self,
        request: &IssuesListRequest,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedIssueList> {
        let query = QueryParams::new()
            .opt("account_token", &request.account_token)
            .opt("cursor", &request.cursor)
            .opt("end_date", &request.end_date)
            .opt("end_user_organization_name", &request.end_user_organization_name)
            .opt("first_incident_time_after", &request.first_incident_time_after)
            .opt("first_incident_time_before", &request.first_incident_time_before)
            .opt("include_muted", &request.include_muted)
            .opt("integration_name", &request.integration_name)
            .opt("last_incident_time_after", &request.last_incident_time_after)
            .opt("last_incident_time_before", &request.last_incident_time_before)
            .opt("linked_account_id", &request.linked_account_id)
            .opt("page_size", &request.page_size)
            .opt("start_date", &request.start_date)
            .opt("status", &request.status);
        self.request_client
            .get("/api/accounting/v1/issues", query, options)
    }

    pub fn retrieve(&self, id: &str, options: Option<&RequestOptions>) -> Result<Issue> {
        self.request_client.get(
            &format!("/api/accounting/v1/issues/{}", path_segment(id)),
            QueryParams::new(),
            options,
        )
    }
}

#[derive(Debug, Clone)]
pub struct AsyncIssuesClient {
    inner: IssuesClient,
}

impl AsyncIssuesClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            inner: IssuesClient::new(request_client),
        }
    }

    pub fn list(
        &self,
        request: IssuesListRequest,
        options: Option<RequestOptions>,
    ) -> Task<PaginatedIssueList> {
        let inner = self.inner.clone();
        Task::spawn(move || inner.list(&request, options.as_ref()))
    }

    pub fn retrieve(&self, id: impl Into<String>, options: Option<RequestOptions>) -> Task<Issue> {
        let inner = self.inner.clone();
        let id = id.into();
        Task::spawn(move || inner.retrieve(&id, options.as_ref()))
    }
}
