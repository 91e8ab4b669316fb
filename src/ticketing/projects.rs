use chrono::{DateTime, Utc};

use super::types::{PaginatedProjectList, PaginatedUserList, Project, ProjectsUsersListRequestExpand};
use crate::error::Result;
use crate::request::{QueryParams, RequestClient, RequestOptions, path_segment};
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct ProjectsListRequest {
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub cursor: Option<String>,
    pub include_deleted_data: Option<bool>,
    pub include_remote_data: Option<bool>,
    pub modified_after: Option<DateTime<Utc>>,
    pub modified_before: Option<DateTime<Utc>>,
    pub page_size: Option<i64>,
    pub remote_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectsRetrieveRequest {
    pub include_remote_data: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectsUsersListRequest {
    pub cursor: Option<String>,
    pub expand: Option<ProjectsUsersListRequestExpand>,
    pub include_deleted_data: Option<bool>,
    pub include_remote_data: Option<bool>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ProjectsClient {
    request_client: RequestClient,
}

impl ProjectsClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self { request_client }
    }

    /// Returns a list of `Project` objects.
    pub fn list(
        &self,
        request: &ProjectsListRequest,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedProjectList> {
        let query = QueryParams::new()
            .opt("created_after", &request.created_after)
            .opt("created_before", &request.created_before)
            .opt("cursor", &request.cursor)
            .opt("include_deleted_data", &request.include_deleted_data)
            .opt("include_remote_data", &request.include_remote_data)
            .opt("modified_after", &request.modified_after)
            .opt("modified_before", &request.modified_before)
            .opt("page_size", &request.page_size)
            .opt("remote_id", &request.remote_id);
        self.request_client
            .get("/api/ticketing/v1/projects", query, options)
    }

    /// Returns a `Project` object with the given `id`.
    pub fn retrieve(
        &self,
        id: &str,
        request: &ProjectsRetrieveRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Project> {
        let query = QueryParams::new().opt("include_remote_data", &request.include_remote_data);
        self.request_client
            .get(&format!("/api/ticketing/v1/projects/{}", path_segment(id)), query, options)
    }

    /// Returns a list of `User` objects attached to the project.
    pub fn users_list(
        &self,
        parent_id: &str,
        request: &ProjectsUsersListRequest,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedUserList> {
        let query = QueryParams::new()
            .opt("cursor", &request.cursor)
            .opt("expand", &request.expand)
            .opt("include_deleted_data", &request.include_deleted_data)
            .opt("include_remote_data", &request.include_remote_data)
            .opt("page_size", &request.page_size);
        self.request_client.get(
            &format!("/api/ticketing/v1/projects/{}/users", path_segment(parent_id)),
            query,
            options,
        )
    }
}

/// [`ProjectsClient`] with every call submitted as a [`Task`].
#[derive(Debug, Clone)]
pub struct AsyncProjectsClient {
    inner: ProjectsClient,
}

impl AsyncProjectsClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            inner: ProjectsClient::new(request_client),
        }
    }

    pub fn list(
        &self,
        request: ProjectsListRequest,
        options: Option<RequestOptions>,
    ) -> Task<PaginatedProjectList> {
        let inner = self.inner.clone();
        Task::spawn(move || inner.list(&request, options.as_ref()))
    }

    pub fn retrieve(
        &self,
        id: impl Into<String>,
        request: ProjectsRetrieveRequest,
        options: Option<RequestOptions>,
    ) -> Task<Project> {
        let inner = self.inner.clone();
        let id = id.into();
        Task::spawn(move || inner.retrieve(&id, &request, options.as_ref()))
    }

    pub fn users_list(
        &self,
        parent_id: impl Into<String>,
        request: ProjectsUsersListRequest,
        options: Option<RequestOptions>,
    ) -> Task<PaginatedUserList> {
        let inner = self.inner.clone();
        let parent_id = parent_id.into();
        Task::spawn(move || inner.users_list(&parent_id, &request, options.as_ref()))
    }
}
