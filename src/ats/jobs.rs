use chrono::{DateTime, Utc};

use super::types::{
    Job, JobsListRequestExpand, JobsListRequestStatus, JobsRetrieveRequestExpand,
    JobsScreeningQuestionsListRequestExpand, PaginatedJobList, PaginatedScreeningQuestionList,
};
use crate::error::Result;
use crate::request::{QueryParams, RequestClient, RequestOptions, path_segment};
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct JobsListRequest {
    pub code: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub cursor: Option<String>,
    pub expand: Option<JobsListRequestExpand>,
    pub include_deleted_data: Option<bool>,
    pub include_remote_data: Option<bool>,
    pub modified_after: Option<DateTime<Utc>>,
    pub modified_before: Option<DateTime<Utc>>,
    /// Comma-separated office ids.
    pub offices: Option<String>,
    pub page_size: Option<i64>,
    pub remote_fields: Option<String>,
    pub remote_id: Option<String>,
    pub show_enum_origins: Option<String>,
    pub status: Option<JobsListRequestStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct JobsRetrieveRequest {
    pub expand: Option<JobsRetrieveRequestExpand>,
    pub include_remote_data: Option<bool>,
    pub remote_fields: Option<String>,
    pub show_enum_origins: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct JobsScreeningQuestionsListRequest {
    pub cursor: Option<String>,
    pub expand: Option<JobsScreeningQuestionsListRequestExpand>,
    pub include_deleted_data: Option<bool>,
    pub include_remote_data: Option<bool>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct JobsClient {
    request_client: RequestClient,
}

impl JobsClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self { request_client }
    }

    /// Returns a list of `Job` objects.
    pub fn list(
        &self,
        request: &JobsListRequest,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedJobList> {
        let query = QueryParams::new()
            .opt("code", &request.code)
            .opt("created_after", &request.created_after)
            .opt("created_before", &request.created_before)
            .opt("cursor", &request.cursor)
            .opt("expand", &request.expand)
            .opt("include_deleted_data", &request.include_deleted_data)
            .opt("include_remote_data", &request.include_remote_data)
            .opt("modified_after", &request.modified_after)
            .opt("modified_before", &request.modified_before)
            .opt("offices", &request.offices)
            .opt("page_size", &request.page_size)
            .opt("remote_fields", &request.remote_fields)
            .opt("remote_id", &request.remote_id)
            .opt("show_enum_origins", &request.show_enum_origins)
            .opt("status", &request.status);
        self.request_client.get("/api/ats/v1/jobs", query, options)
    }

    /// Returns a `Job` object with the given `id`.
    pub fn retrieve(
        &self,
        id: &str,
        request: &JobsRetrieveRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Job> {
        let query = QueryParams::new()
            .opt("expand", &request.expand)
            .opt("include_remote_data", &request.include_remote_data)
            .opt("remote_fields", &request.remote_fields)
            .opt("show_enum_origins", &request.show_enum_origins);
        self.request_client
            .get(&format!("/api/ats/v1/jobs/{}", path_segment(id)), query, options)
    }

    /// Returns the `ScreeningQuestion` objects attached to a job.
    pub fn screening_questions_list(
        &self,
        job_id: &str,
        request: &JobsScreeningQuestionsListRequest,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedScreeningQuestionList> {
        let query = QueryParams::new()
            .opt("cursor", &request.cursor)
            .opt("expand", &request.expand)
            .opt("include_deleted_data", &request.include_deleted_data)
            .opt("include_remote_data", &request.include_remote_data)
            .opt("page_size", &request.page_size);
        self.request_client.get(
            &format!("/api/ats/v1/jobs/{}/screening-questions", path_segment(job_id)),
            query,
            options,
        )
    }
}

#[derive(Debug, Clone)]
pub struct AsyncJobsClient {
    inner: JobsClient,
}

impl AsyncJobsClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            inner: JobsClient::new(request_client),
        }
    }

    pub fn list(
        &self,
        request: JobsListRequest,
        options: Option<RequestOptions>,
    ) -> Task<PaginatedJobList> {
        let inner = self.inner.clone();
        Task::spawn(move || inner.list(&request, options.as_ref()))
    }

    pub fn retrieve(
        &self,
        id: impl Into<String>,
        request: JobsRetrieveRequest,
        options: Option<RequestOptions>,
    ) -> Task<Job> {
        let inner = self.inner.clone();
        let id = id.into();
        Task::spawn(move || inner.retrieve(&id, &request, options.as_ref()))
    }

    pub fn screening_questions_list(
        &self,
        job_id: impl Into<String>,
        request: JobsScreeningQuestionsListRequest,
        options: Option<RequestOptions>,
    ) -> Task<PaginatedScreeningQuestionList> {
        let inner = self.inner.clone();
        let job_id = job_id.into();
        Task::spawn(move || inner.screening_questions_list(&job_id, &request, options.as_ref()))
    }
}
