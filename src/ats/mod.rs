//! Applicant tracking: jobs and their screening questions.

mod jobs;
mod types;

pub use jobs::{
    AsyncJobsClient, JobsClient, JobsListRequest, JobsRetrieveRequest,
    JobsScreeningQuestionsListRequest,
};
pub use types::*;

use crate::request::RequestClient;

#[derive(Debug, Clone)]
pub struct AtsClient {
    pub jobs: JobsClient,
}

impl AtsClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            jobs: JobsClient::new(request_client),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AsyncAtsClient {
    pub jobs: AsyncJobsClient,
}

impl AsyncAtsClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            jobs: AsyncJobsClient::new(request_client),
        }
    }
}
