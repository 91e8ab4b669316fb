//! Ticketing category: projects and their users.

mod projects;
mod types;

pub use projects::{
    AsyncProjectsClient, ProjectsClient, ProjectsListRequest, ProjectsRetrieveRequest,
    ProjectsUsersListRequest,
};
pub use types::*;

use crate::request::RequestClient;

#[derive(Debug, Clone)]
pub struct TicketingClient {
    pub projects: ProjectsClient,
}

impl TicketingClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            projects: ProjectsClient::new(request_client),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AsyncTicketingClient {
    pub projects: AsyncProjectsClient,
}

impl AsyncTicketingClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            projects: AsyncProjectsClient::new(request_client),
        }
    }
}
