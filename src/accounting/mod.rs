//! Accounting category: integration issues, purchase orders and periods.

mod issues;
mod types;

pub use issues::{AsyncIssuesClient, IssuesClient, IssuesListRequest};
pub use types::*;

use crate::request::RequestClient;

#[derive(Debug, Clone)]
pub struct AccountingClient {
    pub issues: IssuesClient,
}

impl AccountingClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            issues: IssuesClient::new(request_client),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AsyncAccountingClient {
    pub issues: AsyncIssuesClient,
}

impl AsyncAccountingClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            issues: AsyncIssuesClient::new(request_client),
        }
    }
}
