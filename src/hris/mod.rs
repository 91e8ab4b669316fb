//! HRIS category: time-off balances and employer benefits.

mod time_off_balances;
mod types;

pub use time_off_balances::{
    AsyncTimeOffBalancesClient, TimeOffBalancesClient, TimeOffBalancesListRequest,
    TimeOffBalancesRetrieveRequest,
};
pub use types::*;

use crate::request::RequestClient;

#[derive(Debug, Clone)]
pub struct HrisClient {
    pub time_off_balances: TimeOffBalancesClient,
}

impl HrisClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            time_off_balances: TimeOffBalancesClient::new(request_client),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AsyncHrisClient {
    pub time_off_balances: AsyncTimeOffBalancesClient,
}

impl AsyncHrisClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            time_off_balances: AsyncTimeOffBalancesClient::new(request_client),
        }
    }
}
