use super::types::{DataPassthroughRequest, RemoteResponse};
use crate::error::Result;
use crate::request::{RequestClient, RequestOptions};
use crate::task::Task;

#[derive(Debug, Clone)]
pub struct PassthroughClient {
    request_client: RequestClient,
}

impl PassthroughClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self { request_client }
    }

    /// Pull data from an endpoint not currently supported by Merge.
    pub fn create(
        &self,
        request: &DataPassthroughRequest,
        options: Option<&RequestOptions>,
    ) -> Result<RemoteResponse> {
        self.request_client
            .post("/api/filestorage/v1/passthrough", request, options)
    }
}

#[derive(Debug, Clone)]
pub struct AsyncPassthroughClient {
    inner: PassthroughClient,
}

impl AsyncPassthroughClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            inner: PassthroughClient::new(request_client),
        }
    }

    pub fn create(
        &self,
        request: DataPassthroughRequest,
        options: Option<RequestOptions>,
    ) -> Task<RemoteResponse> {
        let inner = self.inner.clone();
        Task::spawn(move || inner.create(&request, options.as_ref()))
    }
}
