//! File storage category: data passthrough and selective-sync metadata.

mod passthrough;
mod selective_sync;
mod types;

pub use passthrough::{AsyncPassthroughClient, PassthroughClient};
pub use selective_sync::{
    AsyncSelectiveSyncClient, SelectiveSyncClient, SelectiveSyncMetaListRequest,
};
pub use types::*;

use crate::request::RequestClient;

#[derive(Debug, Clone)]
pub struct FilestorageClient {
    pub passthrough: PassthroughClient,
    pub selective_sync: SelectiveSyncClient,
}

impl FilestorageClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            passthrough: PassthroughClient::new(request_client.clone()),
            selective_sync: SelectiveSyncClient::new(request_client),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AsyncFilestorageClient {
    pub passthrough: AsyncPassthroughClient,
    pub selective_sync: AsyncSelectiveSyncClient,
}

impl AsyncFilestorageClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            passthrough: AsyncPassthroughClient::new(request_client.clone()),
            selective_sync: AsyncSelectiveSyncClient::new(request_client),
        }
    }
}
