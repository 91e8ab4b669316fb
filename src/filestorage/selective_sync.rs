use super::types::PaginatedConditionSchemaList;
use crate::error::Result;
use crate::request::{QueryParams, RequestClient, RequestOptions};
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct SelectiveSyncMetaListRequest {
    pub common_model: Option<String>,
    pub cursor: Option<String>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct SelectiveSyncClient {
    request_client: RequestClient,
}

impl SelectiveSyncClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self { request_client }
    }

    /// Lists the fields selective sync conditions can be built on.
    pub fn meta_list(
        &self,
        request: &SelectiveSyncMetaListRequest,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedConditionSchemaList> {
        let query = QueryParams::new()
            .opt("common_model", &request.common_model)
            .opt("cursor", &request.cursor)
            .opt("page_size", &request.page_size);
        self.request_client
            .get("/api/filestorage/v1/selective-sync/meta", query, options)
    }
}

#[derive(Debug, Clone)]
pub struct AsyncSelectiveSyncClient {
    inner: SelectiveSyncClient,
}

impl AsyncSelectiveSyncClient {
    pub fn new(request_client: RequestClient) -> Self {
        Self {
            inner: SelectiveSyncClient::new(request_client),
        }
    }

    pub fn meta_list(
        &self,
        request: SelectiveSyncMetaListRequest,
        options: Option<RequestOptions>,
    ) -> Task<PaginatedConditionSchemaList> {
        let inner = self.inner.clone();
        Task::spawn(move || inner.meta_list(&request, options.as_ref()))
    }
}
