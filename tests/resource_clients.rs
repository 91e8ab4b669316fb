use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use merge_api::accounting::IssuesListRequest;
use merge_api::ats::{JobStatus, JobStatusEnum, JobsListRequest, JobsRetrieveRequest};
use merge_api::filestorage::{DataPassthroughRequest, MethodEnum, SelectiveSyncMetaListRequest};
use merge_api::hris::{PolicyTypeEnum, TimeOffBalancesListRequest};
use merge_api::ticketing::{
    ProjectsListRequest, ProjectsUsersListRequest, ProjectsUsersListRequestExpand,
};
use merge_api::{
    AsyncMergeClient, ClientConfig, Error, ErrorKind, HttpRequest, HttpResponse, MergeClient,
    RequestOptions, Transport,
};

/// Records every request and answers from a queue of canned responses.
#[derive(Default)]
struct Recorder {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl Recorder {
    fn replying(status: u16, body: &str) -> Arc<Self> {
        let recorder = Self::default();
        recorder.responses.lock().unwrap().push_back(HttpResponse {
            status,
            body: body.to_string(),
        });
        Arc::new(recorder)
    }

    fn only_request(&self) -> HttpRequest {
        let requests = self.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        requests[0].clone()
    }
}

impl Transport for Recorder {
    fn send(&self, request: HttpRequest) -> merge_api::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(HttpResponse {
                status: 200,
                body: "{}".to_string(),
            }))
    }
}

fn config() -> ClientConfig {
    ClientConfig::new("test-key").account_token("acct-token")
}

fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

const EMPTY_PAGE: &str = r#"{"next":null,"previous":null,"results":[]}"#;

#[test]
fn list_without_parameters_sends_empty_query() {
    let transport = Recorder::replying(200, EMPTY_PAGE);
    let client = MergeClient::with_transport(config(), transport.clone());

    let page = client
        .ticketing
        .projects
        .list(&ProjectsListRequest::default(), None)
        .unwrap();

    assert!(page.results.is_empty());
    assert_eq!(page.next, None);
    let request = transport.only_request();
    assert_eq!(request.method, reqwest::Method::GET);
    assert_eq!(request.path, "/api/ticketing/v1/projects");
    assert!(request.query.is_empty());
    assert!(request.body.is_none());
}

#[test]
fn auth_and_account_headers_are_sent() {
    let transport = Recorder::replying(200, EMPTY_PAGE);
    let client = MergeClient::with_transport(config(), transport.clone());

    client
        .ticketing
        .projects
        .list(&ProjectsListRequest::default(), None)
        .unwrap();

    let request = transport.only_request();
    assert_eq!(header(&request, "authorization"), Some("Bearer test-key"));
    assert_eq!(header(&request, "x-account-token"), Some("acct-token"));
}

#[test]
fn request_options_override_credentials_and_add_headers() {
    let transport = Recorder::replying(200, EMPTY_PAGE);
    let client = MergeClient::with_transport(config(), transport.clone());
    let options = RequestOptions::new()
        .api_key("other-key")
        .account_token("other-account")
        .header("X-Trace-Id", "abc123")
        .timeout(Duration::from_secs(3));

    client
        .ticketing
        .projects
        .list(&ProjectsListRequest::default(), Some(&options))
        .unwrap();

    let request = transport.only_request();
    assert_eq!(header(&request, "authorization"), Some("Bearer other-key"));
    assert_eq!(header(&request, "x-account-token"), Some("other-account"));
    assert_eq!(header(&request, "x-trace-id"), Some("abc123"));
    assert_eq!(request.timeout, Some(Duration::from_secs(3)));
}

#[test]
fn named_parameters_take_precedence_over_extra_query() {
    let transport = Recorder::replying(200, EMPTY_PAGE);
    let client = MergeClient::with_transport(config(), transport.clone());
    let options = RequestOptions::new()
        .query("page_size", "10")
        .query("debug", "1");
    let request = TimeOffBalancesListRequest {
        page_size: Some(25),
        policy_type: Some(PolicyTypeEnum::JuryDuty),
        ..Default::default()
    };

    client
        .hris
        .time_off_balances
        .list(&request, Some(&options))
        .unwrap();

    let sent = transport.only_request();
    assert!(sent.query.contains(&("page_size".to_string(), "25".to_string())));
    assert!(sent.query.contains(&("debug".to_string(), "1".to_string())));
    assert!(sent.query.contains(&("policy_type".to_string(), "JURY_DUTY".to_string())));
    assert_eq!(sent.query.iter().filter(|(k, _)| k == "page_size").count(), 1);
}

#[test]
fn typed_parameters_are_encoded_on_the_wire() {
    let transport = Recorder::replying(200, EMPTY_PAGE);
    let client = MergeClient::with_transport(config(), transport.clone());
    let request = IssuesListRequest {
        first_incident_time_after: Some(Utc.with_ymd_and_hms(2022, 12, 5, 16, 19, 15).unwrap()),
        include_muted: Some("true".to_string()),
        status: Some(merge_api::accounting::IssuesListRequestStatus::Ongoing),
        ..Default::default()
    };

    client.accounting.issues.list(&request, None).unwrap();

    let sent = transport.only_request();
    assert_eq!(sent.path, "/api/accounting/v1/issues");
    assert_eq!(
        sent.query,
        vec![
            (
                "first_incident_time_after".to_string(),
                "2022-12-05T16:19:15Z".to_string()
            ),
            ("include_muted".to_string(), "true".to_string()),
            ("status".to_string(), "ONGOING".to_string()),
        ]
    );
}

#[test]
fn sub_resource_path_and_expand() {
    let transport = Recorder::replying(
        200,
        r#"{"next":"cD0yMDIx","results":[{"id":"u1","email_address":"hello@merge.dev","roles":["r1"]}]}"#,
    );
    let client = MergeClient::with_transport(config(), transport.clone());
    let request = ProjectsUsersListRequest {
        expand: Some(ProjectsUsersListRequestExpand::RolesTeams),
        ..Default::default()
    };

    let page = client
        .ticketing
        .projects
        .users_list("proj-9", &request, None)
        .unwrap();

    assert!(page.has_next());
    assert_eq!(page.previous, None);
    assert_eq!(page.results[0].email_address.as_deref(), Some("hello@merge.dev"));
    let sent = transport.only_request();
    assert_eq!(sent.path, "/api/ticketing/v1/projects/proj-9/users");
    assert_eq!(sent.query, vec![("expand".to_string(), "roles,teams".to_string())]);
}

#[test]
fn retrieve_parses_union_fields() {
    let transport = Recorder::replying(
        200,
        r#"{"id":"job-1","name":"Engineer","status":"OPEN","type":"POSTING"}"#,
    );
    let client = MergeClient::with_transport(config(), transport.clone());

    let job = client
        .ats
        .jobs
        .retrieve("job-1", &JobsRetrieveRequest::default(), None)
        .unwrap();

    assert_eq!(job.status, Some(JobStatus::Enum(JobStatusEnum::Open)));
    assert_eq!(transport.only_request().path, "/api/ats/v1/jobs/job-1");
}

#[test]
fn path_ids_are_percent_encoded() {
    let transport = Recorder::replying(200, r#"{"results":[]}"#);
    let client = MergeClient::with_transport(config(), transport.clone());

    client
        .ticketing
        .projects
        .users_list("team/1?x=y#z", &ProjectsUsersListRequest::default(), None)
        .unwrap();

    assert_eq!(
        transport.only_request().path,
        "/api/ticketing/v1/projects/team%2F1%3Fx%3Dy%23z/users"
    );
}

#[test]
fn non_success_status_surfaces_as_http_error() {
    let transport = Recorder::replying(404, r#"{"detail":"Not found."}"#);
    let client = MergeClient::with_transport(config(), transport);

    let err = client.accounting.issues.retrieve("missing", None).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(err.status(), Some(404));
    match err {
        Error::Http { body, .. } => assert!(body.contains("Not found")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn malformed_body_is_a_parse_error() {
    let transport = Recorder::replying(200, "<html>gateway</html>");
    let client = MergeClient::with_transport(config(), transport);

    let err = client
        .ats
        .jobs
        .list(&JobsListRequest::default(), None)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn bad_element_fails_the_whole_page() {
    let transport = Recorder::replying(
        200,
        r#"{"results":[{"id":"ok"},{"id":"bad","created_at":"not a date"}]}"#,
    );
    let client = MergeClient::with_transport(config(), transport);

    let err = client
        .ticketing
        .projects
        .list(&ProjectsListRequest::default(), None)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn passthrough_posts_serialized_body() {
    let transport = Recorder::replying(
        200,
        r#"{"method":"GET","path":"/scooters","status":200,"response":{"ok":true}}"#,
    );
    let client = MergeClient::with_transport(config(), transport.clone());
    let mut request = DataPassthroughRequest::new(MethodEnum::Get, "/scooters");
    request.normalize_response = Some(true);

    let response = client.filestorage.passthrough.create(&request, None).unwrap();

    assert_eq!(response.status, 200);
    let sent = transport.only_request();
    assert_eq!(sent.method, reqwest::Method::POST);
    assert_eq!(sent.path, "/api/filestorage/v1/passthrough");
    let body = sent.body.unwrap();
    assert_eq!(body["method"], "GET");
    assert_eq!(body["path"], "/scooters");
    assert_eq!(body["normalize_response"], true);
}

#[tokio::test]
async fn async_twin_matches_blocking_contract() {
    let transport = Recorder::replying(
        200,
        r#"{"results":[{"common_model":"File","condition_type":"DATE_TIME","operators":[]}]}"#,
    );
    let client = AsyncMergeClient::with_transport(config(), transport.clone());
    let request = SelectiveSyncMetaListRequest {
        page_size: Some(5),
        ..Default::default()
    };

    let page = client
        .filestorage
        .selective_sync
        .meta_list(request, None)
        .await
        .unwrap();

    assert_eq!(page.results.len(), 1);
    let sent = transport.only_request();
    assert_eq!(sent.path, "/api/filestorage/v1/selective-sync/meta");
    assert_eq!(sent.query, vec![("page_size".to_string(), "5".to_string())]);
}

#[tokio::test]
async fn async_twin_propagates_failures() {
    let transport = Recorder::replying(500, "boom");
    let client = AsyncMergeClient::with_transport(config(), transport);

    let err = client
        .ats
        .jobs
        .retrieve("job-1", JobsRetrieveRequest::default(), None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn async_client_can_be_built_inside_the_runtime() {
    let client = AsyncMergeClient::new(ClientConfig::new("k"));
    drop(client);
}

#[tokio::test]
async fn async_client_sends_through_the_blocking_pool() {
    let config = ClientConfig::new("k").base_url("http://127.0.0.1:1");
    let client = AsyncMergeClient::new(config);

    let err = client
        .accounting
        .issues
        .retrieve("issue-1".to_string(), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    tokio::task::spawn_blocking(move || drop(client))
        .await
        .unwrap();
}
