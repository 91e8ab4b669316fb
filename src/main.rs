mod command_tree;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use clap::{Arg, ArgAction, ArgMatches, Command};
use command_tree::{CommandTree, Location, ParamDef, ParamKind};
use merge_api::config::{ACCOUNT_TOKEN_ENV, API_KEY_ENV, API_URL_ENV};
use merge_api::{
    ClientConfig, MergeClient, Model, RequestOptions, WireEnum, accounting, ats, crm,
    filestorage, hris, ticketing,
};
use serde_json::Value;
use std::{env, fs, io::Write, path::Path, time::Duration};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MERGE_LOG";

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{}", error_line(&err));
        std::process::exit(1);
    }
}

/// Library errors already carry their cause in `Display`.
fn error_line(err: &anyhow::Error) -> String {
    format!("error: {err}")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let tree = command_tree::command_tree();
    let cli = build_cli(&tree);
    let matches = cli.get_matches();

    if let Some(matches) = matches.subcommand_matches("list") {
        return handle_list(&tree, matches);
    }
    if let Some(matches) = matches.subcommand_matches("describe") {
        return handle_describe(&tree, matches);
    }
    if let Some(matches) = matches.subcommand_matches("tree") {
        return handle_tree(&tree, matches);
    }

    let config = build_config(&tree, &matches)?;
    let options = build_options(&matches)?;
    let pretty = matches.get_flag("pretty");

    let (res_name, res_matches) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("resource required"))?;
    let (op_name, op_matches) = res_matches
        .subcommand()
        .ok_or_else(|| anyhow!("operation required"))?;
    if tree.find_op(res_name, op_name).is_none() {
        bail!("unknown command {res_name} {op_name}");
    }

    debug!(resource = res_name, op = op_name, base_url = %config.base_url, "dispatching");
    let client = MergeClient::new(config);
    let value = dispatch(&client, res_name, op_name, op_matches, options.as_ref())?;

    let output = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        value.to_string()
    };
    write_stdout_line(&output)
}

fn build_cli(tree: &CommandTree) -> Command {
    let mut cmd = Command::new("merge")
        .about("Merge unified API client")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Pretty-print JSON output"),
        )
        .arg(
            Arg::new("base_url")
                .long("base-url")
                .global(true)
                .value_name("URL")
                .help(format!("Override base API URL (or {API_URL_ENV})")),
        )
        .arg(
            Arg::new("api_key")
                .long("api-key")
                .global(true)
                .value_name("KEY")
                .help(format!("Override {API_KEY_ENV}")),
        )
        .arg(
            Arg::new("account_token")
                .long("account-token")
                .global(true)
                .value_name("TOKEN")
                .help(format!("Override {ACCOUNT_TOKEN_ENV}")),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .value_name("SECS")
                .help("Per-request timeout in seconds"),
        )
        .arg(
            Arg::new("header")
                .long("header")
                .global(true)
                .action(ArgAction::Append)
                .value_name("NAME:VALUE")
                .help("Extra request header (repeatable)"),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .global(true)
                .action(ArgAction::Append)
                .value_name("KEY=VALUE")
                .help("Extra query parameter, overridden by named flags (repeatable)"),
        );

    cmd = cmd.subcommand(
        Command::new("list")
            .about("List resources and operations")
            .arg(json_flag()),
    );

    cmd = cmd.subcommand(
        Command::new("describe")
            .about("Describe a specific operation")
            .arg(Arg::new("resource").required(true))
            .arg(Arg::new("op").required(true))
            .arg(json_flag()),
    );

    cmd = cmd.subcommand(
        Command::new("tree")
            .about("Show full command tree")
            .arg(json_flag()),
    );

    for resource in &tree.resources {
        let mut res_cmd = Command::new(resource.name)
            .about(resource.name)
            .subcommand_required(true)
            .arg_required_else_help(true);

        for op in &resource.ops {
            let mut op_cmd = Command::new(op.name).about(op.description);
            for param in &op.params {
                op_cmd = op_cmd.arg(build_param_arg(param));
            }
            if op.has_body {
                op_cmd = op_cmd.arg(
                    Arg::new("body")
                        .long("body")
                        .required(true)
                        .value_name("JSON")
                        .help("Request body JSON (or @file.json)"),
                );
            }
            res_cmd = res_cmd.subcommand(op_cmd);
        }
        cmd = cmd.subcommand(res_cmd);
    }

    cmd
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Emit machine-readable JSON")
}

fn build_config(tree: &CommandTree, matches: &ArgMatches) -> Result<ClientConfig> {
    let api_key = matches
        .get_one::<String>("api_key")
        .cloned()
        .or_else(|| env::var(API_KEY_ENV).ok())
        .with_context(|| format!("{API_KEY_ENV} missing"))?;

    let base_url = matches
        .get_one::<String>("base_url")
        .cloned()
        .or_else(|| env::var(API_URL_ENV).ok())
        .unwrap_or_else(|| tree.base_url.clone());

    let mut config = ClientConfig::new(api_key).base_url(base_url);
    if let Some(token) = matches
        .get_one::<String>("account_token")
        .cloned()
        .or_else(|| env::var(ACCOUNT_TOKEN_ENV).ok())
    {
        config = config.account_token(token);
    }
    if let Some(secs) = matches.get_one::<String>("timeout") {
        let secs: u64 = secs.parse().context("--timeout expects whole seconds")?;
        config = config.timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

fn build_options(matches: &ArgMatches) -> Result<Option<RequestOptions>> {
    let mut options = RequestOptions::new();
    let mut touched = false;
    for raw in matches.get_many::<String>("header").into_iter().flatten() {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| anyhow!("--header expects NAME:VALUE, got {raw}"))?;
        options = options.header(name.trim(), value.trim());
        touched = true;
    }
    for raw in matches.get_many::<String>("query").into_iter().flatten() {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("--query expects KEY=VALUE, got {raw}"))?;
        options = options.query(key, value);
        touched = true;
    }
    Ok(touched.then_some(options))
}

fn handle_list(tree: &CommandTree, matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("json") {
        let out: Vec<_> = tree
            .resources
            .iter()
            .map(|res| {
                let ops: Vec<&str> = res.ops.iter().map(|op| op.name).collect();
                serde_json::json!({"resource": res.name, "ops": ops})
            })
            .collect();
        write_stdout_line(&serde_json::to_string_pretty(&out)?)?;
        return Ok(());
    }

    for res in &tree.resources {
        write_stdout_line(res.name)?;
        for op in &res.ops {
            write_stdout_line(&format!("  {}", op.name))?;
        }
    }
    Ok(())
}

fn handle_describe(tree: &CommandTree, matches: &ArgMatches) -> Result<()> {
    let resource = matches
        .get_one::<String>("resource")
        .ok_or_else(|| anyhow!("resource required"))?;
    let op_name = matches
        .get_one::<String>("op")
        .ok_or_else(|| anyhow!("operation required"))?;

    let op = tree
        .find_op(resource, op_name)
        .ok_or_else(|| anyhow!("unknown command {resource} {op_name}"))?;

    if matches.get_flag("json") {
        write_stdout_line(&serde_json::to_string_pretty(op)?)?;
        return Ok(());
    }

    write_stdout_line(&format!("{} {}", resource, op.name))?;
    write_stdout_line(&format!("  method: {}", op.method))?;
    write_stdout_line(&format!("  path: {}", op.path))?;
    write_stdout_line(&format!("  description: {}", op.description))?;
    if !op.params.is_empty() {
        write_stdout_line("  params:")?;
        for param in &op.params {
            let req = if param.required { "required" } else { "optional" };
            let location = match param.location {
                Location::Path => "path".to_string(),
                Location::Query if param.id != param.name => format!("query {}", param.name),
                Location::Query => "query".to_string(),
            };
            write_stdout_line(&format!(
                "    --{}  {} {} ({})",
                param.flag,
                location,
                value_name(param.kind),
                req
            ))?;
        }
    }
    if op.has_body {
        write_stdout_line("  body: --body JSON or @file.json")?;
    }
    Ok(())
}

fn handle_tree(tree: &CommandTree, matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("json") {
        write_stdout_line(&serde_json::to_string_pretty(tree)?)?;
        return Ok(());
    }
    write_stdout_line("Run with --json for machine-readable output.")?;
    Ok(())
}

fn write_stdout_line(value: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    if let Err(err) = out.write_all(value.as_bytes()) {
        if err.kind() == std::io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        return Err(err.into());
    }
    if let Err(err) = out.write_all(b"\n") {
        if err.kind() == std::io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        return Err(err.into());
    }
    Ok(())
}

fn value_name(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::Text => "VALUE",
        ParamKind::Bool => "BOOL",
        ParamKind::Integer => "INT",
        ParamKind::Datetime => "RFC3339",
        ParamKind::Enum => "WIRE_VALUE",
    }
}

fn build_param_arg(param: &ParamDef) -> Arg {
    Arg::new(param.id)
        .long(param.flag.clone())
        .value_name(value_name(param.kind))
        .required(param.required && param.location == Location::Path)
}

fn text(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

fn path_arg(matches: &ArgMatches, name: &str) -> Result<String> {
    text(matches, name).ok_or_else(|| anyhow!("missing required argument --{}", flag(name)))
}

fn flag(name: &str) -> String {
    name.replace('_', "-")
}

fn boolean(matches: &ArgMatches, name: &str) -> Result<Option<bool>> {
    text(matches, name)
        .map(|raw| {
            raw.parse::<bool>()
                .with_context(|| format!("--{} expects true or false", flag(name)))
        })
        .transpose()
}

fn integer(matches: &ArgMatches, name: &str) -> Result<Option<i64>> {
    text(matches, name)
        .map(|raw| {
            raw.parse::<i64>()
                .with_context(|| format!("--{} expects an integer", flag(name)))
        })
        .transpose()
}

fn datetime(matches: &ArgMatches, name: &str) -> Result<Option<DateTime<Utc>>> {
    text(matches, name)
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .with_context(|| format!("--{} expects an RFC 3339 date-time", flag(name)))
        })
        .transpose()
}

/// Unknown wire values are passed through to the server unchanged.
fn wire<E: WireEnum>(matches: &ArgMatches, name: &str) -> Option<E> {
    text(matches, name).map(|raw| E::from_wire(&raw))
}

fn parse_body_arg(matches: &ArgMatches) -> Result<String> {
    let value = matches
        .get_one::<String>("body")
        .ok_or_else(|| anyhow!("missing required argument --body"))?;

    if let Some(path) = value.strip_prefix('@') {
        let body_path = Path::new(path);
        return fs::read_to_string(body_path)
            .map_err(|err| anyhow!("read body file {}: {err}", body_path.display()));
    }
    Ok(value.to_string())
}

fn dispatch(
    client: &MergeClient,
    resource: &str,
    op: &str,
    m: &ArgMatches,
    options: Option<&RequestOptions>,
) -> Result<Value> {
    let value = match (resource, op) {
        ("ats-jobs", "list") => {
            let request = ats::JobsListRequest {
                code: text(m, "code"),
                created_after: datetime(m, "created_after")?,
                created_before: datetime(m, "created_before")?,
                cursor: text(m, "cursor"),
                expand: wire(m, "expand"),
                include_deleted_data: boolean(m, "include_deleted_data")?,
                include_remote_data: boolean(m, "include_remote_data")?,
                modified_after: datetime(m, "modified_after")?,
                modified_before: datetime(m, "modified_before")?,
                offices: text(m, "offices"),
                page_size: integer(m, "page_size")?,
                remote_fields: text(m, "remote_fields"),
                remote_id: text(m, "remote_id"),
                show_enum_origins: text(m, "show_enum_origins"),
                status: wire(m, "status"),
            };
            client.ats.jobs.list(&request, options)?.to_value()
        }
        ("ats-jobs", "retrieve") => {
            let request = ats::JobsRetrieveRequest {
                expand: wire(m, "expand"),
                include_remote_data: boolean(m, "include_remote_data")?,
                remote_fields: text(m, "remote_fields"),
                show_enum_origins: text(m, "show_enum_origins"),
            };
            client
                .ats
                .jobs
                .retrieve(&path_arg(m, "id")?, &request, options)?
                .to_value()
        }
        ("ats-jobs", "screening-questions-list") => {
            let request = ats::JobsScreeningQuestionsListRequest {
                cursor: text(m, "cursor"),
                expand: wire(m, "expand"),
                include_deleted_data: boolean(m, "include_deleted_data")?,
                include_remote_data: boolean(m, "include_remote_data")?,
                page_size: integer(m, "page_size")?,
            };
            client
                .ats
                .jobs
                .screening_questions_list(&path_arg(m, "job_id")?, &request, options)?
                .to_value()
        }
        ("accounting-issues", "list") => {
            let request = accounting::IssuesListRequest {
                account_token: text(m, "filter_account_token"),
                cursor: text(m, "cursor"),
                end_date: text(m, "end_date"),
                end_user_organization_name: text(m, "end_user_organization_name"),
                first_incident_time_after: datetime(m, "first_incident_time_after")?,
                first_incident_time_before: datetime(m, "first_incident_time_before")?,
                include_muted: text(m, "include_muted"),
                integration_name: text(m, "integration_name"),
                last_incident_time_after: datetime(m, "last_incident_time_after")?,
                last_incident_time_before: datetime(m, "last_incident_time_before")?,
                linked_account_id: text(m, "linked_account_id"),
                page_size: integer(m, "page_size")?,
                start_date: text(m, "start_date"),
                status: wire(m, "status"),
            };
            client.accounting.issues.list(&request, options)?.to_value()
        }
        ("accounting-issues", "retrieve") => client
            .accounting
            .issues
            .retrieve(&path_arg(m, "id")?, options)?
            .to_value(),
        ("crm-stages", "list") => {
            let request = crm::StagesListRequest {
                created_after: datetime(m, "created_after")?,
                created_before: datetime(m, "created_before")?,
                cursor: text(m, "cursor"),
                include_deleted_data: boolean(m, "include_deleted_data")?,
                include_remote_data: boolean(m, "include_remote_data")?,
                include_remote_fields: boolean(m, "include_remote_fields")?,
                modified_after: datetime(m, "modified_after")?,
                modified_before: datetime(m, "modified_before")?,
                page_size: integer(m, "page_size")?,
                remote_id: text(m, "remote_id"),
            };
            client.crm.stages.list(&request, options)?.to_value()
        }
        ("crm-stages", "retrieve") => {
            let request = crm::StagesRetrieveRequest {
                include_remote_data: boolean(m, "include_remote_data")?,
                include_remote_fields: boolean(m, "include_remote_fields")?,
            };
            client
                .crm
                .stages
                .retrieve(&path_arg(m, "id")?, &request, options)?
                .to_value()
        }
        ("crm-leads", "retrieve") => {
            let request = crm::LeadsRetrieveRequest {
                expand: wire(m, "expand"),
                include_remote_data: boolean(m, "include_remote_data")?,
                include_remote_fields: boolean(m, "include_remote_fields")?,
            };
            client
                .crm
                .leads
                .retrieve(&path_arg(m, "id")?, &request, options)?
                .to_value()
        }
        ("hris-time-off-balances", "list") => {
            let request = hris::TimeOffBalancesListRequest {
                created_after: datetime(m, "created_after")?,
                created_before: datetime(m, "created_before")?,
                cursor: text(m, "cursor"),
                employee_id: text(m, "employee_id"),
                expand: wire(m, "expand"),
                include_deleted_data: boolean(m, "include_deleted_data")?,
                include_remote_data: boolean(m, "include_remote_data")?,
                modified_after: datetime(m, "modified_after")?,
                modified_before: datetime(m, "modified_before")?,
                page_size: integer(m, "page_size")?,
                policy_type: wire(m, "policy_type"),
                remote_fields: text(m, "remote_fields"),
                remote_id: text(m, "remote_id"),
                show_enum_origins: text(m, "show_enum_origins"),
            };
            client.hris.time_off_balances.list(&request, options)?.to_value()
        }
        ("hris-time-off-balances", "retrieve") => {
            let request = hris::TimeOffBalancesRetrieveRequest {
                expand: wire(m, "expand"),
                include_remote_data: boolean(m, "include_remote_data")?,
                remote_fields: text(m, "remote_fields"),
                show_enum_origins: text(m, "show_enum_origins"),
            };
            client
                .hris
                .time_off_balances
                .retrieve(&path_arg(m, "id")?, &request, options)?
                .to_value()
        }
        ("ticketing-projects", "list") => {
            let request = ticketing::ProjectsListRequest {
                created_after: datetime(m, "created_after")?,
                created_before: datetime(m, "created_before")?,
                cursor: text(m, "cursor"),
                include_deleted_data: boolean(m, "include_deleted_data")?,
                include_remote_data: boolean(m, "include_remote_data")?,
                modified_after: datetime(m, "modified_after")?,
                modified_before: datetime(m, "modified_before")?,
                page_size: integer(m, "page_size")?,
                remote_id: text(m, "remote_id"),
            };
            client.ticketing.projects.list(&request, options)?.to_value()
        }
        ("ticketing-projects", "retrieve") => {
            let request = ticketing::ProjectsRetrieveRequest {
                include_remote_data: boolean(m, "include_remote_data")?,
            };
            client
                .ticketing
                .projects
                .retrieve(&path_arg(m, "id")?, &request, options)?
                .to_value()
        }
        ("ticketing-projects", "users-list") => {
            let request = ticketing::ProjectsUsersListRequest {
                cursor: text(m, "cursor"),
                expand: wire(m, "expand"),
                include_deleted_data: boolean(m, "include_deleted_data")?,
                include_remote_data: boolean(m, "include_remote_data")?,
                page_size: integer(m, "page_size")?,
            };
            client
                .ticketing
                .projects
                .users_list(&path_arg(m, "parent_id")?, &request, options)?
                .to_value()
        }
        ("filestorage-passthrough", "create") => {
            let body = parse_body_arg(m)?;
            let request = filestorage::DataPassthroughRequest::from_json(&body)
                .map_err(|err| anyhow!("invalid passthrough body: {err}"))?;
            client
                .filestorage
                .passthrough
                .create(&request, options)?
                .to_value()
        }
        ("filestorage-selective-sync", "meta-list") => {
            let request = filestorage::SelectiveSyncMetaListRequest {
                common_model: text(m, "common_model"),
                cursor: text(m, "cursor"),
                page_size: integer(m, "page_size")?,
            };
            client
                .filestorage
                .selective_sync
                .meta_list(&request, options)?
                .to_value()
        }
        _ => bail!("unknown command {resource} {op}"),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use merge_api::{HttpRequest, HttpResponse, Transport};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Capture {
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl Transport for Capture {
        fn send(&self, request: HttpRequest) -> merge_api::Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: 200,
                body: r#"{"results":[]}"#.to_string(),
            })
        }
    }

    fn run_captured(args: &[&str]) -> HttpRequest {
        let tree = command_tree::command_tree();
        let matches = build_cli(&tree)
            .try_get_matches_from(args.iter().copied())
            .unwrap();
        let config = build_config(&tree, &matches).unwrap();
        let options = build_options(&matches).unwrap();
        let (res_name, res_matches) = matches.subcommand().unwrap();
        let (op_name, op_matches) = res_matches.subcommand().unwrap();

        let capture = Arc::new(Capture::default());
        let client = MergeClient::with_transport(config, capture.clone());
        dispatch(&client, res_name, op_name, op_matches, options.as_ref()).unwrap();

        let mut requests = capture.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        requests.remove(0)
    }

    fn account_header(request: &HttpRequest) -> Option<&str> {
        request
            .headers
            .get("x-account-token")
            .and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli(&command_tree::command_tree()).debug_assert();
    }

    #[test]
    fn test_op_flags_never_shadow_global_flags() {
        let tree = command_tree::command_tree();
        let cli = build_cli(&tree);
        let globals: Vec<(String, Option<String>)> = cli
            .get_arguments()
            .map(|arg| {
                (
                    arg.get_id().as_str().to_string(),
                    arg.get_long().map(str::to_string),
                )
            })
            .collect();
        for resource in &tree.resources {
            for op in &resource.ops {
                for param in &op.params {
                    for (id, long) in &globals {
                        assert_ne!(param.id, id, "{} {}", resource.name, op.name);
                        assert_ne!(Some(param.flag.as_str()), long.as_deref());
                    }
                }
            }
        }
    }

    #[test]
    fn test_issue_filter_and_account_header_stay_separate() {
        let request = run_captured(&[
            "merge",
            "accounting-issues",
            "list",
            "--api-key",
            "k",
            "--filter-account-token",
            "FILTER_VALUE",
            "--account-token",
            "HEADER_VALUE",
        ]);

        assert_eq!(request.path, "/api/accounting/v1/issues");
        assert_eq!(
            request.query,
            vec![("account_token".to_string(), "FILTER_VALUE".to_string())]
        );
        assert_eq!(account_header(&request), Some("HEADER_VALUE"));
    }

    #[test]
    fn test_issue_filter_alone_does_not_set_account_header() {
        let request = run_captured(&[
            "merge",
            "accounting-issues",
            "list",
            "--api-key",
            "k",
            "--filter-account-token",
            "FILTER_VALUE",
        ]);

        assert_eq!(
            request.query,
            vec![("account_token".to_string(), "FILTER_VALUE".to_string())]
        );
        assert_ne!(account_header(&request), Some("FILTER_VALUE"));
    }

    #[test]
    fn test_library_errors_print_their_cause_once() {
        let err = anyhow::Error::from(ticketing::Project::from_json("{").unwrap_err());
        let line = error_line(&err);
        assert!(line.starts_with("error: malformed JSON: "));
        assert_eq!(line.matches("EOF while parsing").count(), 1);
    }
}
