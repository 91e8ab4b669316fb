use merge_api::config::API_URL_ENV;
use merge_api::Environment;
use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Query,
}

/// How a flag's text is turned into a typed parameter.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Text,
    Bool,
    Integer,
    Datetime,
    Enum,
}

#[derive(Debug, Serialize, Clone)]
pub struct CommandTree {
    pub version: u32,
    pub base_url: String,
    pub base_url_env: &'static str,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Serialize, Clone)]
pub struct Resource {
    pub name: &'static str,
    pub ops: Vec<Operation>,
}

#[derive(Debug, Serialize, Clone)]
pub struct Operation {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamDef>,
    pub has_body: bool,
}

/// `name` is the wire name; `id` is the clap argument id the flag is read
/// back under. They differ only where the wire name clashes with a global
/// flag.
#[derive(Debug, Serialize, Clone)]
pub struct ParamDef {
    pub name: &'static str,
    pub id: &'static str,
    pub flag: String,
    pub location: Location,
    pub kind: ParamKind,
    pub required: bool,
}

impl ParamDef {
    fn path(name: &'static str) -> Self {
        Self::new(name, Location::Path, ParamKind::Text, true)
    }

    fn query(name: &'static str, kind: ParamKind) -> Self {
        Self::new(name, Location::Query, kind, false)
    }

    fn new(name: &'static str, location: Location, kind: ParamKind, required: bool) -> Self {
        Self {
            name,
            id: name,
            flag: name.replace('_', "-"),
            location,
            kind,
            required,
        }
    }
}

fn get(
    name: &'static str,
    path: &'static str,
    description: &'static str,
    params: Vec<ParamDef>,
) -> Operation {
    Operation {
        name,
        method: "GET",
        path,
        description,
        params,
        has_body: false,
    }
}

fn query(specs: &[(&'static str, ParamKind)]) -> Vec<ParamDef> {
    specs
        .iter()
        .map(|&(name, kind)| ParamDef::query(name, kind))
        .collect()
}

fn renamed(mut params: Vec<ParamDef>, name: &str, id: &'static str) -> Vec<ParamDef> {
    for param in params.iter_mut().filter(|p| p.name == name) {
        param.id = id;
        param.flag = id.replace('_', "-");
    }
    params
}

fn with_path(path_param: &'static str, mut params: Vec<ParamDef>) -> Vec<ParamDef> {
    params.insert(0, ParamDef::path(path_param));
    params
}

pub fn command_tree() -> CommandTree {
    use ParamKind::{Bool, Datetime, Enum, Integer, Text};

    CommandTree {
        version: 1,
        base_url: Environment::default().base_url().to_string(),
        base_url_env: API_URL_ENV,
        resources: vec![
            Resource {
                name: "ats-jobs",
                ops: vec![
                    get(
                        "list",
                        "/api/ats/v1/jobs",
                        "Returns a list of Job objects",
                        query(&[
                            ("code", Text),
                            ("created_after", Datetime),
                            ("created_before", Datetime),
                            ("cursor", Text),
                            ("expand", Enum),
                            ("include_deleted_data", Bool),
                            ("include_remote_data", Bool),
                            ("modified_after", Datetime),
                            ("modified_before", Datetime),
                            ("offices", Text),
                            ("page_size", Integer),
                            ("remote_fields", Text),
                            ("remote_id", Text),
                            ("show_enum_origins", Text),
                            ("status", Enum),
                        ]),
                    ),
                    get(
                        "retrieve",
                        "/api/ats/v1/jobs/{id}",
                        "Returns a Job object with the given id",
                        with_path(
                            "id",
                            query(&[
                                ("expand", Enum),
                                ("include_remote_data", Bool),
                                ("remote_fields", Text),
                                ("show_enum_origins", Text),
                            ]),
                        ),
                    ),
                    get(
                        "screening-questions-list",
                        "/api/ats/v1/jobs/{job_id}/screening-questions",
                        "Returns the screening questions attached to a job",
                        with_path(
                            "job_id",
                            query(&[
                                ("cursor", Text),
                                ("expand", Enum),
                                ("include_deleted_data", Bool),
                                ("include_remote_data", Bool),
                                ("page_size", Integer),
                            ]),
                        ),
                    ),
                ],
            },
            Resource {
                name: "accounting-issues",
                ops: vec![
                    get(
                        "list",
                        "/api/accounting/v1/issues",
                        "Gets all issues for the organization",
                        renamed(
                            query(&[
                                ("account_token", Text),
                                ("cursor", Text),
                                ("end_date", Text),
                                ("end_user_organization_name", Text),
                                ("first_incident_time_after", Datetime),
                                ("first_incident_time_before", Datetime),
                                ("include_muted", Text),
                                ("integration_name", Text),
                                ("last_incident_time_after", Datetime),
                                ("last_incident_time_before", Datetime),
                                ("linked_account_id", Text),
                                ("page_size", Integer),
                                ("start_date", Text),
                                ("status", Enum),
                            ]),
                            "account_token",
                            "filter_account_token",
                        ),
                    ),
                    get(
                        "retrieve",
                        "/api/accounting/v1/issues/{id}",
                        "Get a specific issue",
                        with_path("id", Vec::new()),
                    ),
                ],
            },
            Resource {
                name: "crm-stages",
                ops: vec![
                    get(
                        "list",
                        "/api/crm/v1/stages",
                        "Returns a list of Stage objects",
                        query(&[
                            ("created_after", Datetime),
                            ("created_before", Datetime),
                            ("cursor", Text),
                            ("include_deleted_data", Bool),
                            ("include_remote_data", Bool),
                            ("include_remote_fields", Bool),
                            ("modified_after", Datetime),
                            ("modified_before", Datetime),
                            ("page_size", Integer),
                            ("remote_id", Text),
                        ]),
                    ),
                    get(
                        "retrieve",
                        "/api/crm/v1/stages/{id}",
                        "Returns a Stage object with the given id",
                        with_path(
                            "id",
                            query(&[
                                ("include_remote_data", Bool),
                                ("include_remote_fields", Bool),
                            ]),
                        ),
                    ),
                ],
            },
            Resource {
                name: "crm-leads",
                ops: vec![get(
                    "retrieve",
                    "/api/crm/v1/leads/{id}",
                    "Returns a Lead object with the given id",
                    with_path(
                        "id",
                        query(&[
                            ("expand", Enum),
                            ("include_remote_data", Bool),
                            ("include_remote_fields", Bool),
                        ]),
                    ),
                )],
            },
            Resource {
                name: "hris-time-off-balances",
                ops: vec![
                    get(
                        "list",
                        "/api/hris/v1/time-off-balances",
                        "Returns a list of TimeOffBalance objects",
                        query(&[
                            ("created_after", Datetime),
                            ("created_before", Datetime),
                            ("cursor", Text),
                            ("employee_id", Text),
                            ("expand", Enum),
                            ("include_deleted_data", Bool),
                            ("include_remote_data", Bool),
                            ("modified_after", Datetime),
                            ("modified_before", Datetime),
                            ("page_size", Integer),
                            ("policy_type", Enum),
                            ("remote_fields", Text),
                            ("remote_id", Text),
                            ("show_enum_origins", Text),
                        ]),
                    ),
                    get(
                        "retrieve",
                        "/api/hris/v1/time-off-balances/{id}",
                        "Returns a TimeOffBalance object with the given id",
                        with_path(
                            "id",
                            query(&[
                                ("expand", Enum),
                                ("include_remote_data", Bool),
                                ("remote_fields", Text),
                                ("show_enum_origins", Text),
                            ]),
                        ),
                    ),
                ],
            },
            Resource {
                name: "ticketing-projects",
                ops: vec![
                    get(
                        "list",
                        "/api/ticketing/v1/projects",
                        "Returns a list of Project objects",
                        query(&[
                            ("created_after", Datetime),
                            ("created_before", Datetime),
                            ("cursor", Text),
                            ("include_deleted_data", Bool),
                            ("include_remote_data", Bool),
                            ("modified_after", Datetime),
                            ("modified_before", Datetime),
                            ("page_size", Integer),
                            ("remote_id", Text),
                        ]),
                    ),
                    get(
                        "retrieve",
                        "/api/ticketing/v1/projects/{id}",
                        "Returns a Project object with the given id",
                        with_path("id", query(&[("include_remote_data", Bool)])),
                    ),
                    get(
                        "users-list",
                        "/api/ticketing/v1/projects/{parent_id}/users",
                        "Returns the User objects attached to a project",
                        with_path(
                            "parent_id",
                            query(&[
                                ("cursor", Text),
                                ("expand", Enum),
                                ("include_deleted_data", Bool),
                                ("include_remote_data", Bool),
                                ("page_size", Integer),
                            ]),
                        ),
                    ),
                ],
            },
            Resource {
                name: "filestorage-passthrough",
                ops: vec![Operation {
                    name: "create",
                    method: "POST",
                    path: "/api/filestorage/v1/passthrough",
                    description: "Pull data from an endpoint not currently supported by Merge",
                    params: Vec::new(),
                    has_body: true,
                }],
            },
            Resource {
                name: "filestorage-selective-sync",
                ops: vec![get(
                    "meta-list",
                    "/api/filestorage/v1/selective-sync/meta",
                    "Lists the fields selective sync conditions can be built on",
                    query(&[
                        ("common_model", Text),
                        ("cursor", Text),
                        ("page_size", Integer),
                    ]),
                )],
            },
        ],
    }
}

impl CommandTree {
    pub fn find_op(&self, resource: &str, op: &str) -> Option<&Operation> {
        self.resources
            .iter()
            .find(|r| r.name == resource)
            .and_then(|r| r.ops.iter().find(|o| o.name == op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_path_placeholder_has_a_path_param() {
        let tree = command_tree();
        for resource in &tree.resources {
            for op in &resource.ops {
                for param in op.params.iter().filter(|p| p.location == Location::Path) {
                    assert!(
                        op.path.contains(&format!("{{{}}}", param.name)),
                        "{} {} lacks {{{}}}",
                        resource.name,
                        op.name,
                        param.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_issue_account_token_filter_has_its_own_flag() {
        let tree = command_tree();
        let op = tree.find_op("accounting-issues", "list").unwrap();
        let param = op.params.iter().find(|p| p.name == "account_token").unwrap();
        assert_eq!(param.id, "filter_account_token");
        assert_eq!(param.flag, "filter-account-token");
        assert_eq!(param.location, Location::Query);
    }

    #[test]
    fn test_flags_use_dashes() {
        let tree = command_tree();
        let op = tree.find_op("ats-jobs", "list").unwrap();
        let flags: Vec<&str> = op.params.iter().map(|p| p.flag.as_str()).collect();
        assert!(flags.contains(&"include-deleted-data"));
        assert!(tree.find_op("ats-jobs", "delete").is_none());
    }
}
