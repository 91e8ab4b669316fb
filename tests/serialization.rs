use std::collections::BTreeMap;
use std::fmt::Debug;

use chrono::{DateTime, Utc};
use merge_api::accounting::{
    AccountingPeriod, AccountingPeriodStatus, AccountingPeriodStatusEnum, Issue, IssueStatus,
    IssueStatusEnum, IssuesListRequestStatus, PaginatedIssueList, PurchaseOrder,
    PurchaseOrderAccountingPeriod,
};
use merge_api::ats::{EeocVeteranStatus, VeteranStatusEnum};
use merge_api::crm::{EngagementType, EngagementTypeActivityType};
use merge_api::filestorage::{
    ConditionSchema, ConditionSchemaConditionType, ConditionTypeEnum, OperatorSchema,
};
use merge_api::hris::{
    PaginatedTimeOffBalanceList, PolicyTypeEnum, TimeOffBalance, TimeOffBalancePolicyType,
};
use merge_api::ticketing::{PaginatedProjectList, Project};
use merge_api::{EnumOrString, ErrorKind, Model, Union, WireEnum};
use serde_json::{Map, Value, json};

fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

fn assert_round_trips<M: Model + PartialEq + Debug>(model: &M) {
    let emitted = model.to_json();
    let reparsed = M::from_json(&emitted).unwrap();
    assert_eq!(&reparsed, model, "re-parsing {emitted}");
}

#[test]
fn enum_table_known_and_unknown_values() {
    let ongoing = IssuesListRequestStatus::from_wire("ONGOING");
    assert_eq!(ongoing.key(), "ongoing");

    let closed = IssuesListRequestStatus::from_wire("CLOSED");
    assert_eq!(closed.key(), "CLOSED");
    assert_eq!(closed.as_wire(), "CLOSED");
    assert_eq!(IssuesListRequestStatus::TABLE.resolve("CLOSED"), "CLOSED");
}

#[test]
fn string_candidate_declared_first_wins() {
    let period = PurchaseOrderAccountingPeriod::from_json("\"2024-01-01\"").unwrap();
    assert!(period.is::<String>());
    assert!(!period.is::<AccountingPeriod>());
    assert_eq!(period.to_json(), "\"2024-01-01\"");
}

#[test]
fn union_without_match_falls_back_but_validation_fails() {
    let status = EngagementTypeActivityType::from_json("[1,2]").unwrap();
    assert!(matches!(status, EnumOrString::Unresolved(_)));
    assert_eq!(status.to_value(), json!([1, 2]));

    let err = EngagementTypeActivityType::validate_raw(&json!([1, 2])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn nested_null_short_circuits() {
    let order = PurchaseOrder::from_json(r#"{"id":"po","accounting_period":null}"#).unwrap();
    assert_eq!(order.accounting_period, None);
    assert_eq!(order.to_value()["accounting_period"], Value::Null);
}

#[test]
fn enum_member_round_trips_through_parent() {
    let engagement = EngagementType::from_json(r#"{"activity_type":"MEETING"}"#).unwrap();
    assert_eq!(engagement.to_value()["activity_type"], json!("MEETING"));

    let status = EeocVeteranStatus::from_json("\"I_DONT_WISH_TO_ANSWER\"").unwrap();
    assert_eq!(status.as_enum(), Some(&VeteranStatusEnum::IDontWishToAnswer));
}

#[test]
fn model_round_trip_ignores_additional_properties() {
    let input = r#"{"id":"p1","name":"Platform","created_at":"2021-09-15T00:00:00Z","remote_was_deleted":false,"owner_team":"infra"}"#;
    let project = Project::from_json(input).unwrap();
    assert_eq!(project.additional_properties.get("owner_team"), Some(&json!("infra")));

    let emitted = project.to_json();
    assert!(!emitted.contains("owner_team"));
    let again = Project::from_json(&emitted).unwrap();
    assert_eq!(again.id, project.id);
    assert_eq!(again.name, project.name);
    assert_eq!(again.created_at, project.created_at);
    assert_eq!(again.remote_was_deleted, project.remote_was_deleted);
    assert!(again.additional_properties.is_empty());
}

#[test]
fn emitted_keys_follow_declaration_order() {
    let project = Project {
        id: Some("p1".to_string()),
        ..Default::default()
    };
    let keys: Vec<String> = match project.to_value() {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => unreachable!(),
    };
    assert_eq!(
        keys,
        [
            "id",
            "remote_id",
            "created_at",
            "modified_at",
            "name",
            "description",
            "remote_was_deleted",
            "field_mappings",
            "remote_data",
        ]
    );
}

#[test]
fn paginated_cursors_absent_stay_absent() {
    let page = PaginatedProjectList::from_json(r#"{"results":[{"id":"a"},{"id":"b"}]}"#).unwrap();
    assert_eq!(page.next, None);
    assert_eq!(page.previous, None);
    assert_eq!(page.results.len(), 2);

    let value = page.to_value();
    assert_eq!(value["next"], Value::Null);
    assert_eq!(value["results"][1]["id"], json!("b"));
}

#[test]
fn paginated_element_validation_failure_aborts() {
    let err = PaginatedTimeOffBalanceList::from_json(r#"{"results":[{"balance":"lots"}]}"#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn plain_model_rejects_non_object() {
    let err = Project::from_json("[]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(Project::from_json("{oops").unwrap_err().kind(), ErrorKind::Parse);
}

#[test]
fn purchase_order_round_trips_with_each_period_member() {
    let mut mappings = Map::new();
    mappings.insert("organization_defined_targets".to_string(), json!({}));
    let period = AccountingPeriod {
        id: Some("ap-1".to_string()),
        name: Some("Q1".to_string()),
        status: Some(AccountingPeriodStatus::Enum(AccountingPeriodStatusEnum::Active)),
        start_date: Some(at("2024-01-01T00:00:00.250-05:00")),
        end_date: Some(at("2024-03-31T23:59:59.999999Z")),
        field_mappings: Some(mappings),
        remote_data: Some(vec![json!({"path": "/periods", "data": [1, 2]})]),
        ..Default::default()
    };
    let members = [
        PurchaseOrderAccountingPeriod::AccountingPeriod(period),
        PurchaseOrderAccountingPeriod::String("ap-2".to_string()),
        PurchaseOrderAccountingPeriod::Unresolved(json!(42)),
    ];

    for member in members {
        let order = PurchaseOrder {
            id: Some("po-1".to_string()),
            created_at: Some(at("2024-02-10T08:15:30.123+01:00")),
            total_amount: Some(1250.75),
            currency: Some("USD".to_string()),
            accounting_period: Some(member),
            remote_was_deleted: Some(false),
            ..Default::default()
        };
        assert_round_trips(&order);
    }
}

#[test]
fn paginated_issues_round_trip() {
    let mut end_user = BTreeMap::new();
    end_user.insert("organization_name".to_string(), "Acme".to_string());
    let page = PaginatedIssueList {
        next: Some("cD0yMDI0".to_string()),
        previous: None,
        results: vec![
            Issue {
                id: Some("iss-1".to_string()),
                status: Some(IssueStatus::Enum(IssueStatusEnum::Ongoing)),
                error_description: "Missing permissions".to_string(),
                end_user: Some(end_user),
                first_incident_time: Some(at("2022-12-05T16:19:15.5-08:00")),
                last_incident_time: Some(at("2022-12-06T00:00:00Z")),
                is_muted: Some(true),
                error_details: Some(vec!["scope missing".to_string()]),
                ..Default::default()
            },
            Issue {
                status: Some(IssueStatus::String("SNOOZED".to_string())),
                error_description: "Rate limited".to_string(),
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    assert_round_trips(&page);
}

#[test]
fn time_off_balance_round_trips() {
    let balances = [
        TimeOffBalance {
            id: Some("tob-1".to_string()),
            employee: Some("emp-9".to_string()),
            balance: Some(-4.5),
            used: Some(12.25),
            policy_type: Some(TimeOffBalancePolicyType::Enum(PolicyTypeEnum::JuryDuty)),
            modified_at: Some(at("2021-10-16T00:00:00.000001+05:30")),
            ..Default::default()
        },
        TimeOffBalance {
            policy_type: Some(TimeOffBalancePolicyType::String("SABBATICAL".to_string())),
            ..Default::default()
        },
    ];
    for balance in &balances {
        assert_round_trips(balance);
    }
}

#[test]
fn condition_schema_with_operator_list_round_trips() {
    let schema = ConditionSchema {
        id: Some("cs-1".to_string()),
        common_model: Some("File".to_string()),
        native_name: None,
        field_name: Some("created_at".to_string()),
        is_unique: Some(false),
        condition_type: ConditionSchemaConditionType::Enum(ConditionTypeEnum::DateTime),
        operators: vec![
            OperatorSchema {
                operator: Some("GREATER_THAN".to_string()),
                is_unique: Some(true),
                ..Default::default()
            },
            OperatorSchema::default(),
        ],
        additional_properties: Default::default(),
    };

    assert_round_trips(&schema);
}

#[test]
fn hand_built_members_equal_their_reparsed_form() {
    let spelled = Issue {
        status: Some(IssueStatus::String("ONGOING".to_string())),
        error_description: "x".to_string(),
        ..Default::default()
    };
    let reparsed = Issue::from_json(&spelled.to_json()).unwrap();
    assert_eq!(reparsed, spelled);
    assert_eq!(
        reparsed.status.as_ref().and_then(|s| s.as_enum()),
        Some(&IssueStatusEnum::Ongoing)
    );

    let other = IssueStatus::Enum(IssueStatusEnum::Other("CLOSED".to_string()));
    let reparsed = IssueStatus::from_json(&other.to_json()).unwrap();
    assert_eq!(reparsed, other);
    assert!(reparsed.is::<String>());
    assert!(matches!(other.normalized(), EnumOrString::String(ref s) if s == "CLOSED"));
}
