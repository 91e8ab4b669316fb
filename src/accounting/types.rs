use std::any::Any;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{AdditionalProperties, FieldReader, FieldWriter, Model, RawValidator};
use crate::pagination::Paginated;
use crate::union::{self, EnumOrString, Union};
use crate::wire_enum::wire_enum;

wire_enum! {
    pub enum IssueStatusEnum {
        Ongoing => ongoing = "ONGOING",
        Resolved => resolved = "RESOLVED",
    }
}

wire_enum! {
    /// Contact status.
    pub enum Status7D1Enum {
        Active => active = "ACTIVE",
        Archived => archived = "ARCHIVED",
    }
}

wire_enum! {
    pub enum AccountingPeriodStatusEnum {
        Active => active = "ACTIVE",
        Inactive => inactive = "INACTIVE",
    }
}

wire_enum! {
    pub enum IssuesListRequestStatus {
        Ongoing => ongoing = "ONGOING",
        Resolved => resolved = "RESOLVED",
    }
}

wire_enum! {
    /// Relations the journal entries endpoints can expand inline.
    pub enum JournalEntriesListRequestExpand {
        AccountingPeriod => accounting_period = "accounting_period",
        AppliedPayments => applied_payments = "applied_payments",
        AppliedPaymentsAccountingPeriod =>
            applied_payments_accounting_period =
            "applied_payments,accounting_period",
        AppliedPaymentsCompany => applied_payments_company = "applied_payments,company",
        AppliedPaymentsCompanyAccountingPeriod =>
            applied_payments_company_accounting_period =
            "applied_payments,company,accounting_period",
        AppliedPaymentsTrackingCategories =>
            applied_payments_tracking_categories =
            "applied_payments,tracking_categories",
        AppliedPaymentsTrackingCategoriesAccountingPeriod =>
            applied_payments_tracking_categories_accounting_period =
            "applied_payments,tracking_categories,accounting_period",
        AppliedPaymentsTrackingCategoriesCompany =>
            applied_payments_tracking_categories_company =
            "applied_payments,tracking_categories,company",
        AppliedPaymentsTrackingCategoriesCompanyAccountingPeriod =>
            applied_payments_tracking_categories_company_accounting_period =
            "applied_payments,tracking_categories,company,accounting_period",
        Company => company = "company",
        CompanyAccountingPeriod => company_accounting_period = "company,accounting_period",
        Lines => lines = "lines",
        LinesAccountingPeriod => lines_accounting_period = "lines,accounting_period",
        LinesAppliedPayments => lines_applied_payments = "lines,applied_payments",
        LinesAppliedPaymentsAccountingPeriod =>
            lines_applied_payments_accounting_period =
            "lines,applied_payments,accounting_period",
        LinesAppliedPaymentsCompany =>
            lines_applied_payments_company =
            "lines,applied_payments,company",
        LinesAppliedPaymentsCompanyAccountingPeriod =>
            lines_applied_payments_company_accounting_period =
            "lines,applied_payments,company,accounting_period",
        LinesAppliedPaymentsTrackingCategories =>
            lines_applied_payments_tracking_categories =
            "lines,applied_payments,tracking_categories",
        LinesAppliedPaymentsTrackingCategoriesAccountingPeriod =>
            lines_applied_payments_tracking_categories_accounting_period =
            "lines,applied_payments,tracking_categories,accounting_period",
        LinesAppliedPaymentsTrackingCategoriesCompany =>
            lines_applied_payments_tracking_categories_company =
            "lines,applied_payments,tracking_categories,company",
        LinesAppliedPaymentsTrackingCategoriesCompanyAccountingPeriod =>
            lines_applied_payments_tracking_categories_company_accounting_period =
            "lines,applied_payments,tracking_categories,company,accounting_period",
        LinesCompany => lines_company = "lines,company",
        LinesCompanyAccountingPeriod =>
            lines_company_accounting_period =
            "lines,company,accounting_period",
        LinesPayments => lines_payments = "lines,payments",
        LinesPaymentsAccountingPeriod =>
            lines_payments_accounting_period =
            "lines,payments,accounting_period",
        LinesPaymentsAppliedPayments =>
            lines_payments_applied_payments =
            "lines,payments,applied_payments",
        LinesPaymentsAppliedPaymentsAccountingPeriod =>
            lines_payments_applied_payments_accounting_period =
            "lines,payments,applied_payments,accounting_period",
        LinesPaymentsAppliedPaymentsCompany =>
            lines_payments_applied_payments_company =
            "lines,payments,applied_payments,company",
        LinesPaymentsAppliedPaymentsCompanyAccountingPeriod =>
            lines_payments_applied_payments_company_accounting_period =
            "lines,payments,applied_payments,company,accounting_period",
        LinesPaymentsAppliedPaymentsTrackingCategories =>
            lines_payments_applied_payments_tracking_categories =
            "lines,payments,applied_payments,tracking_categories",
        LinesPaymentsAppliedPaymentsTrackingCategoriesAccountingPeriod =>
            lines_payments_applied_payments_tracking_categories_accounting_period =
            "lines,payments,applied_payments,tracking_categories,accounting_period",
        LinesPaymentsAppliedPaymentsTrackingCategoriesCompany =>
            lines_payments_applied_payments_tracking_categories_company =
            "lines,payments,applied_payments,tracking_categories,company",
        LinesPaymentsAppliedPaymentsTrackingCategoriesCompanyAccountingPeriod =>
            lines_payments_applied_payments_tracking_categories_company_accounting_period =
            "lines,payments,applied_payments,tracking_categories,company,accounting_period",
        LinesPaymentsCompany => lines_payments_company = "lines,payments,company",
        LinesPaymentsCompanyAccountingPeriod =>
            lines_payments_company_accounting_period =
            "lines,payments,company,accounting_period",
        LinesPaymentsTrackingCategories =>
            lines_payments_tracking_categories =
            "lines,payments,tracking_categories",
        LinesPaymentsTrackingCategoriesAccountingPeriod =>
            lines_payments_tracking_categories_accounting_period =
            "lines,payments,tracking_categories,accounting_period",
        LinesPaymentsTrackingCategoriesCompany =>
            lines_payments_tracking_categories_company =
            "lines,payments,tracking_categories,company",
        LinesPaymentsTrackingCategoriesCompanyAccountingPeriod =>
            lines_payments_tracking_categories_company_accounting_period =
            "lines,payments,tracking_categories,company,accounting_period",
        LinesTrackingCategories => lines_tracking_categories = "lines,tracking_categories",
        LinesTrackingCategoriesAccountingPeriod =>
            lines_tracking_categories_accounting_period =
            "lines,tracking_categories,accounting_period",
        LinesTrackingCategoriesCompany =>
            lines_tracking_categories_company =
            "lines,tracking_categories,company",
        LinesTrackingCategoriesCompanyAccountingPeriod =>
            lines_tracking_categories_company_accounting_period =
            "lines,tracking_categories,company,accounting_period",
        Payments => payments = "payments",
        PaymentsAccountingPeriod => payments_accounting_period = "payments,accounting_period",
        PaymentsAppliedPayments => payments_applied_payments = "payments,applied_payments",
        PaymentsAppliedPaymentsAccountingPeriod =>
            payments_applied_payments_accounting_period =
            "payments,applied_payments,accounting_period",
        PaymentsAppliedPaymentsCompany =>
            payments_applied_payments_company =
            "payments,applied_payments,company",
        PaymentsAppliedPaymentsCompanyAccountingPeriod =>
            payments_applied_payments_company_accounting_period =
            "payments,applied_payments,company,accounting_period",
        PaymentsAppliedPaymentsTrackingCategories =>
            payments_applied_payments_tracking_categories =
            "payments,applied_payments,tracking_categories",
        PaymentsAppliedPaymentsTrackingCategoriesAccountingPeriod =>
            payments_applied_payments_tracking_categories_accounting_period =
            "payments,applied_payments,tracking_categories,accounting_period",
        PaymentsAppliedPaymentsTrackingCategoriesCompany =>
            payments_applied_payments_tracking_categories_company =
            "payments,applied_payments,tracking_categories,company",
        PaymentsAppliedPaymentsTrackingCategoriesCompanyAccountingPeriod =>
            payments_applied_payments_tracking_categories_company_accounting_period =
            "payments,applied_payments,tracking_categories,company,accounting_period",
        PaymentsCompany => payments_company = "payments,company",
        PaymentsCompanyAccountingPeriod =>
            payments_company_accounting_period =
            "payments,company,accounting_period",
        PaymentsTrackingCategories => payments_tracking_categories = "payments,tracking_categories",
        PaymentsTrackingCategoriesAccountingPeriod =>
            payments_tracking_categories_accounting_period =
            "payments,tracking_categories,accounting_period",
        PaymentsTrackingCategoriesCompany =>
            payments_tracking_categories_company =
            "payments,tracking_categories,company",
        PaymentsTrackingCategoriesCompanyAccountingPeriod =>
            payments_tracking_categories_company_accounting_period =
            "payments,tracking_categories,company,accounting_period",
        TrackingCategories => tracking_categories = "tracking_categories",
        TrackingCategoriesAccountingPeriod =>
            tracking_categories_accounting_period =
            "tracking_categories,accounting_period",
        TrackingCategoriesCompany => tracking_categories_company = "tracking_categories,company",
        TrackingCategoriesCompanyAccountingPeriod =>
            tracking_categories_company_accounting_period =
            "tracking_categories,company,accounting_period",
    }
}

pub type IssueStatus = EnumOrString<IssueStatusEnum>;
pub type ContactStatus = EnumOrString<Status7D1Enum>;
pub type AccountingPeriodStatus = EnumOrString<AccountingPeriodStatusEnum>;

/// A bookkeeping period transactions are posted into.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountingPeriod {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub status: Option<AccountingPeriodStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub field_mappings: Option<Map<String, Value>>,
    pub remote_data: Option<Vec<Value>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for AccountingPeriod {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("AccountingPeriod", json)?;
        Ok(Self {
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            name: fields.string("name")?,
            status: fields.model("status")?,
            start_date: fields.datetime("start_date")?,
            end_date: fields.datetime("end_date")?,
            field_mappings: fields.object("field_mappings")?,
            remote_data: fields.raw_list("remote_data")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("id", &self.id)
            .field("remote_id", &self.remote_id)
            .field("created_at", &self.created_at)
            .field("modified_at", &self.modified_at)
            .field("name", &self.name)
            .model("status", &self.status)
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("field_mappings", &self.field_mappings)
            .field("remote_data", &self.remote_data)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("AccountingPeriod", obj)?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .string("name")?
            .nested("status", AccountingPeriodStatus::validate_raw)?
            .datetime("start_date")?
            .datetime("end_date")?
            .object("field_mappings")?
            .array("remote_data")?;
        Ok(())
    }
}

/// The accounting period a purchase order was generated in: either a bare
/// id or the expanded period.
#[derive(Debug, Clone)]
pub enum PurchaseOrderAccountingPeriod {
    String(String),
    AccountingPeriod(AccountingPeriod),
    Unresolved(Value),
}

impl Model for PurchaseOrderAccountingPeriod {
    fn from_json(json: &str) -> Result<Self> {
        union::resolve::<Self>(
            "PurchaseOrderAccountingPeriod",
            json,
            &[
                |value: &Value, _: &str| union::expect_string(value).map(Self::String),
                |value: &Value, json: &str| {
                    union::model_candidate(value, json).map(Self::AccountingPeriod)
                },
            ],
            Self::Unresolved,
        )
    }

    fn to_value(&self) -> Value {
        match self {
            Self::String(id) => Value::String(id.clone()),
            Self::AccountingPeriod(period) => period.to_value(),
            Self::Unresolved(value) => value.clone(),
        }
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        union::validate_any(
            "PurchaseOrderAccountingPeriod",
            obj,
            &[union::check_string, AccountingPeriod::validate_raw],
        )
    }
}

impl PartialEq for PurchaseOrderAccountingPeriod {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountingPeriod(a), Self::AccountingPeriod(b)) => a == b,
            _ => self.to_value() == other.to_value(),
        }
    }
}

impl Union for PurchaseOrderAccountingPeriod {
    fn member(&self) -> &dyn Any {
        match self {
            Self::String(id) => id as &dyn Any,
            Self::AccountingPeriod(period) => period as &dyn Any,
            Self::Unresolved(value) => value as &dyn Any,
        }
    }
}

/// An integration problem surfaced for a linked account.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Issue {
    pub id: Option<String>,
    pub status: Option<IssueStatus>,
    pub error_description: String,
    pub end_user: Option<BTreeMap<String, String>>,
    pub first_incident_time: Option<DateTime<Utc>>,
    pub last_incident_time: Option<DateTime<Utc>>,
    pub is_muted: Option<bool>,
    pub error_details: Option<Vec<String>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for Issue {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("Issue", json)?;
        Ok(Self {
            id: fields.string("id")?,
            status: fields.model("status")?,
            error_description: fields.required_string("error_description")?,
            end_user: fields.string_map("end_user")?,
            first_incident_time: fields.datetime("first_incident_time")?,
            last_incident_time: fields.datetime("last_incident_time")?,
            is_muted: fields.bool("is_muted")?,
            error_details: fields.string_list("error_details")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("id", &self.id)
            .model("status", &self.status)
            .field("error_description", &self.error_description)
            .field("end_user", &self.end_user)
            .field("first_incident_time", &self.first_incident_time)
            .field("last_incident_time", &self.last_incident_time)
            .field("is_muted", &self.is_muted)
            .field("error_details", &self.error_details)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("Issue", obj)?
            .string("id")?
            .nested("status", IssueStatus::validate_raw)?
            .required_string("error_description")?
            .object("end_user")?
            .datetime("first_incident_time")?
            .datetime("last_incident_time")?
            .bool("is_muted")?
            .array("error_details")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PurchaseOrder {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub issue_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub customer: Option<String>,
    pub vendor: Option<String>,
    pub memo: Option<String>,
    pub total_amount: Option<f64>,
    pub currency: Option<String>,
    pub accounting_period: Option<PurchaseOrderAccountingPeriod>,
    pub remote_was_deleted: Option<bool>,
    pub additional_properties: AdditionalProperties,
}

impl Model for PurchaseOrder {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("PurchaseOrder", json)?;
        Ok(Self {
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            issue_date: fields.datetime("issue_date")?,
            delivery_date: fields.datetime("delivery_date")?,
            customer: fields.string("customer")?,
            vendor: fields.string("vendor")?,
            memo: fields.string("memo")?,
            total_amount: fields.number("total_amount")?,
            currency: fields.string("currency")?,
            accounting_period: fields.model("accounting_period")?,
            remote_was_deleted: fields.bool("remote_was_deleted")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("id", &self.id)
            .field("remote_id", &self.remote_id)
            .field("created_at", &self.created_at)
            .field("modified_at", &self.modified_at)
            .field("issue_date", &self.issue_date)
            .field("delivery_date", &self.delivery_date)
            .field("customer", &self.customer)
            .field("vendor", &self.vendor)
            .field("memo", &self.memo)
            .field("total_amount", &self.total_amount)
            .field("currency", &self.currency)
            .model("accounting_period", &self.accounting_period)
            .field("remote_was_deleted", &self.remote_was_deleted)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("PurchaseOrder", obj)?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .datetime("issue_date")?
            .datetime("delivery_date")?
            .string("customer")?
            .string("vendor")?
            .string("memo")?
            .number("total_amount")?
            .string("currency")?
            .nested("accounting_period", PurchaseOrderAccountingPeriod::validate_raw)?
            .bool("remote_was_deleted")?;
        Ok(())
    }
}

pub type PaginatedIssueList = Paginated<Issue>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::wire_enum::WireEnum;

    #[test]
    fn test_bare_string_period_resolves_to_string_member() {
        let period = PurchaseOrderAccountingPeriod::from_json("\"2024-01-01\"").unwrap();
        assert_eq!(period, PurchaseOrderAccountingPeriod::String("2024-01-01".to_string()));
        assert!(period.is::<String>());
        assert!(!period.is::<AccountingPeriod>());
    }

    #[test]
    fn test_object_period_resolves_to_accounting_period() {
        let period = PurchaseOrderAccountingPeriod::from_json(
            r#"{"id":"449d3c9b","name":"Q1","status":"ACTIVE","start_date":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let inner = period.downcast::<AccountingPeriod>().unwrap();
        assert_eq!(inner.name.as_deref(), Some("Q1"));
        assert_eq!(
            inner.status,
            Some(AccountingPeriodStatus::Enum(AccountingPeriodStatusEnum::Active))
        );
    }

    #[test]
    fn test_period_with_bad_field_is_unresolved() {
        let period = PurchaseOrderAccountingPeriod::from_json(r#"{"name":7}"#).unwrap();
        assert!(period.is::<Value>());
        let err = PurchaseOrderAccountingPeriod::validate_raw(&serde_json::json!({"name": 7}))
            .unwrap_err();
        assert!(matches!(err, Error::NoMatchingCandidate { .. }));
    }

    #[test]
    fn test_purchase_order_serializes_through_period_member() {
        let order = PurchaseOrder::from_json(
            r#"{"id":"po-1","total_amount":125.5,"accounting_period":"ap-9"}"#,
        )
        .unwrap();
        let value = order.to_value();
        assert_eq!(value["accounting_period"], Value::from("ap-9"));
        assert_eq!(value["total_amount"], Value::from(125.5));
        assert_eq!(PurchaseOrder::from_json(&order.to_json()).unwrap(), order);
    }

    #[test]
    fn test_issue_requires_error_description() {
        let err = Issue::from_json(r#"{"id":"i1"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("Issue.error_description"));
    }

    #[test]
    fn test_issue_parses_end_user_and_times() {
        let issue = Issue::from_json(
            r#"{"status":"RESOLVED","error_description":"Missing Permissions","end_user":{"organization_name":"Waystar Royco"},"first_incident_time":"2022-12-05T16:19:15.161Z","is_muted":true}"#,
        )
        .unwrap();
        assert_eq!(issue.status.unwrap().as_enum(), Some(&IssueStatusEnum::Resolved));
        assert_eq!(
            issue.end_user.unwrap().get("organization_name").map(String::as_str),
            Some("Waystar Royco")
        );
        assert!(issue.first_incident_time.is_some());
    }

    #[test]
    fn test_malformed_incident_time_is_parse_error() {
        let err =
            Issue::from_json(r#"{"error_description":"x","last_incident_time":"12/05/2022"}"#)
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_contact_status_unknown_passthrough() {
        let status = ContactStatus::from_json("\"SUSPENDED\"").unwrap();
        assert_eq!(status.as_str(), Some("SUSPENDED"));
        assert_eq!(Status7D1Enum::from_wire("SUSPENDED").key(), "SUSPENDED");
    }

    #[test]
    fn test_journal_entries_expand_table() {
        let table = JournalEntriesListRequestExpand::TABLE;
        assert_eq!(table.len(), 63);
        assert_eq!(
            table.wire_value("lines_company_accounting_period"),
            Some("lines,company,accounting_period")
        );
    }
}
