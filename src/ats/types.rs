use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{AdditionalProperties, FieldReader, FieldWriter, Model, RawValidator};
use crate::pagination::Paginated;
use crate::union::EnumOrString;
use crate::wire_enum::wire_enum;

wire_enum! {
    pub enum ActivityTypeEnum {
        Note => note = "NOTE",
        Email => email = "EMAIL",
        OtherActivity => other = "OTHER",
    }
}

wire_enum! {
    pub enum EncodingEnum {
        Raw => raw = "RAW",
        Base64 => base_64 = "BASE64",
        GzipBase64 => gzip_base_64 = "GZIP_BASE64",
    }
}

wire_enum! {
    pub enum RequestFormatEnum {
        Json => json = "JSON",
        Xml => xml = "XML",
        Multipart => multipart = "MULTIPART",
    }
}

wire_enum! {
    /// Kind of answer a screening question expects.
    pub enum TypeEnum {
        Date => date = "DATE",
        File => file = "FILE",
        SingleSelect => single_select = "SINGLE_SELECT",
        MultiSelect => multi_select = "MULTI_SELECT",
        SingleLineText => single_line_text = "SINGLE_LINE_TEXT",
        MultiLineText => multi_line_text = "MULTI_LINE_TEXT",
        Numeric => numeric = "NUMERIC",
        Boolean => boolean = "BOOLEAN",
    }
}

wire_enum! {
    pub enum VeteranStatusEnum {
        IAmNotAProtectedVeteran => i_am_not_a_protected_veteran = "I_AM_NOT_A_PROTECTED_VETERAN",
        IIdentifyAsOneOrMoreOfTheClassificationsOfProtectedVeterans =>
            i_identify_as_one_or_more_of_the_classifications_of_protected_veterans =
            "I_IDENTIFY_AS_ONE_OR_MORE_OF_THE_CLASSIFICATIONS_OF_PROTECTED_VETERANS",
        IDontWishToAnswer => i_dont_wish_to_answer = "I_DONT_WISH_TO_ANSWER",
    }
}

wire_enum! {
    pub enum JobStatusEnum {
        Open => open = "OPEN",
        Closed => closed = "CLOSED",
        Draft => draft = "DRAFT",
        Archived => archived = "ARCHIVED",
        Pending => pending = "PENDING",
    }
}

wire_enum! {
    pub enum JobTypeEnum {
        Posting => posting = "POSTING",
        Requisition => requisition = "REQUISITION",
        Profile => profile = "PROFILE",
    }
}

wire_enum! {
    /// Status filter accepted by the jobs list endpoint.
    pub enum JobsListRequestStatus {
        Open => open = "OPEN",
        Closed => closed = "CLOSED",
        Draft => draft = "DRAFT",
        Archived => archived = "ARCHIVED",
        Pending => pending = "PENDING",
    }
}

wire_enum! {
    pub enum JobsListRequestExpand {
        Departments => departments = "departments",
        DepartmentsHiringManagers => departments_hiring_managers = "departments,hiring_managers",
        DepartmentsHiringManagersRecruiters =>
            departments_hiring_managers_recruiters = "departments,hiring_managers,recruiters",
        DepartmentsOffices => departments_offices = "departments,offices",
        DepartmentsOfficesHiringManagers =>
            departments_offices_hiring_managers = "departments,offices,hiring_managers",
        DepartmentsOfficesHiringManagersRecruiters =>
            departments_offices_hiring_managers_recruiters =
            "departments,offices,hiring_managers,recruiters",
        DepartmentsOfficesRecruiters =>
            departments_offices_recruiters = "departments,offices,recruiters",
        DepartmentsRecruiters => departments_recruiters = "departments,recruiters",
        HiringManagers => hiring_managers = "hiring_managers",
        HiringManagersRecruiters => hiring_managers_recruiters = "hiring_managers,recruiters",
        Offices => offices = "offices",
        OfficesHiringManagers => offices_hiring_managers = "offices,hiring_managers",
        OfficesHiringManagersRecruiters =>
            offices_hiring_managers_recruiters = "offices,hiring_managers,recruiters",
        OfficesRecruiters => offices_recruiters = "offices,recruiters",
        Recruiters => recruiters = "recruiters",
    }
}

/// The retrieve endpoint accepts the same relation set as list.
pub type JobsRetrieveRequestExpand = JobsListRequestExpand;

wire_enum! {
    pub enum JobsScreeningQuestionsListRequestExpand {
        Job => job = "job",
        JobOptions => job_options = "job,options",
        Options => options = "options",
    }
}

pub type ActivityActivityType = EnumOrString<ActivityTypeEnum>;
pub type EeocVeteranStatus = EnumOrString<VeteranStatusEnum>;
pub type ScreeningQuestionType = EnumOrString<TypeEnum>;
pub type JobStatus = EnumOrString<JobStatusEnum>;
pub type JobType = EnumOrString<JobTypeEnum>;

/// A job posting or requisition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Job {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub status: Option<JobStatus>,
    /// Emitted as `type`.
    pub type_: Option<JobType>,
    pub confidential: Option<bool>,
    pub departments: Option<Vec<String>>,
    pub offices: Option<Vec<String>>,
    pub hiring_managers: Option<Vec<String>>,
    pub recruiters: Option<Vec<String>>,
    pub remote_was_deleted: Option<bool>,
    pub field_mappings: Option<Map<String, Value>>,
    pub remote_data: Option<Vec<Value>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for Job {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("Job", json)?;
        Ok(Self {
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            name: fields.string("name")?,
            description: fields.string("description")?,
            code: fields.string("code")?,
            status: fields.model("status")?,
            type_: fields.model("type")?,
            confidential: fields.bool("confidential")?,
            departments: fields.string_list("departments")?,
            offices: fields.string_list("offices")?,
            hiring_managers: fields.string_list("hiring_managers")?,
            recruiters: fields.string_list("recruiters")?,
            remote_was_deleted: fields.bool("remote_was_deleted")?,
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
            .field("description", &self.description)
            .field("code", &self.code)
            .model("status", &self.status)
            .model("type", &self.type_)
            .field("confidential", &self.confidential)
            .field("departments", &self.departments)
            .field("offices", &self.offices)
            .field("hiring_managers", &self.hiring_managers)
            .field("recruiters", &self.recruiters)
            .field("remote_was_deleted", &self.remote_was_deleted)
            .field("field_mappings", &self.field_mappings)
            .field("remote_data", &self.remote_data)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("Job", obj)?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .string("name")?
            .string("description")?
            .string("code")?
            .nested("status", JobStatus::validate_raw)?
            .nested("type", JobType::validate_raw)?
            .bool("confidential")?
            .array("departments")?
            .array("offices")?
            .array("hiring_managers")?
            .array("recruiters")?
            .bool("remote_was_deleted")?
            .object("field_mappings")?
            .array("remote_data")?;
        Ok(())
    }
}

/// A question an applicant answers when applying to a job.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreeningQuestion {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub job: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    /// Emitted as `type`.
    pub type_: Option<ScreeningQuestionType>,
    pub required: Option<bool>,
    pub options: Option<Vec<Value>>,
    pub remote_was_deleted: Option<bool>,
    pub additional_properties: AdditionalProperties,
}

impl Model for ScreeningQuestion {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("ScreeningQuestion", json)?;
        Ok(Self {
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            job: fields.string("job")?,
            description: fields.string("description")?,
            title: fields.string("title")?,
            type_: fields.model("type")?,
            required: fields.bool("required")?,
            options: fields.raw_list("options")?,
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
            .field("job", &self.job)
            .field("description", &self.description)
            .field("title", &self.title)
            .model("type", &self.type_)
            .field("required", &self.required)
            .field("options", &self.options)
            .field("remote_was_deleted", &self.remote_was_deleted)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("ScreeningQuestion", obj)?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .string("job")?
            .string("description")?
            .string("title")?
            .nested("type", ScreeningQuestionType::validate_raw)?
            .bool("required")?
            .array("options")?
            .bool("remote_was_deleted")?;
        Ok(())
    }
}

/// Request summary attached to a debug-mode log entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugModelLogSummary {
    pub url: String,
    pub method: String,
    pub status_code: i64,
    pub additional_properties: AdditionalProperties,
}

impl Model for DebugModelLogSummary {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("DebugModelLogSummary", json)?;
        Ok(Self {
            url: fields.required_string("url")?,
            method: fields.required_string("method")?,
            status_code: fields.required_integer("status_code")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("url", &self.url)
            .field("method", &self.method)
            .field("status_code", &self.status_code)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("DebugModelLogSummary", obj)?
            .required_string("url")?
            .required_string("method")?
            .required_integer("status_code")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugModeLog {
    pub log_id: String,
    pub dashboard_view: String,
    pub log_summary: Option<DebugModelLogSummary>,
    pub additional_properties: AdditionalProperties,
}

impl Model for DebugModeLog {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("DebugModeLog", json)?;
        Ok(Self {
            log_id: fields.required_string("log_id")?,
            dashboard_view: fields.required_string("dashboard_view")?,
            log_summary: fields.model("log_summary")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("log_id", &self.log_id)
            .field("dashboard_view", &self.dashboard_view)
            .model("log_summary", &self.log_summary)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("DebugModeLog", obj)?
            .required_string("log_id")?
            .required_string("dashboard_view")?
            .required_nested("log_summary", DebugModelLogSummary::validate_raw)?;
        Ok(())
    }
}

pub type PaginatedJobList = Paginated<Job>;
pub type PaginatedScreeningQuestionList = Paginated<ScreeningQuestion>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::union::Union;
    use crate::wire_enum::WireEnum;

    const JOB: &str = r#"{
        "id": "022a2bef-57e5-4def-8ed2-7c41bd9a5ed8",
        "remote_id": "8765432",
        "created_at": "2021-09-15T00:00:00Z",
        "name": "Software Engineer",
        "status": "OPEN",
        "type": "POSTING",
        "confidential": true,
        "departments": ["5b3c1341-a20f-4e51-b72c-f3830a16c97b"],
        "offices": [],
        "priority": "high"
    }"#;

    #[test]
    fn test_job_parses_union_fields() {
        let job = Job::from_json(JOB).unwrap();
        assert_eq!(job.status, Some(JobStatus::Enum(JobStatusEnum::Open)));
        assert!(job.type_.as_ref().unwrap().is::<JobTypeEnum>());
        assert_eq!(job.additional_properties.len(), 1);
    }

    #[test]
    fn test_job_emits_type_without_trailing_underscore() {
        let job = Job::from_json(JOB).unwrap();
        let value = job.to_value();
        assert_eq!(value["type"], Value::from("POSTING"));
        assert!(value.get("type_").is_none());
        assert!(value.get("priority").is_none());
    }

    #[test]
    fn test_job_round_trip() {
        let job = Job::from_json(JOB).unwrap();
        let mut again = Job::from_json(&job.to_json()).unwrap();
        again.additional_properties = job.additional_properties.clone();
        assert_eq!(job, again);
    }

    #[test]
    fn test_unknown_status_kept_as_string() {
        let job = Job::from_json(r#"{"status":"ON_HOLD"}"#).unwrap();
        assert_eq!(job.status, Some(JobStatus::String("ON_HOLD".to_string())));
    }

    #[test]
    fn test_debug_mode_log_null_summary_short_circuits() {
        let log = DebugModeLog::from_json(
            r#"{"log_id":"99433219","dashboard_view":"https://app.merge.dev/logs/99433219","log_summary":null}"#,
        )
        .unwrap();
        assert_eq!(log.log_summary, None);
    }

    #[test]
    fn test_debug_mode_log_nested_summary() {
        let log = DebugModeLog::from_json(
            r#"{"log_id":"1","dashboard_view":"v","log_summary":{"url":"www.exampleintegration.com/api/v1/exampleapi","method":"POST","status_code":200}}"#,
        )
        .unwrap();
        assert_eq!(log.log_summary.unwrap().status_code, 200);
    }

    #[test]
    fn test_debug_mode_log_validation_requires_summary() {
        let raw = serde_json::json!({"log_id": "1", "dashboard_view": "v"});
        let err = DebugModeLog::validate_raw(&raw).unwrap_err();
        assert!(err.to_string().contains("DebugModeLog.log_summary"));
    }

    #[test]
    fn test_screening_question_type_union() {
        let question = ScreeningQuestion::from_json(r#"{"type":"SINGLE_SELECT","required":true}"#).unwrap();
        assert_eq!(question.type_.unwrap().as_enum(), Some(&TypeEnum::SingleSelect));
    }

    #[test]
    fn test_encoding_table_keys() {
        assert_eq!(EncodingEnum::TABLE.wire_value("gzip_base_64"), Some("GZIP_BASE64"));
        assert_eq!(ActivityTypeEnum::from_wire("OTHER"), ActivityTypeEnum::OtherActivity);
        assert_eq!(ActivityTypeEnum::OtherActivity.key(), "other");
    }
}
