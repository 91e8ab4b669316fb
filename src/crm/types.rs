use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{AdditionalProperties, FieldReader, FieldWriter, Model, RawValidator};
use crate::pagination::Paginated;
use crate::union::EnumOrString;
use crate::wire_enum::wire_enum;

wire_enum! {
    /// How many records sit on each side of an association.
    pub enum CardinalityEnum {
        OneToOne => one_to_one = "ONE_TO_ONE",
        ManyToOne => many_to_one = "MANY_TO_ONE",
        ManyToMany => many_to_many = "MANY_TO_MANY",
        OneToMany => one_to_many = "ONE_TO_MANY",
    }
}

wire_enum! {
    pub enum RoleEnum {
        Admin => admin = "ADMIN",
        Developer => developer = "DEVELOPER",
        Member => member = "MEMBER",
        Api => api = "API",
        System => system = "SYSTEM",
        MergeTeam => merge_team = "MERGE_TEAM",
    }
}

wire_enum! {
    pub enum ActivityTypeEnum {
        Call => call = "CALL",
        Meeting => meeting = "MEETING",
        Email => email = "EMAIL",
    }
}

wire_enum! {
    pub enum AddressTypeEnum {
        Billing => billing = "BILLING",
        Shipping => shipping = "SHIPPING",
    }
}

wire_enum! {
    pub enum LeadsRetrieveRequestExpand {
        ConvertedAccount => converted_account = "converted_account",
        ConvertedContact => converted_contact = "converted_contact",
        ConvertedContactConvertedAccount =>
            converted_contact_converted_account = "converted_contact,converted_account",
        Owner => owner = "owner",
        OwnerConvertedAccount => owner_converted_account = "owner,converted_account",
        OwnerConvertedContact => owner_converted_contact = "owner,converted_contact",
        OwnerConvertedContactConvertedAccount =>
            owner_converted_contact_converted_account =
            "owner,converted_contact,converted_account",
    }
}

pub type AuditLogEventRole = EnumOrString<RoleEnum>;
pub type EngagementTypeActivityType = EnumOrString<ActivityTypeEnum>;
pub type AddressRequestAddressType = EnumOrString<AddressTypeEnum>;

/// A custom field value pulled from the third-party platform.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteField {
    pub remote_field_class: Option<Value>,
    pub value: Option<Value>,
    pub additional_properties: AdditionalProperties,
}

impl Model for RemoteField {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("RemoteField", json)?;
        Ok(Self {
            remote_field_class: fields.raw("remote_field_class"),
            value: fields.raw("value"),
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("remote_field_class", &self.remote_field_class)
            .field("value", &self.value)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("RemoteField", obj)?;
        Ok(())
    }
}

/// A stage in a sales pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stage {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub remote_was_deleted: Option<bool>,
    pub field_mappings: Option<Map<String, Value>>,
    pub remote_data: Option<Vec<Value>>,
    pub remote_fields: Option<Vec<RemoteField>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for Stage {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("Stage", json)?;
        Ok(Self {
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            name: fields.string("name")?,
            remote_was_deleted: fields.bool("remote_was_deleted")?,
            field_mappings: fields.object("field_mappings")?,
            remote_data: fields.raw_list("remote_data")?,
            remote_fields: fields.model_list("remote_fields")?,
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
            .field("remote_was_deleted", &self.remote_was_deleted)
            .field("field_mappings", &self.field_mappings)
            .field("remote_data", &self.remote_data)
            .model_list("remote_fields", &self.remote_fields)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("Stage", obj)?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .string("name")?
            .bool("remote_was_deleted")?
            .object("field_mappings")?
            .array("remote_data")?
            .array("remote_fields")?;
        Ok(())
    }
}

/// A prospect that has not yet been converted to a contact or account.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lead {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub owner: Option<String>,
    pub lead_source: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub addresses: Option<Vec<Value>>,
    pub email_addresses: Option<Vec<Value>>,
    pub phone_numbers: Option<Vec<Value>>,
    pub remote_updated_at: Option<DateTime<Utc>>,
    pub remote_created_at: Option<DateTime<Utc>>,
    pub converted_date: Option<DateTime<Utc>>,
    pub converted_contact: Option<String>,
    pub converted_account: Option<String>,
    pub remote_was_deleted: Option<bool>,
    pub field_mappings: Option<Map<String, Value>>,
    pub remote_data: Option<Vec<Value>>,
    pub remote_fields: Option<Vec<RemoteField>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for Lead {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("Lead", json)?;
        Ok(Self {
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            owner: fields.string("owner")?,
            lead_source: fields.string("lead_source")?,
            title: fields.string("title")?,
            company: fields.string("company")?,
            first_name: fields.string("first_name")?,
            last_name: fields.string("last_name")?,
            addresses: fields.raw_list("addresses")?,
            email_addresses: fields.raw_list("email_addresses")?,
            phone_numbers: fields.raw_list("phone_numbers")?,
            remote_updated_at: fields.datetime("remote_updated_at")?,
            remote_created_at: fields.datetime("remote_created_at")?,
            converted_date: fields.datetime("converted_date")?,
            converted_contact: fields.string("converted_contact")?,
            converted_account: fields.string("converted_account")?,
            remote_was_deleted: fields.bool("remote_was_deleted")?,
            field_mappings: fields.object("field_mappings")?,
            remote_data: fields.raw_list("remote_data")?,
            remote_fields: fields.model_list("remote_fields")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("id", &self.id)
            .field("remote_id", &self.remote_id)
            .field("created_at", &self.created_at)
            .field("modified_at", &self.modified_at)
            .field("owner", &self.owner)
            .field("lead_source", &self.lead_source)
            .field("title", &self.title)
            .field("company", &self.company)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("addresses", &self.addresses)
            .field("email_addresses", &self.email_addresses)
            .field("phone_numbers", &self.phone_numbers)
            .field("remote_updated_at", &self.remote_updated_at)
            .field("remote_created_at", &self.remote_created_at)
            .field("converted_date", &self.converted_date)
            .field("converted_contact", &self.converted_contact)
            .field("converted_account", &self.converted_account)
            .field("remote_was_deleted", &self.remote_was_deleted)
            .field("field_mappings", &self.field_mappings)
            .field("remote_data", &self.remote_data)
            .model_list("remote_fields", &self.remote_fields)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("Lead", obj)?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .string("owner")?
            .string("lead_source")?
            .string("title")?
            .string("company")?
            .string("first_name")?
            .string("last_name")?
            .array("addresses")?
            .array("email_addresses")?
            .array("phone_numbers")?
            .datetime("remote_updated_at")?
            .datetime("remote_created_at")?
            .datetime("converted_date")?
            .string("converted_contact")?
            .string("converted_account")?
            .bool("remote_was_deleted")?
            .object("field_mappings")?
            .array("remote_data")?
            .array("remote_fields")?;
        Ok(())
    }
}

/// The kind of interaction an engagement records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngagementType {
    pub activity_type: Option<EngagementTypeActivityType>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub remote_fields: Option<Vec<RemoteField>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for EngagementType {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("EngagementType", json)?;
        Ok(Self {
            activity_type: fields.model("activity_type")?,
            name: fields.string("name")?,
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            remote_fields: fields.model_list("remote_fields")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .model("activity_type", &self.activity_type)
            .field("name", &self.name)
            .field("id", &self.id)
            .field("remote_id", &self.remote_id)
            .field("created_at", &self.created_at)
            .field("modified_at", &self.modified_at)
            .model_list("remote_fields", &self.remote_fields)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("EngagementType", obj)?
            .nested("activity_type", EngagementTypeActivityType::validate_raw)?
            .string("name")?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .array("remote_fields")?;
        Ok(())
    }
}

/// Address payload for create and update calls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddressRequest {
    pub street_1: Option<String>,
    pub street_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 code.
    pub country: Option<String>,
    pub address_type: Option<AddressRequestAddressType>,
    pub integration_params: Option<Map<String, Value>>,
    pub linked_account_params: Option<Map<String, Value>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for AddressRequest {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("AddressRequest", json)?;
        Ok(Self {
            street_1: fields.string("street_1")?,
            street_2: fields.string("street_2")?,
            city: fields.string("city")?,
            state: fields.string("state")?,
            postal_code: fields.string("postal_code")?,
            country: fields.string("country")?,
            address_type: fields.model("address_type")?,
            integration_params: fields.object("integration_params")?,
            linked_account_params: fields.object("linked_account_params")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("street_1", &self.street_1)
            .field("street_2", &self.street_2)
            .field("city", &self.city)
            .field("state", &self.state)
            .field("postal_code", &self.postal_code)
            .field("country", &self.country)
            .model("address_type", &self.address_type)
            .field("integration_params", &self.integration_params)
            .field("linked_account_params", &self.linked_account_params)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("AddressRequest", obj)?
            .string("street_1")?
            .string("street_2")?
            .string("city")?
            .string("state")?
            .string("postal_code")?
            .string("country")?
            .nested("address_type", AddressRequestAddressType::validate_raw)?
            .object("integration_params")?
            .object("linked_account_params")?;
        Ok(())
    }
}

/// One entry in the organization's audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEvent {
    pub id: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub role: AuditLogEventRole,
    pub ip_address: String,
    pub event_type: String,
    pub event_description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for AuditLogEvent {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("AuditLogEvent", json)?;
        Ok(Self {
            id: fields.string("id")?,
            user_name: fields.string("user_name")?,
            user_email: fields.string("user_email")?,
            role: fields.required_model("role")?,
            ip_address: fields.required_string("ip_address")?,
            event_type: fields.required_string("event_type")?,
            event_description: fields.required_string("event_description")?,
            created_at: fields.datetime("created_at")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("user_email", &self.user_email)
            .required_model("role", &self.role)
            .field("ip_address", &self.ip_address)
            .field("event_type", &self.event_type)
            .field("event_description", &self.event_description)
            .field("created_at", &self.created_at)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("AuditLogEvent", obj)?
            .string("id")?
            .string("user_name")?
            .string("user_email")?
            .required_nested("role", AuditLogEventRole::validate_raw)?
            .required_string("ip_address")?
            .required_string("event_type")?
            .required_string("event_description")?
            .datetime("created_at")?;
        Ok(())
    }
}

pub type PaginatedStageList = Paginated<Stage>;
