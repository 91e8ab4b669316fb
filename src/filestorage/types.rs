use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{AdditionalProperties, FieldReader, FieldWriter, Model, RawValidator};
use crate::pagination::Paginated;
use crate::union::EnumOrString;
use crate::wire_enum::wire_enum;

wire_enum! {
    pub enum MethodEnum {
        Get => get = "GET",
        Options => options = "OPTIONS",
        Head => head = "HEAD",
        Post => post = "POST",
        Put => put = "PUT",
        Patch => patch = "PATCH",
        Delete => delete = "DELETE",
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
    pub enum ResponseTypeEnum {
        Json => json = "JSON",
        Base64Gzip => base_64_gzip = "BASE64_GZIP",
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
    /// Who a permission is granted to.
    pub enum TypeEnum {
        User => user = "USER",
        Group => group = "GROUP",
        Company => company = "COMPANY",
        Anyone => anyone = "ANYONE",
    }
}

wire_enum! {
    pub enum RolesEnum {
        Read => read = "READ",
        Write => write = "WRITE",
        Owner => owner = "OWNER",
    }
}

wire_enum! {
    pub enum ConditionTypeEnum {
        Boolean => boolean = "BOOLEAN",
        Date => date = "DATE",
        DateTime => date_time = "DATE_TIME",
        Integer => integer = "INTEGER",
        Float => float = "FLOAT",
        String => string = "STRING",
        ListOfStrings => list_of_strings = "LIST_OF_STRINGS",
    }
}

pub type PermissionRequestType = EnumOrString<TypeEnum>;
pub type PermissionRequestRolesItem = EnumOrString<RolesEnum>;
pub type MultipartFormFieldRequestEncoding = EnumOrString<EncodingEnum>;
pub type ConditionSchemaConditionType = EnumOrString<ConditionTypeEnum>;

/// One field of a multipart passthrough body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipartFormFieldRequest {
    pub name: String,
    pub data: String,
    pub encoding: Option<MultipartFormFieldRequestEncoding>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub additional_properties: AdditionalProperties,
}

impl Model for MultipartFormFieldRequest {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("MultipartFormFieldRequest", json)?;
        Ok(Self {
            name: fields.required_string("name")?,
            data: fields.required_string("data")?,
            encoding: fields.model("encoding")?,
            file_name: fields.string("file_name")?,
            content_type: fields.string("content_type")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("name", &self.name)
            .field("data", &self.data)
            .model("encoding", &self.encoding)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("MultipartFormFieldRequest", obj)?
            .required_string("name")?
            .required_string("data")?
            .nested("encoding", MultipartFormFieldRequestEncoding::validate_raw)?
            .string("file_name")?
            .string("content_type")?;
        Ok(())
    }
}

/// A request forwarded verbatim to an endpoint the unified models do not
/// cover.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPassthroughRequest {
    pub method: MethodEnum,
    pub path: String,
    pub base_url_override: Option<String>,
    pub data: Option<String>,
    pub multipart_form_data: Option<Vec<MultipartFormFieldRequest>>,
    pub headers: Option<Map<String, Value>>,
    pub request_format: Option<RequestFormatEnum>,
    pub normalize_response: Option<bool>,
    pub additional_properties: AdditionalProperties,
}

impl DataPassthroughRequest {
    pub fn new(method: MethodEnum, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            base_url_override: None,
            data: None,
            multipart_form_data: None,
            headers: None,
            request_format: None,
            normalize_response: None,
            additional_properties: AdditionalProperties::new(),
        }
    }
}

impl Model for DataPassthroughRequest {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("DataPassthroughRequest", json)?;
        Ok(Self {
            method: fields.required_wire_enum("method")?,
            path: fields.required_string("path")?,
            base_url_override: fields.string("base_url_override")?,
            data: fields.string("data")?,
            multipart_form_data: fields.model_list("multipart_form_data")?,
            headers: fields.object("headers")?,
            request_format: fields.wire_enum("request_format")?,
            normalize_response: fields.bool("normalize_response")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .required_model("method", &self.method)
            .field("path", &self.path)
            .field("base_url_override", &self.base_url_override)
            .field("data", &self.data)
            .model_list("multipart_form_data", &self.multipart_form_data)
            .field("headers", &self.headers)
            .wire_enum("request_format", &self.request_format)
            .field("normalize_response", &self.normalize_response)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("DataPassthroughRequest", obj)?
            .required_nested("method", MethodEnum::validate_raw)?
            .required_string("path")?
            .string("base_url_override")?
            .string("data")?
            .array("multipart_form_data")?
            .object("headers")?
            .nested("request_format", RequestFormatEnum::validate_raw)?
            .bool("normalize_response")?;
        Ok(())
    }
}

/// What the third party answered to a passthrough request.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse {
    pub method: String,
    pub path: String,
    pub status: i64,
    pub response: Value,
    pub response_headers: Option<Map<String, Value>>,
    pub response_type: Option<ResponseTypeEnum>,
    pub headers: Option<Map<String, Value>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for RemoteResponse {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("RemoteResponse", json)?;
        Ok(Self {
            method: fields.required_string("method")?,
            path: fields.required_string("path")?,
            status: fields.required_integer("status")?,
            response: fields.required_raw("response")?,
            response_headers: fields.object("response_headers")?,
            response_type: fields.wire_enum("response_type")?,
            headers: fields.object("headers")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("method", &self.method)
            .field("path", &self.path)
            .field("status", &self.status)
            .field("response", &self.response)
            .field("response_headers", &self.response_headers)
            .wire_enum("response_type", &self.response_type)
            .field("headers", &self.headers)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("RemoteResponse", obj)?
            .required_string("method")?
            .required_string("path")?
            .required_integer("status")?
            .required_raw("response")?
            .object("response_headers")?
            .nested("response_type", ResponseTypeEnum::validate_raw)?
            .object("headers")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PermissionRequest {
    pub remote_id: Option<String>,
    pub user: Option<String>,
    pub group: Option<String>,
    /// Emitted as `type`.
    pub type_: Option<PermissionRequestType>,
    pub roles: Option<Vec<PermissionRequestRolesItem>>,
    pub integration_params: Option<Map<String, Value>>,
    pub linked_account_params: Option<Map<String, Value>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for PermissionRequest {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("PermissionRequest", json)?;
        Ok(Self {
            remote_id: fields.string("remote_id")?,
            user: fields.string("user")?,
            group: fields.string("group")?,
            type_: fields.model("type")?,
            roles: fields.model_list("roles")?,
            integration_params: fields.object("integration_params")?,
            linked_account_params: fields.object("linked_account_params")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("remote_id", &self.remote_id)
            .field("user", &self.user)
            .field("group", &self.group)
            .model("type", &self.type_)
            .model_list("roles", &self.roles)
            .field("integration_params", &self.integration_params)
            .field("linked_account_params", &self.linked_account_params)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("PermissionRequest", obj)?
            .string("remote_id")?
            .string("user")?
            .string("group")?
            .nested("type", PermissionRequestType::validate_raw)?
            .array("roles")?
            .object("integration_params")?
            .object("linked_account_params")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperatorSchema {
    pub operator: Option<String>,
    pub is_unique: Option<bool>,
    pub additional_properties: AdditionalProperties,
}

impl Model for OperatorSchema {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("OperatorSchema", json)?;
        Ok(Self {
            operator: fields.string("operator")?,
            is_unique: fields.bool("is_unique")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("operator", &self.operator)
            .field("is_unique", &self.is_unique)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("OperatorSchema", obj)?
            .string("operator")?
            .bool("is_unique")?;
        Ok(())
    }
}

/// A field selective sync can filter on, with the operators it accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSchema {
    pub id: Option<String>,
    pub common_model: Option<String>,
    pub native_name: Option<String>,
    pub field_name: Option<String>,
    pub is_unique: Option<bool>,
    pub condition_type: ConditionSchemaConditionType,
    pub operators: Vec<OperatorSchema>,
    pub additional_properties: AdditionalProperties,
}

impl Model for ConditionSchema {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("ConditionSchema", json)?;
        Ok(Self {
            id: fields.string("id")?,
            common_model: fields.string("common_model")?,
            native_name: fields.string("native_name")?,
            field_name: fields.string("field_name")?,
            is_unique: fields.bool("is_unique")?,
            condition_type: fields.required_model("condition_type")?,
            operators: fields.required_model_list("operators")?,
            additional_properties: fields.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("id", &self.id)
            .field("common_model", &self.common_model)
            .field("native_name", &self.native_name)
            .field("field_name", &self.field_name)
            .field("is_unique", &self.is_unique)
            .required_model("condition_type", &self.condition_type)
            .required_model_list("operators", &self.operators)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("ConditionSchema", obj)?
            .string("id")?
            .string("common_model")?
            .string("native_name")?
            .string("field_name")?
            .bool("is_unique")?
            .required_nested("condition_type", ConditionSchemaConditionType::validate_raw)?
            .required_array("operators")?;
        Ok(())
    }
}

pub type PaginatedConditionSchemaList = Paginated<ConditionSchema>;
