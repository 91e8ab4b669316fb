use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{AdditionalProperties, FieldReader, FieldWriter, Model, RawValidator};
use crate::pagination::Paginated;
use crate::wire_enum::wire_enum;

wire_enum! {
    /// Type of a ticket field value.
    pub enum ItemTypeEnum {
        String => string = "string",
        Number => number = "number",
        Date => date = "date",
        Datetime => datetime = "datetime",
        Bool => bool = "bool",
        List => list = "list",
    }
}

wire_enum! {
    pub enum ProjectsUsersListRequestExpand {
        Roles => roles = "roles",
        RolesTeams => roles_teams = "roles,teams",
        Teams => teams = "teams",
    }
}

/// A collection of tickets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Project {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub remote_was_deleted: Option<bool>,
    pub field_mappings: Option<Map<String, Value>>,
    pub remote_data: Option<Vec<Value>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for Project {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("Project", json)?;
        Ok(Self {
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            name: fields.string("name")?,
            description: fields.string("description")?,
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
            .field("remote_was_deleted", &self.remote_was_deleted)
            .field("field_mappings", &self.field_mappings)
            .field("remote_data", &self.remote_data)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("Project", obj)?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .string("name")?
            .string("description")?
            .bool("remote_was_deleted")?
            .object("field_mappings")?
            .array("remote_data")?;
        Ok(())
    }
}

/// A user with access to the ticketing system.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct User {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub email_address: Option<String>,
    pub is_active: Option<bool>,
    pub teams: Option<Vec<String>>,
    pub roles: Option<Vec<String>>,
    pub avatar: Option<String>,
    pub remote_was_deleted: Option<bool>,
    pub field_mappings: Option<Map<String, Value>>,
    pub remote_data: Option<Vec<Value>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for User {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("User", json)?;
        Ok(Self {
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            name: fields.string("name")?,
            email_address: fields.string("email_address")?,
            is_active: fields.bool("is_active")?,
            teams: fields.string_list("teams")?,
            roles: fields.string_list("roles")?,
            avatar: fields.string("avatar")?,
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
            .field("email_address", &self.email_address)
            .field("is_active", &self.is_active)
            .field("teams", &self.teams)
            .field("roles", &self.roles)
            .field("avatar", &self.avatar)
            .field("remote_was_deleted", &self.remote_was_deleted)
            .field("field_mappings", &self.field_mappings)
            .field("remote_data", &self.remote_data)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("User", obj)?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .string("name")?
            .string("email_address")?
            .bool("is_active")?
            .array("teams")?
            .array("roles")?
            .string("avatar")?
            .bool("remote_was_deleted")?
            .object("field_mappings")?
            .array("remote_data")?;
        Ok(())
    }
}

pub type PaginatedProjectList = Paginated<Project>;
pub type PaginatedUserList = Paginated<User>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire_enum::WireEnum;

    #[test]
    fn test_project_round_trip() {
        let project = Project::from_json(
            r#"{"id":"17a54124","remote_id":"876556788","created_at":"2021-09-15T00:00:00Z","name":"Platform","remote_was_deleted":false,"remote_data":[{"path":"/platform"}]}"#,
        )
        .unwrap();
        let again = Project::from_json(&project.to_json()).unwrap();
        assert_eq!(project, again);
    }

    #[test]
    fn test_user_keeps_unknown_keys_out_of_output() {
        let user = User::from_json(r#"{"id":"u1","timezone":"UTC"}"#).unwrap();
        assert_eq!(user.additional_properties.get("timezone"), Some(&Value::from("UTC")));
        assert!(!user.to_json().contains("timezone"));
    }

    #[test]
    fn test_user_validate_raw_names_field() {
        let err = User::validate_raw(&serde_json::json!({"teams": "core"})).unwrap_err();
        assert!(err.to_string().contains("User.teams"));
    }

    #[test]
    fn test_expand_wire_value_carries_commas() {
        assert_eq!(ProjectsUsersListRequestExpand::RolesTeams.as_wire(), "roles,teams");
        assert_eq!(
            ProjectsUsersListRequestExpand::TABLE.key("roles,teams"),
            Some("roles_teams")
        );
        assert_eq!(ItemTypeEnum::from_wire("datetime").key(), "datetime");
    }
}
