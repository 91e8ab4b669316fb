use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{AdditionalProperties, FieldReader, FieldWriter, Model, RawValidator};
use crate::pagination::Paginated;
use crate::union::EnumOrString;
use crate::wire_enum::wire_enum;

wire_enum! {
    pub enum BenefitPlanTypeEnum {
        Medical => medical = "MEDICAL",
        HealthSavings => health_savings = "HEALTH_SAVINGS",
        Insurance => insurance = "INSURANCE",
        Retirement => retirement = "RETIREMENT",
        OtherPlan => other = "OTHER",
    }
}

wire_enum! {
    /// Category of leave a balance is tracked under.
    pub enum PolicyTypeEnum {
        Vacation => vacation = "VACATION",
        Sick => sick = "SICK",
        Personal => personal = "PERSONAL",
        JuryDuty => jury_duty = "JURY_DUTY",
        Volunteer => volunteer = "VOLUNTEER",
        Bereavement => bereavement = "BEREAVEMENT",
    }
}

wire_enum! {
    pub enum TimeOffBalancesListRequestExpand {
        Employee => employee = "employee",
    }
}

pub type TimeOffBalancesListRequestPolicyType = PolicyTypeEnum;

pub type EmployerBenefitBenefitPlanType = EnumOrString<BenefitPlanTypeEnum>;
pub type TimeOffBalancePolicyType = EnumOrString<PolicyTypeEnum>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeOffBalance {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub employee: Option<String>,
    /// Hours remaining; may be negative.
    pub balance: Option<f64>,
    pub used: Option<f64>,
    pub policy_type: Option<TimeOffBalancePolicyType>,
    pub remote_was_deleted: Option<bool>,
    pub field_mappings: Option<Map<String, Value>>,
    pub remote_data: Option<Vec<Value>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for TimeOffBalance {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("TimeOffBalance", json)?;
        Ok(Self {
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            employee: fields.string("employee")?,
            balance: fields.number("balance")?,
            used: fields.number("used")?,
            policy_type: fields.model("policy_type")?,
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
            .field("employee", &self.employee)
            .field("balance", &self.balance)
            .field("used", &self.used)
            .model("policy_type", &self.policy_type)
            .field("remote_was_deleted", &self.remote_was_deleted)
            .field("field_mappings", &self.field_mappings)
            .field("remote_data", &self.remote_data)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("TimeOffBalance", obj)?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .string("employee")?
            .number("balance")?
            .number("used")?
            .nested("policy_type", TimeOffBalancePolicyType::validate_raw)?
            .bool("remote_was_deleted")?
            .object("field_mappings")?
            .array("remote_data")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmployerBenefit {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub benefit_plan_type: Option<EmployerBenefitBenefitPlanType>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub deduction_code: Option<String>,
    pub remote_was_deleted: Option<bool>,
    pub field_mappings: Option<Map<String, Value>>,
    pub remote_data: Option<Vec<Value>>,
    pub additional_properties: AdditionalProperties,
}

impl Model for EmployerBenefit {
    fn from_json(json: &str) -> Result<Self> {
        let mut fields = FieldReader::parse("EmployerBenefit", json)?;
        Ok(Self {
            id: fields.string("id")?,
            remote_id: fields.string("remote_id")?,
            created_at: fields.datetime("created_at")?,
            modified_at: fields.datetime("modified_at")?,
            benefit_plan_type: fields.model("benefit_plan_type")?,
            name: fields.string("name")?,
            description: fields.string("description")?,
            deduction_code: fields.string("deduction_code")?,
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
            .model("benefit_plan_type", &self.benefit_plan_type)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("deduction_code", &self.deduction_code)
            .field("remote_was_deleted", &self.remote_was_deleted)
            .field("field_mappings", &self.field_mappings)
            .field("remote_data", &self.remote_data)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("EmployerBenefit", obj)?
            .string("id")?
            .string("remote_id")?
            .datetime("created_at")?
            .datetime("modified_at")?
            .nested("benefit_plan_type", EmployerBenefitBenefitPlanType::validate_raw)?
            .string("name")?
            .string("description")?
            .string("deduction_code")?
            .bool("remote_was_deleted")?
            .object("field_mappings")?
            .array("remote_data")?;
        Ok(())
    }
}

pub type PaginatedTimeOffBalanceList = Paginated<TimeOffBalance>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire_enum::WireEnum;

    #[test]
    fn test_time_off_balance_numbers_and_policy() {
        let balance = TimeOffBalance::from_json(
            r#"{"id":"91b2b905","employee":"d2f972d0","balance":60.0,"used":45,"policy_type":"VACATION"}"#,
        )
        .unwrap();
        assert_eq!(balance.balance, Some(60.0));
        assert_eq!(balance.used, Some(45.0));
        assert_eq!(
            balance.policy_type,
            Some(TimeOffBalancePolicyType::Enum(PolicyTypeEnum::Vacation))
        );
    }

    #[test]
    fn test_balance_rejects_string_amount() {
        let err = TimeOffBalance::from_json(r#"{"balance":"sixty"}"#).unwrap_err();
        assert!(err.to_string().contains("TimeOffBalance.balance"));
    }

    #[test]
    fn test_benefit_plan_other_key() {
        let benefit =
            EmployerBenefit::from_json(r#"{"benefit_plan_type":"OTHER","name":"Gym"}"#).unwrap();
        let plan = benefit.benefit_plan_type.unwrap();
        assert_eq!(plan.as_enum(), Some(&BenefitPlanTypeEnum::OtherPlan));
        assert_eq!(BenefitPlanTypeEnum::OtherPlan.key(), "other");
    }

    #[test]
    fn test_employer_benefit_round_trip() {
        let benefit = EmployerBenefit::from_json(
            r#"{"id":"025fjlc6","benefit_plan_type":"DENTAL","deduction_code":"E7","remote_was_deleted":false}"#,
        )
        .unwrap();
        assert_eq!(
            benefit.benefit_plan_type,
            Some(EmployerBenefitBenefitPlanType::String("DENTAL".to_string()))
        );
        assert_eq!(EmployerBenefit::from_json(&benefit.to_json()).unwrap(), benefit);
    }
}
