use super::dictionary::{
    CLASS_ATTRIBUTE_ASSIGNMENT, CLASS_OBLIGATION, CLASS_RESPONSE, CLASS_RESULT, CLASS_STATUS,
    CLASS_STATUS_CODE, FIELD_ASSIGNMENTS, FIELD_CODE, FIELD_DATA_TYPE, FIELD_DECISION,
    FIELD_FULFILL_ON, FIELD_ID, FIELD_MESSAGE, FIELD_OBLIGATIONS, FIELD_REQUEST, FIELD_RESOURCE_ID,
    FIELD_RESULTS, FIELD_STATUS, FIELD_SUB_CODE, FIELD_VALUE,
};
use super::{Fields, HessianMarshal, list_of, optional};
use crate::error::MarshalError;
use crate::request::Request;
use crate::response::{
    AttributeAssignment, Decision, DecisionResult, FulfillOn, Obligation, Response, Status,
    StatusCode,
};
use pep_hessian::{HessianMap, HessianValue};

impl HessianMarshal for StatusCode {
    const CLASS: &'static str = CLASS_STATUS_CODE;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_CODE, self.code.as_str())
            .with(FIELD_SUB_CODE, optional(self.sub_code.as_deref()))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(value, Self::CLASS, &[FIELD_CODE, FIELD_SUB_CODE])?;
        Ok(Self {
            code: fields.string(FIELD_CODE)?,
            sub_code: fields.object::<StatusCode>(FIELD_SUB_CODE)?.map(Box::new),
        })
    }
}

impl HessianMarshal for Status {
    const CLASS: &'static str = CLASS_STATUS;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_MESSAGE, HessianValue::optional_string(self.message.as_deref()))
            .with(FIELD_CODE, optional(self.code.as_ref()))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(value, Self::CLASS, &[FIELD_MESSAGE, FIELD_CODE])?;
        Ok(Self {
            message: fields.optional_string(FIELD_MESSAGE)?,
            code: fields.object(FIELD_CODE)?,
        })
    }
}

impl HessianMarshal for AttributeAssignment {
    const CLASS: &'static str = CLASS_ATTRIBUTE_ASSIGNMENT;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_ID, self.id.as_str())
            .with(FIELD_DATA_TYPE, HessianValue::optional_string(self.data_type.as_deref()))
            .with(FIELD_VALUE, HessianValue::optional_string(self.value.as_deref()))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(value, Self::CLASS, &[FIELD_ID, FIELD_DATA_TYPE, FIELD_VALUE])?;
        Ok(Self {
            id: fields.string(FIELD_ID)?,
            data_type: fields.optional_string(FIELD_DATA_TYPE)?,
            value: fields.optional_string(FIELD_VALUE)?,
        })
    }
}

impl HessianMarshal for Obligation {
    const CLASS: &'static str = CLASS_OBLIGATION;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_ID, self.id.as_str())
            .with(FIELD_FULFILL_ON, self.fulfill_on.code())
            .with(FIELD_ASSIGNMENTS, list_of(&self.assignments))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(
            value,
            Self::CLASS,
            &[FIELD_ID, FIELD_FULFILL_ON, FIELD_ASSIGNMENTS],
        )?;
        let code = fields.integer(FIELD_FULFILL_ON)?;
        let fulfill_on = FulfillOn::from_code(code).ok_or_else(|| {
            MarshalError::schema(fields.class(), format!("unknown fulfillOn value {code}"))
        })?;
        Ok(Self {
            id: fields.string(FIELD_ID)?,
            fulfill_on,
            assignments: fields.list(FIELD_ASSIGNMENTS)?,
        })
    }
}

impl HessianMarshal for DecisionResult {
    const CLASS: &'static str = CLASS_RESULT;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_DECISION, self.decision.code())
            .with(FIELD_RESOURCE_ID, HessianValue::optional_string(self.resource_id.as_deref()))
            .with(FIELD_STATUS, optional(self.status.as_ref()))
            .with(FIELD_OBLIGATIONS, list_of(&self.obligations))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(
            value,
            Self::CLASS,
            &[FIELD_DECISION, FIELD_RESOURCE_ID, FIELD_STATUS, FIELD_OBLIGATIONS],
        )?;
        let code = fields.integer(FIELD_DECISION)?;
        let decision = Decision::from_code(code).ok_or_else(|| {
            MarshalError::schema(fields.class(), format!("unknown decision value {code}"))
        })?;
        Ok(Self {
            decision,
            resource_id: fields.optional_string(FIELD_RESOURCE_ID)?,
            status: fields.object(FIELD_STATUS)?,
            obligations: fields.list(FIELD_OBLIGATIONS)?,
        })
    }
}

impl HessianMarshal for Response {
    const CLASS: &'static str = CLASS_RESPONSE;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_REQUEST, optional(self.request.as_ref()))
            .with(FIELD_RESULTS, list_of(&self.results))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(value, Self::CLASS, &[FIELD_REQUEST, FIELD_RESULTS])?;
        Ok(Self {
            request: fields.object::<Request>(FIELD_REQUEST)?,
            results: fields.list(FIELD_RESULTS)?,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::ids;

    fn result_map(decision: HessianValue) -> HessianValue {
        HessianValue::map(
            HessianMap::typed(CLASS_RESULT)
                .with(FIELD_DECISION, decision)
                .with(FIELD_OBLIGATIONS, HessianValue::list(vec![])),
        )
    }

    #[test]
    fn test_decision_is_an_integer_on_the_wire() {
        let value = DecisionResult::new(Decision::NotApplicable).marshal();
        assert_eq!(
            value.as_map().unwrap().get(FIELD_DECISION),
            Some(&HessianValue::Integer(3))
        );
    }

    #[test]
    fn test_unknown_decision_code() {
        let err = DecisionResult::unmarshal(&result_map(HessianValue::integer(9))).unwrap_err();
        assert_eq!(err.to_string(), "Result: unknown decision value 9");
    }

    #[test]
    fn test_decision_is_mandatory() {
        let err = DecisionResult::unmarshal(&result_map(HessianValue::Null)).unwrap_err();
        assert_eq!(err.to_string(), "Result: missing mandatory field decision");
    }

    #[test]
    fn test_decision_as_long_is_rejected() {
        let err = DecisionResult::unmarshal(&result_map(HessianValue::long(1))).unwrap_err();
        assert!(matches!(err, MarshalError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_nested_status_codes() {
        let code = StatusCode::new(ids::STATUS_PROCESSING_ERROR)
            .with_sub_code(StatusCode::new("urn:sub").with_sub_code(StatusCode::new("urn:leaf")));
        let decoded = StatusCode::unmarshal(&code.marshal()).unwrap();
        assert_eq!(decoded, code);
        assert_eq!(
            decoded.sub_code.unwrap().sub_code.unwrap().code,
            "urn:leaf"
        );
    }

    #[test]
    fn test_obligation_fulfill_on() {
        let mut obligation = Obligation::new("urn:ob", FulfillOn::Deny);
        obligation
            .assignments
            .push(AttributeAssignment::new("urn:a", "b"));
        let value = obligation.marshal();
        assert_eq!(
            value.as_map().unwrap().get(FIELD_FULFILL_ON),
            Some(&HessianValue::Integer(0))
        );
        assert_eq!(Obligation::unmarshal(&value).unwrap(), obligation);
    }
}
