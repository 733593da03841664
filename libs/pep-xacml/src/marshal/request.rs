use super::dictionary::{
    CLASS_ACTION, CLASS_ATTRIBUTE, CLASS_ENVIRONMENT, CLASS_REQUEST, CLASS_RESOURCE, CLASS_SUBJECT,
    FIELD_ACTION, FIELD_ATTRIBUTES, FIELD_CATEGORY, FIELD_CONTENT, FIELD_DATA_TYPE,
    FIELD_ENVIRONMENT, FIELD_ID, FIELD_ISSUER, FIELD_RESOURCES, FIELD_SUBJECTS, FIELD_VALUES,
};
use super::{Fields, HessianMarshal, list_of, optional};
use crate::error::MarshalError;
use crate::request::{Action, Attribute, Environment, Request, Resource, Subject};
use pep_hessian::{HessianMap, HessianValue};

impl HessianMarshal for Attribute {
    const CLASS: &'static str = CLASS_ATTRIBUTE;

    fn marshal(&self) -> HessianValue {
        let values = self.values.iter().map(HessianValue::string).collect();
        HessianMap::typed(Self::CLASS)
            .with(FIELD_ID, self.id.as_str())
            .with(FIELD_DATA_TYPE, HessianValue::optional_string(self.data_type.as_deref()))
            .with(FIELD_ISSUER, HessianValue::optional_string(self.issuer.as_deref()))
            .with(FIELD_VALUES, HessianValue::list(values))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(
            value,
            Self::CLASS,
            &[FIELD_ID, FIELD_DATA_TYPE, FIELD_ISSUER, FIELD_VALUES],
        )?;
        Ok(Self {
            id: fields.string(FIELD_ID)?,
            data_type: fields.optional_string(FIELD_DATA_TYPE)?,
            issuer: fields.optional_string(FIELD_ISSUER)?,
            values: fields.string_list(FIELD_VALUES)?,
        })
    }
}

impl HessianMarshal for Subject {
    const CLASS: &'static str = CLASS_SUBJECT;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_CATEGORY, HessianValue::optional_string(self.category.as_deref()))
            .with(FIELD_ATTRIBUTES, list_of(&self.attributes))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(value, Self::CLASS, &[FIELD_CATEGORY, FIELD_ATTRIBUTES])?;
        Ok(Self {
            category: fields.optional_string(FIELD_CATEGORY)?,
            attributes: fields.list(FIELD_ATTRIBUTES)?,
        })
    }
}

impl HessianMarshal for Resource {
    const CLASS: &'static str = CLASS_RESOURCE;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_CONTENT, HessianValue::optional_string(self.content.as_deref()))
            .with(FIELD_ATTRIBUTES, list_of(&self.attributes))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(value, Self::CLASS, &[FIELD_CONTENT, FIELD_ATTRIBUTES])?;
        Ok(Self {
            content: fields.optional_string(FIELD_CONTENT)?,
            attributes: fields.list(FIELD_ATTRIBUTES)?,
        })
    }
}

impl HessianMarshal for Action {
    const CLASS: &'static str = CLASS_ACTION;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_ATTRIBUTES, list_of(&self.attributes))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(value, Self::CLASS, &[FIELD_ATTRIBUTES])?;
        Ok(Self {
            attributes: fields.list(FIELD_ATTRIBUTES)?,
        })
    }
}

impl HessianMarshal for Environment {
    const CLASS: &'static str = CLASS_ENVIRONMENT;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_ATTRIBUTES, list_of(&self.attributes))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(value, Self::CLASS, &[FIELD_ATTRIBUTES])?;
        Ok(Self {
            attributes: fields.list(FIELD_ATTRIBUTES)?,
        })
    }
}

impl HessianMarshal for Request {
    const CLASS: &'static str = CLASS_REQUEST;

    fn marshal(&self) -> HessianValue {
        HessianMap::typed(Self::CLASS)
            .with(FIELD_SUBJECTS, list_of(&self.subjects))
            .with(FIELD_RESOURCES, list_of(&self.resources))
            .with(FIELD_ACTION, optional(self.action.as_ref()))
            .with(FIELD_ENVIRONMENT, optional(self.environment.as_ref()))
            .into()
    }

    fn unmarshal(value: &HessianValue) -> Result<Self, MarshalError> {
        let fields = Fields::open(
            value,
            Self::CLASS,
            &[FIELD_SUBJECTS, FIELD_RESOURCES, FIELD_ACTION, FIELD_ENVIRONMENT],
        )?;
        Ok(Self {
            subjects: fields.list(FIELD_SUBJECTS)?,
            resources: fields.list(FIELD_RESOURCES)?,
            action: fields.object(FIELD_ACTION)?,
            environment: fields.object(FIELD_ENVIRONMENT)?,
        })
    }
}
