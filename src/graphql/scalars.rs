//! Custom GraphQL scalars.

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Point in time, RFC 3339 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub OffsetDateTime);

#[Scalar(name = "Date")]
impl ScalarType for Date {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(s) = &value {
            Ok(Self(OffsetDateTime::parse(s, &Rfc3339)?))
        } else {
            Err(InputValueError::expected_type(value))
        }
    }

    fn to_value(&self) -> Value {
        // Only years outside 0..=9999 fail to format.
        self.0.format(&Rfc3339).map_or(Value::Null, Value::String)
    }
}

impl From<OffsetDateTime> for Date {
    fn from(value: OffsetDateTime) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn formats_as_rfc3339() {
        let date = Date(datetime!(2018-12-31 7:20 UTC));
        assert_eq!(date.to_value(), Value::String("2018-12-31T07:20:00Z".into()));
    }

    #[test]
    fn parses_rfc3339_strings() {
        let parsed = Date::parse(Value::String("2019-01-01T00:00:00+02:00".into())).unwrap();
        assert_eq!(parsed.0, datetime!(2018-12-31 22:00 UTC));
    }

    #[test]
    fn rejects_non_strings_and_garbage() {
        assert!(Date::parse(Value::Boolean(true)).is_err());
        assert!(Date::parse(Value::String("yesterday".into())).is_err());
    }
}
