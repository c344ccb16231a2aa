use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use quarry_core::schema::FieldType;
use quarry_core::stmt::Value;
use quarry_core::{Error, Result};

use serde_json::Value as Json;

/// Coerce a raw JSON comparison value to the target field's declared type.
///
/// Arrays coerce element-wise, dropping JSON nulls (a GraphQL convenience:
/// absent variables arrive as null list entries). Without type information
/// the value maps structurally.
pub(crate) fn coerce(raw: &Json, ty: Option<FieldType>) -> Result<Value> {
    if let Json::Array(items) = raw {
        let mut values = Vec::with_capacity(items.len());

        for item in items {
            if item.is_null() {
                continue;
            }
            values.push(coerce(item, ty)?);
        }

        return Ok(Value::List(values));
    }

    match ty {
        Some(ty) if ty.is_temporal() && !raw.is_null() => parse_temporal(raw, ty),
        Some(ty) if ty.is_numeric() && !raw.is_null() => parse_numeric(raw, ty),
        _ => from_json(raw),
    }
}

fn from_json(raw: &Json) -> Result<Value> {
    Ok(match raw {
        Json::Null => Value::Null,
        Json::Bool(value) => Value::Bool(*value),
        Json::Number(value) => match value.as_i64() {
            Some(value) => Value::I64(value),
            None => match value.as_f64() {
                Some(value) => Value::F64(value),
                None => return Err(Error::type_conversion(raw, "number")),
            },
        },
        Json::String(value) => Value::String(value.clone()),
        _ => return Err(Error::invalid_query("objects are not valid comparison values")),
    })
}

fn parse_numeric(raw: &Json, ty: FieldType) -> Result<Value> {
    let integer = matches!(ty, FieldType::Integer | FieldType::BigInteger);

    match raw {
        Json::Number(value) if integer => value
            .as_i64()
            .map(Value::I64)
            .ok_or_else(|| Error::type_conversion(raw, "integer")),
        Json::Number(value) => value
            .as_f64()
            .map(Value::F64)
            .ok_or_else(|| Error::type_conversion(raw, "float")),
        Json::String(value) if integer => value
            .parse()
            .map(Value::I64)
            .map_err(|_| Error::type_conversion(raw, "integer")),
        Json::String(value) => value
            .parse()
            .map(Value::F64)
            .map_err(|_| Error::type_conversion(raw, "float")),
        _ => Err(Error::type_conversion(raw, "number")),
    }
}

fn parse_temporal(raw: &Json, ty: FieldType) -> Result<Value> {
    let Json::String(text) = raw else {
        return Err(Error::type_conversion(raw, "date/time"));
    };

    match ty {
        FieldType::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| Error::type_conversion(raw, "date")),
        FieldType::Time => NaiveTime::parse_from_str(text, "%H:%M:%S")
            .map(Value::Time)
            .map_err(|_| Error::type_conversion(raw, "time")),
        FieldType::DateTime => parse_date_time(text)
            .map(Value::DateTime)
            .ok_or_else(|| Error::type_conversion(raw, "datetime")),
        FieldType::Timestamp => DateTime::parse_from_rfc3339(text)
            .map(|value| Value::Timestamp(value.with_timezone(&Utc)))
            .map_err(|_| Error::type_conversion(raw, "timestamp")),
        _ => Err(Error::type_conversion(raw, "date/time")),
    }
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    if let Ok(value) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(value);
    }

    if let Ok(value) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(value);
    }

    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|value| value.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structural_mapping_without_type_info() {
        assert_eq!(coerce(&json!(null), None).unwrap(), Value::Null);
        assert_eq!(coerce(&json!(true), None).unwrap(), Value::Bool(true));
        assert_eq!(coerce(&json!(3), None).unwrap(), Value::I64(3));
        assert_eq!(coerce(&json!(2.5), None).unwrap(), Value::F64(2.5));
        assert_eq!(coerce(&json!("a"), None).unwrap(), Value::from("a"));
    }

    #[test]
    fn arrays_coerce_element_wise_and_drop_nulls() {
        let value = coerce(&json!(["1", null, "2"]), Some(FieldType::Integer)).unwrap();
        assert_eq!(value, Value::List(vec![Value::I64(1), Value::I64(2)]));
    }

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(
            coerce(&json!("42"), Some(FieldType::BigInteger)).unwrap(),
            Value::I64(42)
        );
        assert_eq!(
            coerce(&json!("2.5"), Some(FieldType::Float)).unwrap(),
            Value::F64(2.5)
        );
    }

    #[test]
    fn uncoercible_numeric_fails() {
        let err = coerce(&json!("not a number"), Some(FieldType::Integer)).unwrap_err();
        assert!(err.is_invalid_query());
    }

    #[test]
    fn dates_parse() {
        let value = coerce(&json!("2023-01-15"), Some(FieldType::Date)).unwrap();
        assert_eq!(
            value,
            Value::Date(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
    }

    #[test]
    fn date_times_parse_with_and_without_zone() {
        assert!(matches!(
            coerce(&json!("2023-01-15T10:30:00"), Some(FieldType::DateTime)).unwrap(),
            Value::DateTime(_)
        ));
        assert!(matches!(
            coerce(&json!("2023-01-15T10:30:00Z"), Some(FieldType::DateTime)).unwrap(),
            Value::DateTime(_)
        ));
        assert!(matches!(
            coerce(&json!("2023-01-15T10:30:00+02:00"), Some(FieldType::Timestamp)).unwrap(),
            Value::Timestamp(_)
        ));
    }

    #[test]
    fn null_bypasses_type_coercion() {
        assert_eq!(
            coerce(&json!(null), Some(FieldType::Date)).unwrap(),
            Value::Null
        );
    }
}
