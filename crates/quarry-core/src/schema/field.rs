use serde::Deserialize;

/// A scalar column on a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    /// The field name
    pub name: String,

    /// The field's declared type
    #[serde(rename = "type")]
    pub ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    String,
    Text,
    Integer,
    BigInteger,
    Float,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Time,
    Timestamp,
    Uuid,
    Json,
}

impl FieldType {
    /// True for types compared as free text
    pub fn is_text(self) -> bool {
        matches!(self, Self::String | Self::Text)
    }

    /// True for types whose comparison values coerce to numbers
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::BigInteger | Self::Float | Self::Decimal
        )
    }

    /// True for types whose comparison values are parsed by the date helper
    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            Self::Date | Self::DateTime | Self::Time | Self::Timestamp
        )
    }
}
