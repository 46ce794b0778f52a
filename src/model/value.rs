use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A displayable cell value.
///
/// Every value has a string form (its [`Display`](fmt::Display) output) which
/// is what the filter matches against and what the grid shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Number(f64),
    /// Host element identifier.
    Id(u64),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Interpret raw text, promoting it to a number only when the number
    /// prints back as exactly the same text (so `"007"` stays text).
    #[must_use]
    pub fn parse_text(s: &str) -> Self {
        if s.is_empty() {
            return FieldValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            if i.to_string() == s {
                return FieldValue::Integer(i);
            }
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() && f.to_string() == s {
                return FieldValue::Number(f);
            }
        }
        FieldValue::Text(s.to_string())
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Number(f) => Some(*f),
            FieldValue::Id(id) => Some(*id as f64),
            _ => None,
        }
    }

    /// Sort rank of the value's kind: nulls, then numbers, then text.
    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Integer(_) | FieldValue::Number(_) | FieldValue::Id(_) => 1,
            FieldValue::Text(_) | FieldValue::Bool(_) => 2,
        }
    }

    /// Ascending sort order: missing/null first, then numbers numerically,
    /// then everything else by case-insensitive text. Total, so it is safe
    /// for mixed columns.
    #[must_use]
    pub fn sort_cmp(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        let a = a.unwrap_or(&FieldValue::Null);
        let b = b.unwrap_or(&FieldValue::Null);
        a.kind_rank()
            .cmp(&b.kind_rank())
            .then_with(|| match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a
                    .to_string()
                    .to_lowercase()
                    .cmp(&b.to_string().to_lowercase()),
            })
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Id(id) => write!(f, "{id}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => Ok(()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Id(id) => serializer.serialize_u64(*id),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Null => serializer.serialize_none(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl From<&serde_json::Value> for FieldValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::Id(u)
                } else {
                    n.as_f64().map_or(FieldValue::Null, FieldValue::Number)
                }
            }
            Value::String(s) => FieldValue::Text(s.clone()),
            // Nested structures are shown compactly, as they would print
            Value::Array(_) | Value::Object(_) => FieldValue::Text(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_text_promotes_only_canonical_numbers() {
        assert_eq!(FieldValue::parse_text("42"), FieldValue::Integer(42));
        assert_eq!(FieldValue::parse_text("-3.5"), FieldValue::Number(-3.5));
        assert_eq!(FieldValue::parse_text("007"), FieldValue::Text("007".into()));
        assert_eq!(FieldValue::parse_text("1.50"), FieldValue::Text("1.50".into()));
        assert_eq!(FieldValue::parse_text("NaN"), FieldValue::Text("NaN".into()));
        assert_eq!(FieldValue::parse_text(""), FieldValue::Null);
    }

    #[test]
    fn display_uses_default_formatting() {
        assert_eq!(FieldValue::Number(2.0).to_string(), "2");
        assert_eq!(FieldValue::Id(311_204).to_string(), "311204");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
        assert_eq!(FieldValue::Null.to_string(), "");
    }

    #[test]
    fn sort_cmp_orders_numbers_numerically_and_nulls_first() {
        let nine = FieldValue::Integer(9);
        let ten = FieldValue::Number(10.0);
        assert_eq!(FieldValue::sort_cmp(Some(&nine), Some(&ten)), Ordering::Less);

        let a = FieldValue::from("alpha");
        let b = FieldValue::from("Beta");
        assert_eq!(FieldValue::sort_cmp(Some(&a), Some(&b)), Ordering::Less);

        assert_eq!(FieldValue::sort_cmp(None, Some(&a)), Ordering::Less);
        assert_eq!(
            FieldValue::sort_cmp(Some(&FieldValue::Null), None),
            Ordering::Equal
        );
    }

    #[test]
    fn sort_cmp_puts_numbers_before_text_regardless_of_digits() {
        let nine = FieldValue::Integer(9);
        let ten = FieldValue::Integer(10);
        let five_x = FieldValue::from("5x");
        assert_eq!(FieldValue::sort_cmp(Some(&nine), Some(&ten)), Ordering::Less);
        assert_eq!(FieldValue::sort_cmp(Some(&ten), Some(&five_x)), Ordering::Less);
        assert_eq!(FieldValue::sort_cmp(Some(&nine), Some(&five_x)), Ordering::Less);
        assert_eq!(FieldValue::sort_cmp(Some(&five_x), Some(&nine)), Ordering::Greater);
        assert_eq!(
            FieldValue::sort_cmp(Some(&FieldValue::Bool(true)), Some(&FieldValue::Id(1))),
            Ordering::Greater
        );
    }

    #[test]
    fn json_values_convert() {
        let v: serde_json::Value = serde_json::json!({"a": [1, 2]});
        assert_eq!(FieldValue::from(&v["a"]), FieldValue::Text("[1,2]".into()));
        assert_eq!(
            FieldValue::from(&serde_json::json!(u64::MAX)),
            FieldValue::Id(u64::MAX)
        );
        assert_eq!(FieldValue::from(&serde_json::json!(1.25)), FieldValue::Number(1.25));
    }
}
