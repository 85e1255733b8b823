use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Normalized result of a successful validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub orders: Vec<OrderInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInput {
    pub title: String,
    #[serde(serialize_with = "serialize_total")]
    pub total: f64,
}

/// Raw form input, every value still text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub orders: Vec<OrderDraft>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDraft {
    pub title: String,
    #[serde(deserialize_with = "deserialize_total_text")]
    pub total: String,
}

pub const DEFAULT_ORDER_TOTAL: &str = "1";

impl OrderDraft {
    pub fn new(title: impl Into<String>, total: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            total: total.into(),
        }
    }

    /// Values a freshly added order row starts with.
    pub fn blank_row() -> Self {
        Self::new("", DEFAULT_ORDER_TOTAL)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TotalText {
    Int(i64),
    Float(f64),
    Text(String),
}

fn deserialize_total_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TotalText::deserialize(deserializer)? {
        TotalText::Int(value) => value.to_string(),
        TotalText::Float(value) => value.to_string(),
        TotalText::Text(value) => value,
    })
}

fn serialize_total<S>(total: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if total.fract() == 0.0 && total.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*total as i64)
    } else {
        serializer.serialize_f64(*total)
    }
}
