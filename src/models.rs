use serde::{Deserialize, Deserializer, Serialize, de};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "number_or_string")]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub average_rating: f64,
    #[serde(default, alias = "imageUrl")]
    pub image_path: String,
}

/// A review as exchanged with the API. `id == 0` marks a draft the server has
/// not persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub product_id: i64,
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub date: String,
}

impl Review {
    pub fn is_draft(&self) -> bool {
        self.id == 0
    }
}

pub type Category = String;

// Decimal columns are often serialized as strings ("4.50").
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) if s.trim().is_empty() => Ok(0.0),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(de::Error::custom),
        Raw::Null => Ok(0.0),
    }
}
