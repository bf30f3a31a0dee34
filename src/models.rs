use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Property name used when a record arrives without a `source`.
pub const UNKNOWN_SOURCE: &str = "Неизвестный объект";
/// Unit-type label used when a record arrives without one.
pub const UNKNOWN_UNIT_TYPE: &str = "Неизвестный тип";

/// How the rollup is keyed at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// Property first, unit-types as rows.
    #[default]
    Property,
    /// Unit-type first, properties as rows.
    Type,
}

/// One pre-aggregated row for a single (property, unit-type) bucket.
///
/// Statistic fields are `None` when the upstream value was missing, null,
/// non-finite or exactly zero: in this domain a zero price or area means "unknown".
/// The JSON keys of the upload service (Cyrillic) are accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupRecord {
    #[serde(default, deserialize_with = "de_text")]
    pub source: String,
    #[serde(default, deserialize_with = "de_flag")]
    pub is_main: bool,
    #[serde(default, alias = "тип_площади", deserialize_with = "de_text")]
    pub unit_type: String,
    #[serde(default, alias = "количество", deserialize_with = "de_count")]
    pub count: u64,
    #[serde(default, alias = "общая_площадь", deserialize_with = "de_amount")]
    pub total_area: f64,

    #[serde(default, alias = "мин_стоимость", deserialize_with = "de_measure")]
    pub min_cost: Option<f64>,
    #[serde(default, alias = "сред_стоимость", deserialize_with = "de_measure")]
    pub avg_cost: Option<f64>,
    #[serde(default, alias = "макс_стоимость", deserialize_with = "de_measure")]
    pub max_cost: Option<f64>,

    #[serde(default, alias = "мин_площадь", deserialize_with = "de_measure")]
    pub min_area: Option<f64>,
    #[serde(default, alias = "сред_площадь", deserialize_with = "de_measure")]
    pub avg_area: Option<f64>,
    #[serde(default, alias = "макс_площадь", deserialize_with = "de_measure")]
    pub max_area: Option<f64>,

    #[serde(default, alias = "мин_цена_за_м2", deserialize_with = "de_measure")]
    pub min_price_per_area: Option<f64>,
    #[serde(default, alias = "сред_цена_за_м2", deserialize_with = "de_measure")]
    pub avg_price_per_area: Option<f64>,
    #[serde(default, alias = "макс_цена_за_м2", deserialize_with = "de_measure")]
    pub max_price_per_area: Option<f64>,

    /// Raw per-unit costs backing this record.
    #[serde(default, deserialize_with = "de_series")]
    pub costs: Vec<f64>,
    /// Raw per-unit areas, parallel to `costs` when both are present.
    #[serde(default, deserialize_with = "de_series")]
    pub areas: Vec<f64>,
    /// Raw per-unit price-per-area values; an independent sequence.
    #[serde(default, alias = "price_per_sqm", deserialize_with = "de_series")]
    pub price_per_area: Vec<f64>,
}

impl GroupRecord {
    /// Property name with the placeholder applied to blank sources.
    pub fn source_name(&self) -> &str {
        if self.source.trim().is_empty() {
            UNKNOWN_SOURCE
        } else {
            &self.source
        }
    }

    /// Unit-type label with the placeholder applied to blank labels.
    pub fn unit_type_label(&self) -> &str {
        if self.unit_type.trim().is_empty() {
            UNKNOWN_UNIT_TYPE
        } else {
            &self.unit_type
        }
    }
}

/// Descriptive attributes of one property, joined with record statistics by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CharacteristicsRow {
    #[serde(rename = "Название ЖК", alias = "name", default, deserialize_with = "de_text")]
    pub name: String,
    #[serde(default, deserialize_with = "de_flag")]
    pub is_main: bool,
    #[serde(rename = "Застройщик", alias = "developer", default, deserialize_with = "de_text")]
    pub developer: String,
    #[serde(rename = "Район", alias = "district", default, deserialize_with = "de_text")]
    pub district: String,
    #[serde(rename = "Класс", alias = "class", default, deserialize_with = "de_text")]
    pub class: String,
    #[serde(rename = "Этажность", alias = "floors", default, deserialize_with = "de_text")]
    pub floors: String,
    #[serde(rename = "Срок сдачи", alias = "completion", default, deserialize_with = "de_text")]
    pub completion: String,
    #[serde(rename = "Тип дома", alias = "building_type", default, deserialize_with = "de_text")]
    pub building_type: String,
    #[serde(rename = "Отделка", alias = "finish", default, deserialize_with = "de_text")]
    pub finish: String,
}

impl CharacteristicsRow {
    /// (label, value) pairs in display order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("Застройщик", self.developer.as_str()),
            ("Район", self.district.as_str()),
            ("Класс", self.class.as_str()),
            ("Этажность", self.floors.as_str()),
            ("Срок сдачи", self.completion.as_str()),
            ("Тип дома", self.building_type.as_str()),
            ("Отделка", self.finish.as_str()),
        ]
    }
}

/// Response of the upload/parse service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
    /// Pre-rendered chart specs keyed by unit-type label; opaque to this crate.
    #[serde(default)]
    pub boxplot: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub characteristics: Option<Vec<CharacteristicsRow>>,
}

/// Shared visitor: parse an optional real from a JSON number, a numeric string or null.
///
/// Strings may use a decimal comma. Anything unparsable yields `None`.
struct NumberVisitor;

impl<'de> serde::de::Visitor<'de> for NumberVisitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "a number, a numeric string or null")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Some(v as f64))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Some(v as f64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Some(v))
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(s.trim().replace(',', ".").parse::<f64>().ok())
    }

    fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumberVisitor)
    }
}

fn de_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer
        .deserialize_any(NumberVisitor)?
        .filter(|v| v.is_finite()))
}

/// Serde helper: a min/avg/max statistic; zero and garbage become `None`.
fn de_measure<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_number(deserializer)?.filter(|v| *v != 0.0))
}

/// Serde helper: a plain amount where missing means 0.
fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_number(deserializer)?.unwrap_or(0.0))
}

/// Serde helper: a non-negative unit count from a number or string; negatives clamp to 0.
fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = de_number(deserializer)?.unwrap_or(0.0);
    Ok(if v > 0.0 { v.round() as u64 } else { 0 })
}

/// Serde helper: a raw value sequence; null entries and non-finite values are dropped.
fn de_series<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<f64>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect())
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Serde helper: free text that may arrive as a number or null.
fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string, a number or null")
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(TextVisitor)
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
