use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

// Wire fields are read leniently: `null` or a value of the wrong type reads
// as the field's default instead of failing the whole record.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireVerse {
    #[serde(deserialize_with = "lenient")]
    reference: Option<String>,
    #[serde(deserialize_with = "lenient")]
    character_count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireAnchor {
    offset: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireSubClause {
    #[serde(deserialize_with = "lenient")]
    clause_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    label: Option<String>,
    #[serde(deserialize_with = "lenient")]
    role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireAnalysis {
    #[serde(deserialize_with = "lenient")]
    group_only: Option<bool>,
    #[serde(deserialize_with = "lenient_list")]
    sub_clauses: Vec<WireSubClause>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireSource {
    #[serde(deserialize_with = "lenient")]
    method: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    reviewed_by: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireClause {
    #[serde(deserialize_with = "lenient")]
    clause_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    function: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    references: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    start: Option<WireAnchor>,
    #[serde(deserialize_with = "lenient")]
    end: Option<WireAnchor>,
    #[serde(deserialize_with = "lenient_list")]
    category_tags: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    parent_clause_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    analysis: Option<WireAnalysis>,
    #[serde(deserialize_with = "lenient")]
    source: Option<WireSource>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A list keeping only the items that parse; anything but an array is empty
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubClause {
    pub clause_id: String,
    pub label: Option<String>,
    pub role: Option<String>,
}

/// One clause from the clause document, with wire defaults applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseRecord {
    pub clause_id: String,
    pub function: Option<String>,
    pub references: Vec<String>,
    pub start_offset: usize,
    pub end_offset: usize,
    pub category_tags: Vec<String>,
    pub parent_clause_id: Option<String>,
    pub group_only: bool,
    pub sub_clauses: Vec<SubClause>,
    pub source_method: Option<String>,
    pub reviewed_by: Vec<String>,
}

/// A parsed clause document.
///
/// Malformed documents (not an object, no `clauses` array) parse to an empty
/// payload. Individual clauses that fail to parse or lack an id are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClausePayload {
    pub character_counts: HashMap<String, usize>,
    pub clauses: Vec<ClauseRecord>,
}

impl ClausePayload {
    pub fn from_value(value: &Value) -> Self {
        let Some(items) = value.get("clauses").and_then(Value::as_array) else {
            log::warn!("Clause payload has no clauses array; overlay disabled");
            return Self::default();
        };

        let character_counts = value
            .get("verses")
            .and_then(Value::as_array)
            .map(|verses| {
                verses
                    .iter()
                    .filter_map(|verse| serde_json::from_value::<WireVerse>(verse.clone()).ok())
                    .filter_map(|verse| Some((verse.reference?, verse.character_count?)))
                    .collect()
            })
            .unwrap_or_default();

        let clauses = items
            .iter()
            .filter_map(|item| match serde_json::from_value::<WireClause>(item.clone()) {
                Ok(clause) => ClauseRecord::from_wire(clause),
                Err(e) => {
                    log::warn!("Skipping malformed clause: {e}");
                    None
                }
            })
            .collect();

        Self {
            character_counts,
            clauses,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl ClauseRecord {
    fn from_wire(wire: WireClause) -> Option<Self> {
        let clause_id = wire.clause_id.filter(|id| !id.trim().is_empty())?;
        let analysis = wire.analysis.unwrap_or_default();
        let source = wire.source.unwrap_or_default();

        Some(Self {
            clause_id,
            function: wire.function.filter(|text| !text.trim().is_empty()),
            references: wire.references,
            start_offset: anchor_offset(wire.start.as_ref()),
            end_offset: anchor_offset(wire.end.as_ref()),
            category_tags: wire.category_tags,
            parent_clause_id: wire.parent_clause_id.filter(|id| !id.trim().is_empty()),
            group_only: analysis.group_only.unwrap_or(false),
            sub_clauses: analysis
                .sub_clauses
                .into_iter()
                .filter_map(|sub| {
                    Some(SubClause {
                        clause_id: sub.clause_id.filter(|id| !id.trim().is_empty())?,
                        label: sub.label,
                        role: sub.role,
                    })
                })
                .collect(),
            source_method: source.method,
            reviewed_by: source.reviewed_by,
        })
    }
}

/// Offsets that are missing, negative or not integers read as 0
fn anchor_offset(anchor: Option<&WireAnchor>) -> usize {
    anchor
        .and_then(|anchor| anchor.offset.as_ref())
        .and_then(Value::as_u64)
        .and_then(|offset| usize::try_from(offset).ok())
        .unwrap_or(0)
}
