//! Saved version records
//!
//! A [`VersionRecord`] is the JSON document stored for each saved version of
//! a sketch:
//!
//! ```json
//! {
//!   "code": "circle(0,0,50);",
//!   "params": {
//!     "definitions": [{ "id": "…", "from": 11, "to": 13, "value": "50" }],
//!     "ranges": { "…": { "start": "25.00", "end": "100.00", "count": "4", "type": "Float" } }
//!   },
//!   "cellSize": 200
//! }
//! ```
//!
//! Older records have no definition ids and key their ranges by position
//! (`"11-13"`); both shapes are read, only the id-keyed one is written.
//! Fields this module does not know about are kept as they are.

use indexmap::IndexMap;
use multiples_params::{ParamId, ParamState, Parameter, RangeConfig, RangeMap};
use multiples_text::{is_standalone_at, TextSpan};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Cell size assumed for records that do not store one
pub const DEFAULT_CELL_SIZE: u32 = 200;

/// A stored parameter definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionRecord {
    /// Parameter id; absent in older records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ParamId>,
    /// Start offset in the record's code
    pub from: usize,
    /// End offset in the record's code
    pub to: usize,
    /// Literal text when saved
    pub value: String,
}

impl DefinitionRecord {
    /// Position key used by older records
    #[inline]
    #[must_use]
    pub fn position_key(&self) -> String {
        TextSpan::new(self.from, self.to).position_key()
    }
}

impl From<&Parameter> for DefinitionRecord {
    fn from(param: &Parameter) -> Self {
        Self {
            id: Some(param.id()),
            from: param.from(),
            to: param.to(),
            value: param.value().to_string(),
        }
    }
}

/// Stored parameter set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamsRecord {
    /// Definitions in marking order
    #[serde(default)]
    pub definitions: Vec<DefinitionRecord>,
    /// Ranges keyed by parameter id (or position in older records)
    #[serde(default)]
    pub ranges: IndexMap<String, RangeConfig>,
}

impl ParamsRecord {
    fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.ranges.is_empty()
    }
}

/// One saved version of a sketch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    /// Full sketch source
    pub code: String,
    /// Swept parameters, if any were saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ParamsRecord>,
    /// Preview cell size in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<u32>,
    /// Other stored fields (id, name, timestamps), passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VersionRecord {
    /// Record of bare code
    #[inline]
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Record of `code` with the parameters of `state`
    #[must_use]
    pub fn capture(code: impl Into<String>, state: &ParamState, cell_size: u32) -> Self {
        let definitions = state.params().iter().map(DefinitionRecord::from).collect();
        let ranges = state
            .params()
            .iter()
            .filter_map(|p| Some((p.id().to_string(), state.range_for(p.id())?.clone())))
            .collect();
        Self {
            code: code.into(),
            params: Some(ParamsRecord {
                definitions,
                ranges,
            }),
            cell_size: Some(cell_size),
            extra: Map::new(),
        }
    }

    /// Parse a record from JSON
    ///
    /// # Errors
    /// Returns error if `json` is not a record
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize as pretty JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Stored cell size, or the default
    #[inline]
    #[must_use]
    pub fn cell_size_or_default(&self) -> u32 {
        self.cell_size.unwrap_or(DEFAULT_CELL_SIZE)
    }

    /// Rebuild the parameter state against this record's code
    ///
    /// Definitions that no longer point at a standalone literal are skipped,
    /// stale stored values are replaced by the text, missing ids are
    /// generated and missing ranges are seeded with defaults.
    #[must_use]
    pub fn hydrate(&self, default_count: usize) -> ParamState {
        let Some(record) = &self.params else {
            return ParamState::new();
        };

        let mut params = Vec::with_capacity(record.definitions.len());
        let mut ranges = RangeMap::new();
        let mut seen = HashSet::new();
        for def in &record.definitions {
            let span = TextSpan::new(def.from, def.to);
            let Some(text) = span.slice(&self.code).filter(|_| is_standalone_at(&self.code, span))
            else {
                tracing::warn!(%span, value = %def.value, "skipping stale parameter definition");
                continue;
            };
            if text != def.value {
                tracing::debug!(%span, stored = %def.value, text, "stored value differs from code");
            }

            // Ids must stay unique; a repeated one is replaced by a fresh id.
            let id = def.id.filter(|id| seen.insert(*id));
            if id.is_none() && def.id.is_some() {
                tracing::warn!(%span, "replacing duplicate parameter id");
            }
            let param = Parameter::new(span, text).with_id(id.unwrap_or_default());
            let range = id
                .and_then(|id| record.ranges.get(&id.to_string()))
                .or_else(|| record.ranges.get(&def.position_key()));
            if let Some(range) = range {
                ranges.insert(param.id(), range.clone());
            }
            params.push(param);
        }

        ParamState::from_parts(params, ranges, default_count)
    }

    /// Check if two records sweep the same parameters the same way
    ///
    /// Definition order does not matter; a missing parameter set equals an
    /// empty one.
    #[must_use]
    pub fn params_equal(&self, other: &Self) -> bool {
        let empty = ParamsRecord::default();
        let a = self.params.as_ref().unwrap_or(&empty);
        let b = other.params.as_ref().unwrap_or(&empty);
        if a.is_empty() || b.is_empty() {
            return a.is_empty() == b.is_empty();
        }

        let sorted = |defs: &[DefinitionRecord]| {
            let mut defs = defs.to_vec();
            defs.sort_by_key(|d| (d.from, d.to));
            defs
        };
        // IndexMap equality ignores insertion order.
        sorted(&a.definitions) == sorted(&b.definitions) && a.ranges == b.ranges
    }

    /// Check if saving `current` over this record would change anything
    #[must_use]
    pub fn needs_save(&self, current: &Self) -> bool {
        self.code != current.code
            || !self.params_equal(current)
            || self.cell_size_or_default() != current.cell_size_or_default()
    }
}
