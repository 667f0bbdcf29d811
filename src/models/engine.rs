//! Recommendation engine payloads
//!
//! The engine answers with ranked rows of mixed fields:
//! `[food name, subset label, candidate, candidate, candidate, score, score, ...]`.
//! Rows are kept raw on the wire and parsed into [`EngineRow`] only when used.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RECOMMENDATION_COUNT;

/// Minimum number of fields a row needs to carry three candidates
pub const MIN_ROW_FIELDS: usize = 2 + RECOMMENDATION_COUNT;

/// Raw engine response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineResponse {
    #[serde(default)]
    pub best_recommendation: Vec<Vec<Value>>,
}

impl EngineResponse {
    /// Top-ranked raw row, if any
    pub fn best_row(&self) -> Option<&[Value]> {
        self.best_recommendation.first().map(Vec::as_slice)
    }
}

/// A parsed engine row
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRow {
    pub food_name: String,
    pub subset_label: String,
    pub candidates: [String; RECOMMENDATION_COUNT],
    pub scores: Vec<f64>,
}

/// Why a raw row could not be parsed
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RowShapeError {
    #[error("row has {0} fields, expected at least {}", MIN_ROW_FIELDS)]
    TooShort(usize),

    #[error("field {0} is not a string")]
    NotAString(usize),

    #[error("field {0} is not a number")]
    NotANumber(usize),
}

fn string_at(fields: &[Value], index: usize) -> Result<String, RowShapeError> {
    fields[index]
        .as_str()
        .map(String::from)
        .ok_or(RowShapeError::NotAString(index))
}

impl TryFrom<&[Value]> for EngineRow {
    type Error = RowShapeError;

    fn try_from(fields: &[Value]) -> Result<Self, Self::Error> {
        if fields.len() < MIN_ROW_FIELDS {
            return Err(RowShapeError::TooShort(fields.len()));
        }

        let candidates = [
            string_at(fields, 2)?,
            string_at(fields, 3)?,
            string_at(fields, 4)?,
        ];

        let scores = fields[MIN_ROW_FIELDS..]
            .iter()
            .enumerate()
            .map(|(offset, v)| {
                v.as_f64()
                    .ok_or(RowShapeError::NotANumber(MIN_ROW_FIELDS + offset))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            food_name: string_at(fields, 0)?,
            subset_label: string_at(fields, 1)?,
            candidates,
            scores,
        })
    }
}
