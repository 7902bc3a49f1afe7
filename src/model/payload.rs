use std::borrow::Cow;

use serde_json::{Map, Value};

const DATA_KEY: &str = "data";
const PREDICTIONS_KEY: &str = "predictions";
const SCORE_KEY: &str = "score";
const LABEL_NAME_KEY: &str = "labelName";

/// Borrowed, schema-less view over an inference service response.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    root: &'a Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionEntry<'a> {
    pub id: Cow<'a, str>,
    pub prediction: Prediction<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Prediction<'a> {
    pub score: Option<f64>,
    pub fields: Option<&'a Map<String, Value>>,
}

impl<'a> Payload<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    fn predictions_value(&self) -> Option<&'a Value> {
        self.root.get(DATA_KEY)?.get(PREDICTIONS_KEY)
    }

    /// Entries of `data.predictions`; anything that is neither an object nor
    /// an array yields nothing.
    pub fn predictions(&self) -> Box<dyn Iterator<Item = PredictionEntry<'a>> + 'a> {
        match self.predictions_value() {
            Some(Value::Object(map)) => Box::new(map.iter().map(|(id, record)| PredictionEntry {
                id: Cow::Borrowed(id.as_str()),
                prediction: Prediction::from_record(record),
            })),
            Some(Value::Array(items)) => {
                Box::new(items.iter().enumerate().map(|(idx, record)| PredictionEntry {
                    id: Cow::Owned(idx.to_string()),
                    prediction: Prediction::from_record(record),
                }))
            }
            _ => Box::new(std::iter::empty()),
        }
    }
}

impl<'a> Prediction<'a> {
    pub fn from_record(record: &'a Value) -> Self {
        match record {
            Value::Object(fields) => Self {
                score: fields.get(SCORE_KEY).and_then(Value::as_f64),
                fields: Some(fields),
            },
            _ => Self::default(),
        }
    }

    pub fn label_name(&self) -> Option<&'a str> {
        self.fields?.get(LABEL_NAME_KEY)?.as_str()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/payload.rs"]
mod tests;
