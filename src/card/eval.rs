//! Evaluation results and their `model-index` encoding.
//!
//! The Hub stores evaluation results as a nested `model-index` list:
//!
//! ```text
//! - name: <model_name>
//!   results:
//!     - task: {type: <task_type>}
//!       dataset: {type: <dataset_type>, name: <dataset_name>}
//!       metrics:
//!         - {type: <metric_type>, value: <metric_value>}
//! ```
//!
//! In memory they are a flat list of [`EvalResult`], one per metric.

use serde_yaml::{Mapping, Number, Value};

use super::scalar_to_string;
use crate::error::Result;
use crate::error::card::invalid_model_index;

/// One evaluation measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    pub task_type: String,
    pub dataset_type: String,
    pub dataset_name: String,
    pub metric_type: String,
    pub metric_value: Number,
    /// Name of the `model-index` entry this result was decoded from.
    pub model_name: Option<String>,
    pub task_name: Option<String>,
    pub dataset_config: Option<String>,
    pub dataset_split: Option<String>,
    pub dataset_revision: Option<String>,
    pub metric_name: Option<String>,
    pub metric_config: Option<String>,
    pub verified: Option<bool>,
}

impl EvalResult {
    /// Create a result with the required fields set.
    pub fn new(
        task_type: impl Into<String>,
        dataset_type: impl Into<String>,
        dataset_name: impl Into<String>,
        metric_type: impl Into<String>,
        metric_value: impl Into<Number>,
    ) -> Self {
        Self {
            task_type: task_type.into(),
            dataset_type: dataset_type.into(),
            dataset_name: dataset_name.into(),
            metric_type: metric_type.into(),
            metric_value: metric_value.into(),
            model_name: None,
            task_name: None,
            dataset_config: None,
            dataset_split: None,
            dataset_revision: None,
            metric_name: None,
            metric_config: None,
            verified: None,
        }
    }

    #[must_use]
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    #[must_use]
    pub fn with_task_name(mut self, task_name: impl Into<String>) -> Self {
        self.task_name = Some(task_name.into());
        self
    }

    #[must_use]
    pub fn with_dataset_config(mut self, config: impl Into<String>) -> Self {
        self.dataset_config = Some(config.into());
        self
    }

    #[must_use]
    pub fn with_dataset_split(mut self, split: impl Into<String>) -> Self {
        self.dataset_split = Some(split.into());
        self
    }

    #[must_use]
    pub fn with_dataset_revision(mut self, revision: impl Into<String>) -> Self {
        self.dataset_revision = Some(revision.into());
        self
    }

    #[must_use]
    pub fn with_metric_name(mut self, metric_name: impl Into<String>) -> Self {
        self.metric_name = Some(metric_name.into());
        self
    }

    #[must_use]
    pub fn with_metric_config(mut self, metric_config: impl Into<String>) -> Self {
        self.metric_config = Some(metric_config.into());
        self
    }

    #[must_use]
    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    /// Fields that place two results under the same `results` entry.
    fn group_key(&self) -> GroupKey<'_> {
        (
            &self.task_type,
            self.task_name.as_deref(),
            &self.dataset_type,
            &self.dataset_name,
            self.dataset_config.as_deref(),
            self.dataset_split.as_deref(),
            self.dataset_revision.as_deref(),
        )
    }
}

type GroupKey<'a> = (
    &'a str,
    Option<&'a str>,
    &'a str,
    &'a str,
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
);

fn key(name: &str) -> Value {
    Value::String(name.to_string())
}

fn as_mapping<'a>(value: &'a Value, what: &str) -> Result<&'a Mapping> {
    value
        .as_mapping()
        .ok_or_else(|| invalid_model_index(format!("{what} should be a mapping")))
}

fn as_sequence<'a>(value: &'a Value, what: &str) -> Result<&'a [Value]> {
    value
        .as_sequence()
        .map(Vec::as_slice)
        .ok_or_else(|| invalid_model_index(format!("{what} should be a list")))
}

fn required<'a>(mapping: &'a Mapping, field: &str, what: &str) -> Result<&'a Value> {
    mapping
        .get(key(field))
        .ok_or_else(|| invalid_model_index(format!("{what} is missing `{field}`")))
}

fn required_str(mapping: &Mapping, field: &str, what: &str) -> Result<String> {
    let value = required(mapping, field, what)?;
    scalar_to_string(value)
        .ok_or_else(|| invalid_model_index(format!("`{what}.{field}` should be a string")))
}

fn optional_str(mapping: &Mapping, field: &str) -> Option<String> {
    mapping.get(key(field)).and_then(scalar_to_string)
}

/// Flatten a `model-index` list into one [`EvalResult`] per metric.
///
/// Returns the name of the first entry together with the results of all entries.
/// Fails on the first missing or mistyped key.
pub fn decode(model_index: &Value) -> Result<(String, Vec<EvalResult>)> {
    let entries = as_sequence(model_index, "model-index")?;
    let mut model_name = None;
    let mut results = Vec::new();

    for entry in entries {
        let entry = as_mapping(entry, "model-index entry")?;
        let name = required_str(entry, "name", "model-index entry")?;

        for result in as_sequence(required(entry, "results", "model-index entry")?, "results")? {
            let result = as_mapping(result, "result")?;
            let task = as_mapping(required(result, "task", "result")?, "task")?;
            let dataset = as_mapping(required(result, "dataset", "result")?, "dataset")?;
            let task_type = required_str(task, "type", "task")?;
            let dataset_type = required_str(dataset, "type", "dataset")?;
            let dataset_name = required_str(dataset, "name", "dataset")?;

            for metric in as_sequence(required(result, "metrics", "result")?, "metrics")? {
                let metric = as_mapping(metric, "metric")?;
                let metric_type = required_str(metric, "type", "metric")?;
                let metric_value = match required(metric, "value", "metric")? {
                    Value::Number(n) => n.clone(),
                    _ => return Err(invalid_model_index("`metric.value` should be a number")),
                };

                results.push(EvalResult {
                    task_type: task_type.clone(),
                    dataset_type: dataset_type.clone(),
                    dataset_name: dataset_name.clone(),
                    metric_type,
                    metric_value,
                    model_name: Some(name.clone()),
                    task_name: optional_str(task, "name"),
                    dataset_config: optional_str(dataset, "config"),
                    dataset_split: optional_str(dataset, "split"),
                    dataset_revision: optional_str(dataset, "revision"),
                    metric_name: optional_str(metric, "name"),
                    metric_config: optional_str(metric, "config"),
                    verified: metric.get(key("verified")).and_then(Value::as_bool),
                });
            }
        }

        model_name.get_or_insert(name);
    }

    let model_name =
        model_name.ok_or_else(|| invalid_model_index("model-index should not be empty"))?;
    Ok((model_name, results))
}

fn insert_optional(mapping: &mut Mapping, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        mapping.insert(key(field), key(value));
    }
}

fn metric_entry(result: &EvalResult) -> Value {
    let mut metric = Mapping::new();
    metric.insert(key("type"), key(&result.metric_type));
    metric.insert(key("value"), Value::Number(result.metric_value.clone()));
    insert_optional(&mut metric, "name", result.metric_name.as_deref());
    insert_optional(&mut metric, "config", result.metric_config.as_deref());
    if let Some(verified) = result.verified {
        metric.insert(key("verified"), Value::Bool(verified));
    }
    Value::Mapping(metric)
}

fn result_entry(first: &EvalResult, metrics: Vec<Value>) -> Value {
    let mut task = Mapping::new();
    task.insert(key("type"), key(&first.task_type));
    insert_optional(&mut task, "name", first.task_name.as_deref());

    let mut dataset = Mapping::new();
    dataset.insert(key("type"), key(&first.dataset_type));
    dataset.insert(key("name"), key(&first.dataset_name));
    insert_optional(&mut dataset, "config", first.dataset_config.as_deref());
    insert_optional(&mut dataset, "split", first.dataset_split.as_deref());
    insert_optional(&mut dataset, "revision", first.dataset_revision.as_deref());

    let mut result = Mapping::new();
    result.insert(key("task"), Value::Mapping(task));
    result.insert(key("dataset"), Value::Mapping(dataset));
    result.insert(key("metrics"), Value::Sequence(metrics));
    Value::Mapping(result)
}

/// Build a single-entry `model-index` list named `model_name`.
///
/// Results sharing task and dataset are merged under one `results` entry, in order of
/// first appearance; metrics keep their relative order within a group.
pub fn encode(model_name: &str, eval_results: &[EvalResult]) -> Value {
    let mut groups: Vec<(GroupKey<'_>, &EvalResult, Vec<Value>)> = Vec::new();

    for result in eval_results {
        let group_key = result.group_key();
        match groups.iter_mut().find(|(k, _, _)| *k == group_key) {
            Some((_, _, metrics)) => metrics.push(metric_entry(result)),
            None => groups.push((group_key, result, vec![metric_entry(result)])),
        }
    }

    let results = groups
        .into_iter()
        .map(|(_, first, metrics)| result_entry(first, metrics))
        .collect();

    let mut entry = Mapping::new();
    entry.insert(key("name"), key(model_name));
    entry.insert(key("results"), Value::Sequence(results));
    Value::Sequence(vec![Value::Mapping(entry)])
}
