//! Card metadata (`CardData`): recognized fields plus arbitrary extras.
//!
//! Recognized fields are typed when their value allows it: list fields accept a
//! string or a list of strings and always store a list, scalar fields accept a
//! string. Any other value (numbers, mappings, nested lists) is kept verbatim
//! under the same key so documents round-trip unchanged. Unrecognized keys are
//! kept as-is in insertion order. Everything is reachable through
//! [`CardData::get`], [`CardData::set`] and [`CardData::remove`], and serializes
//! through [`CardData::to_dict`].

use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};

use super::diagnostics::{CardWarning, Diagnostics};
use super::eval::{self, EvalResult};
use super::kind::CardKind;
use crate::error::card::invalid_argument;
use crate::error::{CardError, Result};

/// Wire key holding the nested evaluation results.
pub const MODEL_INDEX_KEY: &str = "model-index";

/// Recognized fields in the order they are emitted when set outside of insertion tracking.
const RECOGNIZED_FIELDS: &[&str] = &[
    "language",
    "license",
    "library_name",
    "tags",
    "datasets",
    "metrics",
    "model_name",
];

/// Legacy spelling of `datasets`.
const LEGACY_DATASETS_KEY: &str = "dataset";

/// Values accepted by list fields: a single string or a list of strings.
pub trait IntoValues {
    fn into_values(self) -> Vec<String>;
}

impl IntoValues for &str {
    fn into_values(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoValues for String {
    fn into_values(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoValues for Vec<String> {
    fn into_values(self) -> Vec<String> {
        self
    }
}

impl IntoValues for Vec<&str> {
    fn into_values(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl IntoValues for &[&str] {
    fn into_values(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

impl<const N: usize> IntoValues for [&str; N] {
    fn into_values(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

/// Metadata of a repo card.
#[derive(Debug, Clone, Default)]
pub struct CardData {
    pub language: Option<Vec<String>>,
    pub license: Option<String>,
    pub library_name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub datasets: Option<Vec<String>>,
    pub metrics: Option<Vec<String>>,
    model_name: Option<String>,
    eval_results: Option<Vec<EvalResult>>,
    /// Unrecognized fields, plus recognized ones whose value has no typed form.
    extra: Mapping,
    order: Vec<String>,
    kind: CardKind,
}

fn list_value(values: &[String]) -> Value {
    Value::Sequence(values.iter().cloned().map(Value::String).collect())
}

/// A string or a list of strings as a list; `None` for any other shape.
fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Sequence(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

fn string_scalar(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

impl CardData {
    /// Empty model card data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty card data for `kind`.
    pub fn for_kind(kind: CardKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Start building model card data from explicit values.
    pub fn builder() -> CardDataBuilder {
        CardDataBuilder::new(CardKind::Model)
    }

    /// Start building card data of `kind` from explicit values.
    pub fn builder_for(kind: CardKind) -> CardDataBuilder {
        CardDataBuilder::new(kind)
    }

    /// Build card data from a metadata mapping parsed off a document.
    ///
    /// Never fails: a `model-index` that does not decode is dropped with a warning,
    /// null values are skipped and every other value is kept.
    pub fn from_mapping(kind: CardKind, mapping: Mapping, diagnostics: &mut Diagnostics) -> Self {
        let mut data = Self::for_kind(kind);
        let has_datasets = mapping.contains_key(Value::String("datasets".to_string()));

        for (key, value) in mapping {
            if value.is_null() {
                continue;
            }
            let key = match key {
                Value::String(s) => s,
                other => {
                    // Non-string keys are passed through and emitted after named fields.
                    data.extra.insert(other, value);
                    continue;
                }
            };

            if key == MODEL_INDEX_KEY {
                match eval::decode(&value) {
                    Ok((model_name, results)) => data.set_eval_results(model_name, results),
                    Err(err) => diagnostics.warn(CardWarning::InvalidModelIndex {
                        reason: err.to_string(),
                    }),
                }
            } else if key == LEGACY_DATASETS_KEY && !has_datasets {
                tracing::debug!("Reading legacy `dataset` key as `datasets`");
                data.insert_field("datasets", &value);
            } else {
                data.insert_field(&key, &value);
            }
        }

        data
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }

    pub fn eval_results(&self) -> Option<&[EvalResult]> {
        self.eval_results.as_deref()
    }

    /// Set the evaluation results together with the model they belong to.
    pub fn set_eval_results(&mut self, model_name: impl Into<String>, results: Vec<EvalResult>) {
        self.touch("model_name");
        self.extra.shift_remove("model_name");
        self.model_name = Some(model_name.into());
        self.eval_results = Some(results);
    }

    /// Fields without a typed slot, in insertion order.
    pub fn extra(&self) -> &Mapping {
        &self.extra
    }

    /// Read any field by its wire name.
    pub fn get(&self, key: &str) -> Option<Value> {
        if key == MODEL_INDEX_KEY {
            return self.model_index();
        }
        self.field_value(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Write any field by its wire name, normalizing recognized fields.
    ///
    /// Setting `null` removes the field. `model-index` is decoded and replaces the
    /// evaluation results; a value that does not decode is an error here.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match key {
            "eval_results" => Err(invalid_argument(
                "`eval_results` can only be set together with `model_name` (use set_eval_results)",
            )),
            "model_name" if value.is_null() && self.eval_results.is_some() => Err(
                invalid_argument("`model_name` cannot be removed while `eval_results` is set"),
            ),
            MODEL_INDEX_KEY if value.is_null() => {
                self.eval_results = None;
                Ok(())
            }
            MODEL_INDEX_KEY => {
                let (model_name, results) = eval::decode(&value)?;
                self.set_eval_results(model_name, results);
                Ok(())
            }
            _ if value.is_null() => {
                self.remove(key);
                Ok(())
            }
            _ => {
                self.insert_field(key, &value);
                Ok(())
            }
        }
    }

    /// Remove a field, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let previous = self.get(key);
        match key {
            "language" => self.language = None,
            "license" => self.license = None,
            "library_name" => self.library_name = None,
            "tags" => self.tags = None,
            "datasets" => self.datasets = None,
            "metrics" => self.metrics = None,
            MODEL_INDEX_KEY => self.eval_results = None,
            "model_name" => {
                self.model_name = None;
                self.eval_results = None;
            }
            _ => {}
        }
        self.extra.shift_remove(key);
        self.order.retain(|k| k != key);
        previous
    }

    /// Ordered mapping with unset fields omitted and evaluation results encoded
    /// as `model-index` (last).
    pub fn to_dict(&self) -> Mapping {
        let mut out = Mapping::new();

        let mut emit = |key: &str| {
            if let Some(value) = self.field_value(key) {
                out.insert(Value::String(key.to_string()), value);
            }
        };
        for key in &self.order {
            emit(key.as_str());
        }
        for key in RECOGNIZED_FIELDS {
            if !self.order.iter().any(|o| o == key) {
                emit(*key);
            }
        }

        for (key, value) in &self.extra {
            if !key.is_string() {
                out.insert(key.clone(), value.clone());
            }
        }

        if let Some(model_index) = self.model_index() {
            out.insert(Value::String(MODEL_INDEX_KEY.to_string()), model_index);
        }
        out
    }

    /// YAML rendering of [`CardData::to_dict`] without a trailing newline.
    pub fn to_yaml(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(&Value::Mapping(self.to_dict())).map_err(|e| {
            CardError::SerializationFailed {
                message: e.to_string(),
            }
        })?;
        Ok(yaml.trim_end_matches('\n').to_string())
    }

    fn model_index(&self) -> Option<Value> {
        match (&self.model_name, &self.eval_results) {
            (Some(name), Some(results)) => Some(eval::encode(name, results)),
            _ => None,
        }
    }

    fn field_value(&self, key: &str) -> Option<Value> {
        let string = |s: &Option<String>| s.clone().map(Value::String);
        let list = |l: &Option<Vec<String>>| l.as_deref().map(list_value);
        let typed = match key {
            "language" => list(&self.language),
            "license" => string(&self.license),
            "library_name" => string(&self.library_name),
            "tags" => list(&self.tags),
            "datasets" => list(&self.datasets),
            "metrics" => list(&self.metrics),
            "model_name" if self.eval_results.is_some() => return None,
            "model_name" => string(&self.model_name),
            MODEL_INDEX_KEY => return None,
            _ => None,
        };
        typed.or_else(|| self.extra.get(key).filter(|v| !v.is_null()).cloned())
    }

    fn touch(&mut self, key: &str) {
        if !self.order.iter().any(|k| k == key) {
            self.order.push(key.to_string());
        }
    }

    /// Store a non-null value, typed when its shape allows it and verbatim otherwise.
    fn insert_field(&mut self, key: &str, value: &Value) {
        let slot = match key {
            "language" => Slot::List(&mut self.language),
            "tags" => Slot::List(&mut self.tags),
            "datasets" => Slot::List(&mut self.datasets),
            "metrics" => Slot::List(&mut self.metrics),
            "license" => Slot::Scalar(&mut self.license),
            "library_name" => Slot::Scalar(&mut self.library_name),
            "model_name" => Slot::Scalar(&mut self.model_name),
            _ => Slot::Untyped,
        };

        let (raw, list_field) = match slot {
            Slot::List(field) => {
                *field = string_list(value);
                (field.is_none(), true)
            }
            Slot::Scalar(field) => {
                *field = string_scalar(value);
                (field.is_none(), false)
            }
            Slot::Untyped => (true, self.kind.is_list_field(key)),
        };

        if raw {
            let value = match value {
                Value::String(_) | Value::Number(_) | Value::Bool(_) if list_field => {
                    Value::Sequence(vec![value.clone()])
                }
                other => other.clone(),
            };
            if RECOGNIZED_FIELDS.contains(&key) {
                tracing::debug!("Keeping `{}` as written, it has no typed form", key);
            }
            self.extra.insert(Value::String(key.to_string()), value);
        } else {
            self.extra.shift_remove(key);
        }
        self.touch(key);
    }
}

/// Typed storage behind a recognized field name.
enum Slot<'a> {
    List(&'a mut Option<Vec<String>>),
    Scalar(&'a mut Option<String>),
    Untyped,
}

impl PartialEq for CardData {
    fn eq(&self, other: &Self) -> bool {
        self.to_dict() == other.to_dict()
    }
}

impl Serialize for CardData {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_dict().serialize(serializer)
    }
}

/// Builds [`CardData`] from explicit values, checking invariants in [`CardDataBuilder::build`].
#[derive(Debug)]
pub struct CardDataBuilder {
    data: CardData,
    eval_results: Option<Vec<EvalResult>>,
}

impl CardDataBuilder {
    fn new(kind: CardKind) -> Self {
        Self {
            data: CardData::for_kind(kind),
            eval_results: None,
        }
    }

    fn list(self, key: &str, values: Vec<String>) -> Self {
        let value = list_value(&values);
        self.field(key, &value)
    }

    fn field(mut self, key: &str, value: &Value) -> Self {
        if !value.is_null() {
            self.data.insert_field(key, value);
        }
        self
    }

    #[must_use]
    pub fn language(self, language: impl IntoValues) -> Self {
        self.list("language", language.into_values())
    }

    #[must_use]
    pub fn license(self, license: impl Into<String>) -> Self {
        self.field("license", &Value::String(license.into()))
    }

    #[must_use]
    pub fn library_name(self, library_name: impl Into<String>) -> Self {
        self.field("library_name", &Value::String(library_name.into()))
    }

    #[must_use]
    pub fn tags(self, tags: impl IntoValues) -> Self {
        self.list("tags", tags.into_values())
    }

    #[must_use]
    pub fn datasets(self, datasets: impl IntoValues) -> Self {
        self.list("datasets", datasets.into_values())
    }

    #[must_use]
    pub fn metrics(self, metrics: impl IntoValues) -> Self {
        self.list("metrics", metrics.into_values())
    }

    #[must_use]
    pub fn model_name(self, model_name: impl Into<String>) -> Self {
        self.field("model_name", &Value::String(model_name.into()))
    }

    #[must_use]
    pub fn eval_results(mut self, eval_results: Vec<EvalResult>) -> Self {
        self.eval_results = Some(eval_results);
        self
    }

    /// Set any other field; recognized list fields wrap a single string.
    #[must_use]
    pub fn field_value(self, key: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.field(key, &value)
    }

    /// Finish, failing if `eval_results` was given without `model_name`.
    pub fn build(self) -> Result<CardData> {
        let mut data = self.data;
        if let Some(results) = self.eval_results {
            let Some(model_name) = data.model_name.clone() else {
                return Err(invalid_argument(
                    "`eval_results` requires `model_name` to be set",
                ));
            };
            data.set_eval_results(model_name, results);
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn load(yaml: &str) -> (CardData, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let data = CardData::from_mapping(CardKind::Model, mapping(yaml), &mut diagnostics);
        (data, diagnostics)
    }

    #[test]
    fn scalar_list_fields_are_normalized() {
        let data = CardData::builder().tags("x").build().unwrap();
        assert_eq!(data.tags, Some(vec!["x".to_string()]));

        let data = CardData::builder().tags(["x", "y"]).build().unwrap();
        assert_eq!(data.tags, Some(vec!["x".to_string(), "y".to_string()]));
    }

    #[test]
    fn mapping_input_is_normalized() {
        let (data, diagnostics) = load("language: en\nlicense: mit\ntags:\n  - pytorch\n");
        assert!(diagnostics.is_empty());
        assert_eq!(
            data.to_dict(),
            mapping("language: [en]\nlicense: mit\ntags: [pytorch]\n")
        );
    }

    #[test]
    fn eval_results_require_model_name() {
        let err = CardData::builder()
            .eval_results(vec![EvalResult::new("t", "d", "D", "acc", 1)])
            .build()
            .unwrap_err();
        assert!(matches!(err, CardError::InvalidArgument { .. }));
        let message = err.to_string();
        assert!(message.contains("eval_results") && message.contains("model_name"));
    }

    #[test]
    fn eval_results_serialize_as_model_index_last() {
        let data = CardData::builder()
            .model_name("my-cool-model")
            .eval_results(vec![EvalResult::new(
                "image-classification",
                "beans",
                "Beans",
                "acc",
                0.9,
            )])
            .license("mit")
            .build()
            .unwrap();
        let dict = data.to_dict();
        let keys: Vec<_> = dict.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["license", "model-index"]);
    }

    #[test]
    fn model_name_without_results_is_plain_field() {
        let data = CardData::builder().model_name("m").build().unwrap();
        assert_eq!(data.to_dict(), mapping("model_name: m\n"));
    }

    #[test]
    fn extras_keep_insertion_order() {
        let (data, _) = load("zeta: 1\nlicense: mit\nalpha: {nested: true}\n");
        let keys: Vec<_> = data
            .to_dict()
            .keys()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        assert_eq!(keys, vec!["zeta", "license", "alpha"]);
        assert_eq!(
            data.get("alpha"),
            Some(serde_yaml::from_str("nested: true").unwrap())
        );
    }

    #[test]
    fn null_fields_are_omitted() {
        let (data, _) = load("license: null\ncustom: ~\ntags: [a]\n");
        assert_eq!(data.to_dict(), mapping("tags: [a]\n"));
    }

    #[test]
    fn legacy_dataset_key() {
        let (data, _) = load("dataset: imagenet\n");
        assert_eq!(data.datasets, Some(vec!["imagenet".to_string()]));

        let (data, _) = load("datasets: [a]\ndataset: b\n");
        assert_eq!(data.datasets, Some(vec!["a".to_string()]));
        assert_eq!(data.get("dataset"), Some(Value::String("b".to_string())));
    }

    #[test]
    fn invalid_model_index_is_dropped_with_warning() {
        let (data, diagnostics) = load(
            "license: mit\nmodel-index:\n- name: m\n  results:\n  - task: {}\n    dataset: {type: d, name: D}\n    metrics: [{type: acc, value: 1}]\n",
        );
        assert!(data.eval_results().is_none());
        assert_eq!(diagnostics.warnings().len(), 1);
        assert!(matches!(
            diagnostics.warnings()[0],
            CardWarning::InvalidModelIndex { .. }
        ));
        assert_eq!(data.to_dict(), mapping("license: mit\n"));
    }

    #[test]
    fn model_index_is_decoded() {
        let (data, _) = load(
            "model-index:\n- name: m\n  results:\n  - task: {type: t}\n    dataset: {type: d, name: D}\n    metrics: [{type: acc, value: 1}]\n",
        );
        assert_eq!(data.model_name(), Some("m"));
        assert_eq!(data.eval_results().map(<[_]>::len), Some(1));
    }

    #[test]
    fn untyped_values_of_recognized_fields_are_kept() {
        let (data, diagnostics) = load("tags:\n- [nested, list]\nlicense: mit\n");
        assert!(diagnostics.is_empty());
        assert_eq!(data.tags, None);
        assert_eq!(
            data.get("tags"),
            Some(serde_yaml::from_str("[[nested, list]]").unwrap())
        );
        assert_eq!(
            data.to_dict(),
            mapping("tags:\n- [nested, list]\nlicense: mit\n")
        );
    }

    #[test]
    fn per_config_dataset_fields_are_kept() {
        let yaml = "annotations_creators:\n  cola: [expert-generated]\n  sst2: [crowdsourced]\nlanguage_creators: found\npretty_name: GLUE\n";
        let mut diagnostics = Diagnostics::new();
        let data = CardData::from_mapping(CardKind::Dataset, mapping(yaml), &mut diagnostics);
        assert!(diagnostics.is_empty());
        assert_eq!(
            data.to_dict(),
            mapping(
                "annotations_creators:\n  cola: [expert-generated]\n  sst2: [crowdsourced]\nlanguage_creators: [found]\npretty_name: GLUE\n"
            )
        );
    }

    #[test]
    fn yaml_types_are_preserved() {
        let (data, _) = load("tags: [2023, true]\nlicense: 2.0\nmetrics: 7\n");
        assert_eq!(data.tags, None);
        assert_eq!(data.license, None);
        assert_eq!(
            data.to_dict(),
            mapping("tags: [2023, true]\nlicense: 2.0\nmetrics: [7]\n")
        );
        assert_eq!(
            data.to_yaml().unwrap(),
            "tags:\n- 2023\n- true\nlicense: 2.0\nmetrics:\n- 7"
        );
    }

    #[test]
    fn typed_value_replaces_kept_one() {
        let (mut data, _) = load("tags: {a: b}\n");
        data.set("tags", "x").unwrap();
        assert_eq!(data.tags, Some(vec!["x".to_string()]));
        assert!(data.extra().is_empty());
        assert_eq!(data.to_dict(), mapping("tags: [x]\n"));
    }

    #[test]
    fn eval_results_key_is_passed_through() {
        let (data, _) = load("license: mit\neval_results:\n- acc: 0.9\n");
        assert!(data.eval_results().is_none());
        assert_eq!(
            data.to_dict(),
            mapping("license: mit\neval_results:\n- acc: 0.9\n")
        );
    }

    #[test]
    fn null_model_name_keeps_model_index() {
        let (data, _) = load(
            "model-index:\n- name: m\n  results:\n  - task: {type: t}\n    dataset: {type: d, name: D}\n    metrics: [{type: acc, value: 1}]\nmodel_name: null\n",
        );
        assert_eq!(data.model_name(), Some("m"));
        assert_eq!(data.eval_results().map(<[_]>::len), Some(1));
        assert!(data.to_dict().contains_key(MODEL_INDEX_KEY));
    }

    #[test]
    fn dataset_kind_normalizes_its_fields() {
        let mut diagnostics = Diagnostics::new();
        let data = CardData::from_mapping(
            CardKind::Dataset,
            mapping("task_categories: text-classification\npretty_name: 42\n"),
            &mut diagnostics,
        );
        assert_eq!(
            data.to_dict(),
            mapping("task_categories: [text-classification]\npretty_name: 42\n")
        );
    }

    #[test]
    fn set_and_remove_through_unified_accessor() {
        let mut data = CardData::new();
        data.set("license", "apache-2.0").unwrap();
        data.set("custom", 3).unwrap();
        data.set("language", "fr").unwrap();
        assert_eq!(data.language, Some(vec!["fr".to_string()]));
        assert_eq!(data.get("custom"), Some(Value::from(3)));
        assert_eq!(data.remove("custom"), Some(Value::from(3)));
        assert!(!data.contains_key("custom"));
        assert!(data.set("eval_results", Value::Null).is_err());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = CardData::builder().license("mit").tags("x").build().unwrap();
        let b = CardData::builder().tags("x").license("mit").build().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, CardData::new());
    }

    #[test]
    fn direct_field_mutation_is_serialized() {
        let mut data = CardData::new();
        data.language = Some(vec!["fr".to_string()]);
        assert_eq!(data.to_dict(), mapping("language: [fr]\n"));
    }

    #[test]
    fn to_yaml_has_no_trailing_newline() {
        let data = CardData::builder().license("mit").build().unwrap();
        assert_eq!(data.to_yaml().unwrap(), "license: mit");
        assert_eq!(CardData::new().to_yaml().unwrap(), "{}");
    }
}
