//! Display functions for cards
//!
//! Summaries list the recognized metadata first, then any extra fields, then the
//! evaluation results grouped under the model name.

use console::Style;
use modelcards::card::{CardWarning, EvalResult};
use modelcards::RepoCard;
use serde_yaml::Value;

macro_rules! display_opt_field {
    ($label:expr, $value:expr) => {
        if let Some(ref v) = $value {
            println!("  {} {}", Style::new().bold().apply_to($label), v);
        }
    };
}

const SUMMARY_FIELDS: &[(&str, &str)] = &[
    ("license", "License:"),
    ("language", "Language:"),
    ("library_name", "Library:"),
    ("tags", "Tags:"),
    ("datasets", "Datasets:"),
    ("metrics", "Metrics:"),
];

/// Inline rendering of a metadata value
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().replace('\n', " "))
            .unwrap_or_default(),
    }
}

fn format_eval_result(result: &EvalResult) -> String {
    let dataset = match &result.dataset_split {
        Some(split) => format!("{} ({})", result.dataset_name, split),
        None => result.dataset_name.clone(),
    };
    format!(
        "{} on {}: {} = {}",
        result.task_type, dataset, result.metric_type, result.metric_value
    )
}

/// Print a human-readable summary of a card
pub fn display_card_summary(source: &str, card: &RepoCard) {
    println!(
        "{} {}",
        Style::new().bold().yellow().apply_to(source),
        Style::new().dim().apply_to(format!("({} card)", card.kind()))
    );

    for (key, label) in SUMMARY_FIELDS {
        let value = card.data.get(key).map(|v| format_value(&v));
        display_opt_field!(*label, value);
    }

    let extra: Vec<_> = card
        .data
        .extra()
        .iter()
        .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), format_value(v))))
        .collect();
    if !extra.is_empty() {
        println!("  {}", Style::new().bold().apply_to("Other fields:"));
        for (key, value) in extra {
            println!("    {} {}", Style::new().cyan().apply_to(format!("{key}:")), value);
        }
    }

    if let (Some(name), Some(results)) = (card.data.model_name(), card.data.eval_results()) {
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Eval results:"),
            Style::new().green().apply_to(name)
        );
        for result in results {
            println!("    - {}", format_eval_result(result));
        }
    }

    let body_lines = card.text.lines().count();
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Body:"),
        Style::new().dim().apply_to(format!("{body_lines} lines"))
    );
}

/// Print load warnings to stderr
pub fn display_warnings(warnings: &[CardWarning]) {
    for warning in warnings {
        eprintln!("{} {}", Style::new().yellow().bold().apply_to("Warning:"), warning);
    }
}

/// Print a success line
pub fn display_success(message: &str) {
    println!("{} {}", Style::new().green().bold().apply_to("✓"), message);
}
