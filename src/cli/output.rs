//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{JobGuardArgs, OutputFormat};
use crate::error::Result;
use crate::ml::model::TrainingMetadata;
use crate::ml::vocabulary::NgramRange;

/// Result structure for a training run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub output: String,
    pub vocabulary_size: usize,
    pub training_examples: usize,
    pub test_examples: usize,
    pub train_accuracy: f64,
    pub test_accuracy: Option<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub duration_ms: u64,
}

/// Result structure for model inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInspection {
    pub path: String,
    pub vocabulary_size: usize,
    pub ngram_range: NgramRange,
    pub bias: f64,
    pub metadata: Option<TrainingMetadata>,
    pub top_fake_terms: Vec<(String, f64)>,
    pub top_real_terms: Vec<(String, f64)>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &JobGuardArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &JobGuardArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("PredictionResult") => {
            output_prediction_human(&value)
        }
        _ if std::any::type_name::<T>().contains("ModelInspection") => {
            output_inspection_human(&value)
        }
        _ => output_generic_human(&value),
    }
}

/// Output a prediction in human format.
fn output_prediction_human(value: &serde_json::Value) -> Result<()> {
    let label = match value["prediction"].as_u64() {
        Some(1) => "FAKE",
        _ => "REAL",
    };
    println!("Prediction: {label}");
    println!(
        "Probabilities: real {}%, fake {}%",
        format_value(&value["probabilities"]["real"]),
        format_value(&value["probabilities"]["fake"])
    );

    print_flags("Red flags (toward fake)", &value["red_flags"]);
    print_flags("Green flags (toward real)", &value["green_flags"]);
    Ok(())
}

fn print_flags(title: &str, flags: &serde_json::Value) {
    let flags = flags.as_array().map(Vec::as_slice).unwrap_or(&[]);
    println!();
    println!("{title}:");
    if flags.is_empty() {
        println!("  (none)");
    }
    for flag in flags {
        let token = flag[0].as_str().unwrap_or_default();
        let weight = flag[1].as_f64().unwrap_or_default();
        println!("  {token:<30} {weight:.4}");
    }
}

/// Output model inspection in human format.
fn output_inspection_human(value: &serde_json::Value) -> Result<()> {
    println!("Model: {}", format_value(&value["path"]));
    println!("Vocabulary size: {}", format_value(&value["vocabulary_size"]));
    println!(
        "N-gram range: ({}, {})",
        format_value(&value["ngram_range"]["min_n"]),
        format_value(&value["ngram_range"]["max_n"])
    );
    println!("Bias: {}", format_value(&value["bias"]));

    if let Some(metadata) = value["metadata"].as_object() {
        println!();
        println!("Training:");
        for (key, val) in metadata {
            println!("  {key}: {}", format_value(val));
        }
    }

    for (title, key) in [
        ("Strongest fake terms", "top_fake_terms"),
        ("Strongest real terms", "top_real_terms"),
    ] {
        println!();
        println!("{title}:");
        for entry in value[key].as_array().map(Vec::as_slice).unwrap_or(&[]) {
            let term = entry[0].as_str().unwrap_or_default();
            let weight = entry[1].as_f64().unwrap_or_default();
            println!("  {term:<30} {weight:+.4}");
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &JobGuardArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::Array(arr) => format!("[{} items]", arr.len()),
        serde_json::Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
