//! Command implementations for the jobguard CLI.

use std::fs;
use std::io::Read;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::info;

use crate::analysis::normalizer::Normalizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ServiceConfig;
use crate::ml::dataset::load_records;
use crate::ml::model::JobPostingModel;
use crate::ml::training::train;
use crate::server;
use crate::service::{ModelContext, PredictionService};

/// Execute a CLI command.
pub fn execute_command(args: JobGuardArgs) -> Result<()> {
    match &args.command {
        Command::Serve(serve_args) => serve(serve_args.clone()),
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Train(train_args) => train_model(train_args.clone(), &args),
        Command::Inspect(inspect_args) => inspect_model(inspect_args.clone(), &args),
    }
}

/// Load the model and run the HTTP server.
fn serve(args: ServeArgs) -> Result<()> {
    let config = args.service_config();
    config.validate()?;

    let context = ModelContext::load(&args.model)
        .with_context(|| format!("Failed to load model from {}", args.model.display()))?;
    let service = PredictionService::new(context, config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(server::serve(&args.server_config(), service))?;
    Ok(())
}

/// Classify one posting.
fn predict(args: PredictArgs, cli_args: &JobGuardArgs) -> Result<()> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read the posting from stdin")?;
            buffer
        }
    };

    let config = ServiceConfig {
        top_n: args.top_n,
        ..Default::default()
    };
    let context = ModelContext::load(&args.model)
        .with_context(|| format!("Failed to load model from {}", args.model.display()))?;
    let service = PredictionService::new(context, config).without_wordcloud();

    let result = service.classify(&text)?;
    output_result("Prediction", &result, cli_args)?;
    Ok(())
}

/// Train and save a model artifact.
fn train_model(args: TrainArgs, cli_args: &JobGuardArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        );
    }

    let config = args.training_config()?;
    let start = Instant::now();

    let records = load_records(&args.data)
        .with_context(|| format!("Failed to load training data from {}", args.data.display()))?;
    let (model, report) = train(&records, Normalizer::job_posting()?, &config)
        .context("Training failed")?;
    model.save(&args.output)?;

    let duration_ms = start.elapsed().as_millis() as u64;
    info!("Training finished in {duration_ms} ms");

    output_result(
        "Model trained successfully",
        &TrainingSummary {
            output: args.output.to_string_lossy().to_string(),
            vocabulary_size: model.vocabulary().len(),
            training_examples: report.metadata.training_examples,
            test_examples: report.metadata.test_examples,
            train_accuracy: report.metadata.train_accuracy,
            test_accuracy: report.metadata.test_accuracy,
            iterations: report.stats.iterations,
            converged: report.stats.converged,
            duration_ms,
        },
        cli_args,
    )?;
    Ok(())
}

/// Show what a model artifact contains.
fn inspect_model(args: InspectArgs, cli_args: &JobGuardArgs) -> Result<()> {
    let model = JobPostingModel::load(&args.model)
        .with_context(|| format!("Failed to load model from {}", args.model.display()))?;
    let (top_fake_terms, top_real_terms) = model.top_terms(args.top);

    output_result(
        "Model summary",
        &ModelInspection {
            path: args.model.to_string_lossy().to_string(),
            vocabulary_size: model.vocabulary().len(),
            ngram_range: model.vocabulary().ngram_range(),
            bias: model.weights().bias(),
            metadata: model.metadata().cloned(),
            top_fake_terms,
            top_real_terms,
        },
        cli_args,
    )?;
    Ok(())
}
