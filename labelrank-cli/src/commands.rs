//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use anyhow::Context;
use labelrank_eval::{EvalConfig, Evaluator, Vocabulary};
use std::path::Path;

/// Handle a CLI subcommand.
pub fn handle_command(
    command: Commands,
    mut config: EvalConfig,
    workspace: &Path,
) -> anyhow::Result<()> {
    match command {
        Commands::Evaluate {
            predictions,
            ground_truth,
            vocabulary,
            format,
            per_document,
            output,
        } => {
            if let Some(format) = format {
                config.output.format = format.into();
            }
            config.output.per_document |= per_document;
            if vocabulary.is_some() {
                config.vocabulary_path = vocabulary;
            }
            handle_evaluate(
                &config,
                &predictions,
                &ground_truth,
                output.as_deref(),
                workspace,
            )
        }
        Commands::Config { action } => handle_config(action, &config, workspace),
    }
}

fn handle_evaluate(
    config: &EvalConfig,
    predictions_path: &Path,
    ground_truth_path: &Path,
    output: Option<&Path>,
    workspace: &Path,
) -> anyhow::Result<()> {
    let vocabulary_path = config
        .vocabulary_path
        .as_deref()
        .context("No vocabulary given: pass --vocabulary or set vocabulary_path in config")?;
    // Relative config paths are taken from the workspace.
    let vocabulary_path = workspace.join(vocabulary_path);

    let vocabulary = Vocabulary::from_file(&vocabulary_path).with_context(|| {
        format!("Failed to load vocabulary from {}", vocabulary_path.display())
    })?;
    let ground_truth = labelrank_eval::load_ground_truth(ground_truth_path).with_context(|| {
        format!(
            "Failed to load ground truth from {}",
            ground_truth_path.display()
        )
    })?;
    let predictions = labelrank_eval::load_predictions(predictions_path).with_context(|| {
        format!(
            "Failed to load predictions from {}",
            predictions_path.display()
        )
    })?;

    tracing::info!(
        labels = vocabulary.len(),
        documents = ground_truth.len(),
        predictions = predictions.len(),
        "Running evaluation"
    );

    let report = Evaluator::new(&vocabulary)
        .evaluate_detailed(&predictions, &ground_truth)
        .context("Evaluation failed")?;

    let rendered = crate::render::render_report(&report, &config.output)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn handle_config(action: ConfigAction, config: &EvalConfig, workspace: &Path) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_path = labelrank_eval::config::workspace_config_path(workspace);
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }
            if let Some(dir) = config_path.parent() {
                std::fs::create_dir_all(dir)?;
            }

            let toml_str = toml::to_string_pretty(&EvalConfig::default())?;
            std::fs::write(&config_path, &toml_str)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}
