//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::sink::JsonTableSink;
use crate::source::FileDocumentSource;
use crate::tables;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use syllabus_domain::traits::{ChatModel, DocumentSource};
use syllabus_extractor::{ExtractionResult, Extractor, ExtractorConfig, FailurePolicy, PrimingSet};
use syllabus_llm::{LlmConfig, OpenAiChatModel};
use tracing::info;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    tables::check_institution(&args.institution)?;
    let mut sink = JsonTableSink::new(config.output_dir(args.api.output_dir.as_deref()));
    let table = tables::objectives_table(&args.institution);
    sink.ensure_absent(&table)?;

    let text = FileDocumentSource.read_text(&args.input.to_string_lossy())?;
    let extractor_config = extractor_config(config, args.strict);
    let priming = load_priming(args.priming.as_deref(), &extractor_config)?;
    let llm = config.llm_with_key(args.api.api_key.as_deref())?;
    check_chunk_timeout(&extractor_config, &llm)?;
    let model = OpenAiChatModel::new(&llm)?;

    let result = extract_document(model, priming, extractor_config, &text)?;
    tables::write_objectives(&mut sink, &table, &result.objectives)?;

    report_extraction(&result, &table, formatter)
}

/// Extractor settings from the file, with `--strict` applied.
pub fn extractor_config(config: &Config, strict: bool) -> ExtractorConfig {
    let mut extractor = config.extractor.clone();
    if strict {
        extractor.failure_policy = FailurePolicy::Abort;
    }
    extractor
}

/// Reject a chunk timeout the model client can outlast with its own retries.
pub fn check_chunk_timeout(extractor: &ExtractorConfig, llm: &LlmConfig) -> Result<()> {
    let budget = llm.retry_budget();
    if extractor.chunk_timeout() < budget {
        return Err(CliError::Config(format!(
            "extractor.chunk_timeout_secs ({}) is shorter than the model client's retry budget ({}s); \
             raise it or lower llm.timeout_secs / llm.max_retries",
            extractor.chunk_timeout_secs,
            budget.as_secs()
        )));
    }
    Ok(())
}

/// Priming messages from `path`, or the built-in set for the configured stop signal.
pub fn load_priming(path: Option<&Path>, config: &ExtractorConfig) -> Result<PrimingSet> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            Ok(PrimingSet::from_toml(&contents)?)
        }
        None => Ok(PrimingSet::learning_objectives(&config.stop_signal)),
    }
}

/// Run one extraction to completion on a private runtime.
pub fn extract_document<M>(
    model: M,
    priming: PrimingSet,
    config: ExtractorConfig,
    text: &str,
) -> Result<ExtractionResult>
where
    M: ChatModel + Send + Sync + 'static,
    M::Error: Display,
{
    let extractor = Extractor::new(model, priming, config)?;
    extractor.check_document(text)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(extractor.extract(text))?;

    info!(
        run_id = %result.metadata.run_id,
        objectives = result.objectives.len(),
        "document extracted"
    );
    Ok(result)
}

/// Print the outcome of an extraction.
pub fn report_extraction(result: &ExtractionResult, table: &str, formatter: &Formatter) -> Result<()> {
    eprintln!("{}", formatter.extraction_summary(result));
    for failure in &result.failures {
        eprintln!(
            "{}",
            formatter.warning(&format!("chunk {}: {}", failure.chunk_index, failure.reason))
        );
    }
    if let Some(fragment) = &result.metadata.discarded_carry {
        eprintln!(
            "{}",
            formatter.warning(&format!("incomplete objective dropped: {}", fragment))
        );
    }
    println!("{}", formatter.format_objectives(&result.objectives)?);
    eprintln!("{}", formatter.info(&format!("Wrote table '{}'", table)));
    Ok(())
}
