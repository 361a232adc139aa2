//! Run command implementation: extract, then compare.

use crate::cli::RunArgs;
use crate::commands::compare::{compare_objectives, load_catalog};
use crate::commands::extract::{
    check_chunk_timeout, extract_document, extractor_config, load_priming, report_extraction,
};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::sink::JsonTableSink;
use crate::source::FileDocumentSource;
use crate::tables;
use syllabus_domain::traits::DocumentSource;
use syllabus_llm::{OpenAiChatModel, OpenAiEmbedder};
use syllabus_matcher::{Matcher, Vectorizer};

/// Execute the run command.
///
/// Every input is checked, and both output tables are confirmed absent,
/// before the first model call.
pub fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    tables::check_institution(&args.institution)?;
    let mut sink = JsonTableSink::new(config.output_dir(args.api.output_dir.as_deref()));
    let objectives_out = tables::objectives_table(&args.institution);
    let matches_out = tables::matches_table(&args.institution);
    sink.ensure_absent(&objectives_out)?;
    sink.ensure_absent(&matches_out)?;

    let text = FileDocumentSource.read_text(&args.input.to_string_lossy())?;
    let catalog = load_catalog(&args.catalog)?;
    let matcher = Matcher::new(args.threshold.unwrap_or(config.matcher.threshold))?;
    let extractor_config = extractor_config(config, args.strict);
    let priming = load_priming(args.priming.as_deref(), &extractor_config)?;
    let llm = config.llm_with_key(args.api.api_key.as_deref())?;
    check_chunk_timeout(&extractor_config, &llm)?;
    let model = OpenAiChatModel::new(&llm)?;
    let vectorizer = Vectorizer::new(OpenAiEmbedder::new(&llm)?);

    let result = extract_document(model, priming, extractor_config, &text)?;
    tables::write_objectives(&mut sink, &objectives_out, &result.objectives)?;
    report_extraction(&result, &objectives_out, formatter)?;

    let matches = compare_objectives(&vectorizer, &matcher, &result.objectives, &catalog)?;
    tables::write_matches(&mut sink, &matches_out, &result.objectives, &matches)?;

    println!("{}", formatter.format_matches(&result.objectives, &matches)?);
    eprintln!(
        "{}",
        formatter.success(&format!("Wrote table '{}'", matches_out))
    );
    Ok(())
}
