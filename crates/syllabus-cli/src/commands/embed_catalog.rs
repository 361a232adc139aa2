//! Embed-catalog command implementation.

use crate::cli::EmbedCatalogArgs;
use crate::commands::compare::load_catalog;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use syllabus_llm::OpenAiEmbedder;
use syllabus_matcher::Vectorizer;

/// Execute the embed-catalog command.
pub fn execute_embed_catalog(
    args: EmbedCatalogArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let mut catalog = load_catalog(&args.catalog)?;

    if catalog.missing_embeddings() == 0 {
        eprintln!("{}", formatter.info("Every catalog entry already has an embedding"));
        return Ok(());
    }

    let vectorizer = Vectorizer::new(OpenAiEmbedder::new(
        &config.llm_with_key(args.api.api_key.as_deref())?,
    )?);
    let embedded = catalog.embed_missing(&vectorizer);
    catalog.save(&args.catalog)?;

    eprintln!(
        "{}",
        formatter.success(&format!(
            "Embedded {} of {} catalog entries in '{}'",
            embedded,
            catalog.len(),
            args.catalog.display()
        ))
    );
    Ok(())
}
