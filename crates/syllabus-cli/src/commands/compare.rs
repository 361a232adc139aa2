//! Compare command implementation.

use crate::cli::CompareArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::sink::JsonTableSink;
use crate::tables;
use std::fmt::Display;
use syllabus_domain::traits::EmbeddingProvider;
use syllabus_llm::OpenAiEmbedder;
use syllabus_matcher::{MatchTable, Matcher, ReferenceCatalog, Vectorizer};
use tracing::warn;

/// Execute the compare command.
pub fn execute_compare(args: CompareArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    tables::check_institution(&args.institution)?;
    let mut sink = JsonTableSink::new(config.output_dir(args.api.output_dir.as_deref()));
    let out = tables::matches_table(&args.institution);
    sink.ensure_absent(&out)?;

    let objectives = tables::read_objectives(&sink, &tables::objectives_table(&args.institution))?;
    let catalog = load_catalog(&args.catalog)?;
    let matcher = Matcher::new(args.threshold.unwrap_or(config.matcher.threshold))?;
    let vectorizer = Vectorizer::new(OpenAiEmbedder::new(
        &config.llm_with_key(args.api.api_key.as_deref())?,
    )?);

    let matches = compare_objectives(&vectorizer, &matcher, &objectives, &catalog)?;
    tables::write_matches(&mut sink, &out, &objectives, &matches)?;

    println!("{}", formatter.format_matches(&objectives, &matches)?);
    eprintln!(
        "{}",
        formatter.success(&format!(
            "{} of {} objective(s) matched; wrote table '{}'",
            matches.rows().iter().filter(|row| !row.is_empty()).count(),
            objectives.len(),
            out
        ))
    );
    Ok(())
}

/// Load a catalog, refusing an empty one.
pub fn load_catalog(path: &std::path::Path) -> Result<ReferenceCatalog> {
    if !path.is_file() {
        return Err(CliError::Config(format!(
            "catalog '{}' does not exist",
            path.display()
        )));
    }
    let catalog = ReferenceCatalog::load(path)?;
    if catalog.is_empty() {
        return Err(CliError::Config(format!(
            "catalog '{}' has no entries",
            path.display()
        )));
    }
    Ok(catalog)
}

/// Embed objectives and match them against the catalog.
pub fn compare_objectives<E>(
    vectorizer: &Vectorizer<E>,
    matcher: &Matcher,
    objectives: &[String],
    catalog: &ReferenceCatalog,
) -> Result<MatchTable>
where
    E: EmbeddingProvider,
    E::Error: Display,
{
    let missing = catalog.missing_embeddings();
    if missing > 0 {
        warn!(missing, "catalog entries without embeddings will not match; run embed-catalog");
    }

    let batch = vectorizer.embed_all(objectives);
    let targets = catalog.vectors(vectorizer.dimension());
    Ok(matcher.match_vectors(&batch.vectors, &targets, &catalog.labels())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_llm::MockEmbedder;
    use syllabus_matcher::CatalogEntry;

    #[test]
    fn test_compare_with_mock_embedder() {
        let vectorizer = Vectorizer::new(MockEmbedder::new(16));
        let mut catalog = ReferenceCatalog::new(vec![
            CatalogEntry::new("PC1", "Gather information about patients"),
            CatalogEntry::new("MK1", "Apply scientific principles"),
        ])
        .unwrap();
        catalog.embed_missing(&vectorizer);

        let objectives = vec!["Apply scientific principles".to_string()];
        let table =
            compare_objectives(&vectorizer, &Matcher::new(0.99).unwrap(), &objectives, &catalog).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].len(), 1);
        assert_eq!(table.rows()[0][0].label, "MK1");
    }

    #[test]
    fn test_missing_catalog_is_config_error() {
        let result = load_catalog(std::path::Path::new("/no/such/catalog.json"));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{ "entries": [] }"#).unwrap();
        assert!(matches!(load_catalog(&path), Err(CliError::Config(_))));
    }
}
