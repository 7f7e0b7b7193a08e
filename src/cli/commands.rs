// ABOUTME: Command implementations for the formbind CLI
// ABOUTME: Handles execution of preprocess, resolve and fire commands

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing::info;

use super::config::Config;
use super::session::{Session, SessionEvent};
use crate::document::Document;
use crate::fixture::Fixture;
use crate::preprocess::Preprocessor;
use crate::template;

/// Print a preprocessed document
pub fn preprocess_file(path: &Path, config: &Config) -> Result<()> {
    let document = Document::from_file(path)
        .with_context(|| format!("Failed to read document '{}'", path.display()))?;

    let report = Preprocessor::from_config(&config.preprocess).process_report(&document);
    if !report.errors.is_empty() {
        info!("Preprocessing finished with {} diagnostic(s)", report.errors.len());
    }

    print!("{}", report.document);
    Ok(())
}

/// Print a template with every command resolved against a fixture tree
pub fn resolve_template(fixture_path: &Path, text: &str) -> Result<()> {
    let fixture = load_fixture(fixture_path)?;
    let tree = fixture.tree();
    println!("{}", template::resolve_template(text, &tree));
    Ok(())
}

/// Load a fixture, fire one trigger and print what it produced.
/// Produced documents are loaded back into the session before printing.
pub async fn fire_trigger(
    fixture_path: &Path,
    object: &str,
    event: &str,
    config: &Config,
) -> Result<()> {
    let fixture = load_fixture(fixture_path)?;
    let mut session = Session::from_config(config);
    session.load(&fixture)?;

    let mut failure = None;
    for outcome in session.fire(object, event).await? {
        match outcome {
            SessionEvent::Answer(text) => println!("{}", text),
            SessionEvent::Reloaded {
                document, report, ..
            } => {
                print!("{}", document);
                info!("Document rebound {} trigger(s)", report.registered.len());
            }
            SessionEvent::Rejected { error, .. } => {
                failure.get_or_insert_with(|| anyhow!("{}", error));
            }
            SessionEvent::Failed(e) => {
                failure.get_or_insert_with(|| anyhow!("{}", e));
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn load_fixture(path: &Path) -> Result<Fixture> {
    let fixture = Fixture::from_file(path)
        .with_context(|| format!("Failed to load fixture '{}'", path.display()))?;
    info!(
        "Loaded fixture with {} widget(s) and {} trigger(s)",
        fixture.widgets.len(),
        fixture.triggers.len()
    );
    Ok(fixture)
}
