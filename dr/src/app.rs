//! Single-invocation driver
//!
//! Maps parsed arguments to exactly one of: help, topic listing, or a topic
//! lookup. Errors from the lookup are rendered here and turned into exit
//! codes; only output failures propagate.

use std::io::Write;

use eyre::{Context, Result};
use tracing::{debug, info};

use crate::cli::{Cli, OutputFormat, help_text};
use crate::config::Config;
use crate::error::DocError;
use crate::render::Renderer;
use crate::resolver::{Resolution, list_topics, read_document, resolve};
use crate::store::{BundledStore, ContentStore, FsStore};
use crate::topic::Topic;

/// Exit code for help, listings and rendered documents
pub const EXIT_OK: u8 = 0;

/// Exit code for failures outside the lookup itself (config, output)
pub const EXIT_RUNTIME_FAILURE: u8 = 4;

/// Run one invocation, writing to `out` and `err`, and return the exit code
pub fn run<W: Write, E: Write>(cli: &Cli, config: &Config, renderer: Renderer, out: &mut W, err: &mut E) -> Result<u8> {
    debug!(?cli, "run: called");

    let store: Box<dyn ContentStore> = match &config.content_root {
        Some(root) => Box::new(FsStore::new(root)),
        None => Box::new(BundledStore),
    };

    if cli.list {
        return match list_topics(store.as_ref()) {
            Ok(topics) => {
                renderer.render_topics(out, &topics)?;
                Ok(EXIT_OK)
            }
            Err(e) => fail(renderer, err, e),
        };
    }

    let topic = match cli.topic.as_deref().map(Topic::parse).transpose() {
        Ok(topic) => topic.flatten(),
        Err(e) => return fail(renderer, err, e),
    };

    let Some(topic) = topic else {
        debug!("run: no topic given, showing help");
        write!(out, "{}", help_text()).context("Failed to write help")?;
        return Ok(EXIT_OK);
    };

    let resolution = match resolve(&topic, store.as_ref()) {
        Ok(resolution) => resolution,
        Err(e) => return fail(renderer, err, e),
    };
    let Some(path) = resolution.path() else {
        return fail(
            renderer,
            err,
            DocError::NotFound {
                topic: topic.to_string(),
            },
        );
    };

    let content = match read_document(store.as_ref(), path) {
        Ok(content) => content,
        Err(e) => return fail(renderer, err, e),
    };

    render(renderer, cli.format, out, &topic, &resolution, &content)?;
    info!(%topic, bytes = content.len(), "Rendered document");
    Ok(EXIT_OK)
}

fn render<W: Write>(
    renderer: Renderer,
    format: OutputFormat,
    out: &mut W,
    topic: &Topic,
    resolution: &Resolution,
    content: &[u8],
) -> Result<()> {
    match format {
        OutputFormat::Text => renderer
            .render_document(out, topic, resolution, content)
            .context("Failed to write document"),
        OutputFormat::Json => renderer.render_json(out, topic, resolution, content),
    }
}

fn fail<E: Write>(renderer: Renderer, err: &mut E, error: DocError) -> Result<u8> {
    info!(%error, "Lookup failed");
    renderer.render_error(err, &error).context("Failed to write error")?;
    Ok(error.exit_code())
}
