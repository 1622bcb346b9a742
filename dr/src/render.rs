//! Turning resolutions into user-visible output
//!
//! Document text always goes to the `out` writer verbatim. Headers, footers
//! and notices are decoration around it and may be colorized.

use std::io::Write;
use std::path::Path;

use colored::*;
use eyre::Result;
use serde::Serialize;
use tracing::debug;

use crate::error::DocError;
use crate::resolver::{DocKind, Resolution, is_advanced_topic};
use crate::topic::Topic;

const RULE: &str = "────";

/// JSON shape of a rendered document
#[derive(Debug, Serialize)]
pub struct DocumentReport<'a> {
    pub topic: &'a str,
    pub kind: DocKind,
    pub path: &'a Path,
    pub has_advanced: bool,
    pub advanced_topic: Option<String>,
    pub content: String,
}

/// Writes documents, notices and errors
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color { style(text).to_string() } else { text.to_string() }
    }

    /// Write a found document framed by a header and footer.
    ///
    /// The document bytes are written as-is, whatever their encoding. A basic
    /// document with an advanced companion gets one extra notice line naming
    /// the advanced topic; the advanced content itself is never shown.
    pub fn render_document<W: Write>(
        &self,
        out: &mut W,
        topic: &Topic,
        resolution: &Resolution,
        content: &[u8],
    ) -> std::io::Result<()> {
        debug!(%topic, ?resolution, "Renderer::render_document: called");
        let label = match resolution.kind() {
            Some(DocKind::Advanced) if !topic.is_advanced() => format!("{} (advanced)", topic),
            _ => topic.to_string(),
        };

        writeln!(out, "{}", self.paint(&format!("{RULE} {label} {RULE}"), |s| s.bold()))?;
        out.write_all(content)?;
        if !content.is_empty() && !content.ends_with(b"\n") {
            writeln!(out)?;
        }
        writeln!(out, "{}", self.paint(&format!("{RULE} end of {label} {RULE}"), |s| s.dimmed()))?;

        if resolution.has_advanced() {
            debug!("Renderer::render_document: advanced companion available");
            writeln!(
                out,
                "{} dr {}",
                self.paint("Advanced documentation is available:", |s| s.yellow()),
                self.paint(&topic.advanced(), |s| s.cyan()),
            )?;
        }

        Ok(())
    }

    /// Write a found document as a single JSON object.
    ///
    /// JSON strings must be UTF-8, so invalid sequences are replaced.
    pub fn render_json<W: Write>(
        &self,
        out: &mut W,
        topic: &Topic,
        resolution: &Resolution,
        content: &[u8],
    ) -> Result<()> {
        debug!(%topic, "Renderer::render_json: called");
        let (Some(kind), Some(path)) = (resolution.kind(), resolution.path()) else {
            return Err(eyre::eyre!("Cannot render a document for unresolved topic '{}'", topic));
        };

        let report = DocumentReport {
            topic: topic.as_str(),
            kind,
            path,
            has_advanced: resolution.has_advanced(),
            advanced_topic: resolution.has_advanced().then(|| topic.advanced()),
            content: String::from_utf8_lossy(content).into_owned(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        Ok(())
    }

    /// Write an error notice, with a pointer to help for missing topics
    pub fn render_error<W: Write>(&self, err: &mut W, error: &DocError) -> std::io::Result<()> {
        debug!(?error, "Renderer::render_error: called");
        write!(err, "{} {}", self.paint("error:", |s| s.red().bold()), error)?;
        if let Some(source) = std::error::Error::source(error) {
            write!(err, ": {}", source)?;
        }
        writeln!(err)?;

        if matches!(error, DocError::NotFound { .. }) {
            writeln!(
                err,
                "Run {} without arguments for usage, or {} to see available topics.",
                self.paint("dr", |s| s.cyan()),
                self.paint("dr --list", |s| s.cyan()),
            )?;
        }
        Ok(())
    }

    /// Write one topic per line
    pub fn render_topics<W: Write>(&self, out: &mut W, topics: &[String]) -> std::io::Result<()> {
        debug!(count = topics.len(), "Renderer::render_topics: called");
        if topics.is_empty() {
            writeln!(out, "No topics found")?;
            return Ok(());
        }
        for topic in topics {
            if is_advanced_topic(topic) {
                writeln!(out, "{}", self.paint(topic, |s| s.dimmed()))?;
            } else {
                writeln!(out, "{}", topic)?;
            }
        }
        Ok(())
    }
}
