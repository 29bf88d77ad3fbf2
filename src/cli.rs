//! Command-line front end: link or unlink a span of a one-paragraph document
//!
//! Offsets are character positions in `--text`, written `START..END`.
//!
//! ```text
//! inline-link --text "see the docs" --select 8..12 --href docs.rs --target _blank
//! inline-link --text "see the docs" --link 8..12=https://docs.rs --select 8..12 --remove
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use crate::config::ToolConfig;
use crate::diagnostics::Diagnostic;
use crate::dom::{Document, ElementData, NodeId, Range, Selection};
use crate::messages::{MenuMsg, Msg};
use crate::model::{LinkAttributes, INVALID_URL_HINT};
use crate::mutator;
use crate::tool::{InlineTool, LinkTool};
use crate::util::prepare_link;

/// Add or remove hyperlinks in a paragraph of text
#[derive(Parser, Debug)]
#[command(name = "inline-link", version, about = "Add or remove inline hyperlinks")]
pub struct CliArgs {
    /// Paragraph text to edit
    #[arg(long)]
    pub text: String,

    /// Existing link in the paragraph before editing (repeatable)
    #[arg(long = "link", value_name = "START..END=URL")]
    pub links: Vec<LinkSpan>,

    /// Selected characters the tool acts on
    #[arg(long, value_name = "START..END")]
    pub select: Option<Span>,

    /// URL to link the selection to
    #[arg(long, conflicts_with = "remove")]
    pub href: Option<String>,

    /// Window target for the new link
    #[arg(long, requires = "href")]
    pub target: Option<String>,

    /// `rel` value for the new link
    #[arg(long, requires = "href")]
    pub rel: Option<String>,

    /// Remove the link around the selection
    #[arg(long)]
    pub remove: bool,

    /// Print the document tree as JSON instead of HTML
    #[arg(long)]
    pub json: bool,

    /// YAML configuration file (defaults to the user config)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Half-open character span `START..END`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl FromStr for Span {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| format!("expected START..END, got '{}'", s))?;
        let start: usize = start
            .trim()
            .parse()
            .map_err(|_| format!("invalid start offset '{}'", start))?;
        let end: usize = end
            .trim()
            .parse()
            .map_err(|_| format!("invalid end offset '{}'", end))?;
        if start >= end {
            return Err(format!("empty span {}..{}", start, end));
        }
        Ok(Span { start, end })
    }
}

/// Pre-existing link `START..END=URL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    pub span: Span,
    pub href: String,
}

impl FromStr for LinkSpan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (span, href) = s
            .split_once('=')
            .ok_or_else(|| format!("expected START..END=URL, got '{}'", s))?;
        if href.trim().is_empty() {
            return Err(format!("missing URL in '{}'", s));
        }
        Ok(LinkSpan {
            span: span.parse()?,
            href: href.trim().to_string(),
        })
    }
}

/// What to do with the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Only print the document
    Show,
    Add {
        selection: Span,
        href: String,
        target: Option<String>,
        rel: Option<String>,
    },
    Remove {
        selection: Span,
    },
}

/// Validated run configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub text: String,
    pub links: Vec<LinkSpan>,
    pub action: Action,
    pub json: bool,
    pub config_path: Option<PathBuf>,
}

impl CliArgs {
    /// Check offsets against the text and pick the action
    pub fn into_plan(self) -> Result<RunPlan> {
        let len = self.text.chars().count();

        for (i, link) in self.links.iter().enumerate() {
            if link.span.end > len {
                bail!("link {} is past the end of the text ({} chars)", link.span, len);
            }
            if let Some(other) = self.links[..i].iter().find(|o| o.span.overlaps(&link.span)) {
                bail!("links {} and {} overlap", other.span, link.span);
            }
        }

        if let Some(select) = self.select {
            if select.end > len {
                bail!("selection {} is past the end of the text ({} chars)", select, len);
            }
        }

        let action = match (self.href, self.remove, self.select) {
            (None, false, _) => Action::Show,
            (Some(href), _, Some(selection)) => Action::Add {
                selection,
                href,
                target: self.target,
                rel: self.rel,
            },
            (None, true, Some(selection)) => Action::Remove { selection },
            (_, _, None) => bail!("--select is required with --href or --remove"),
        };

        Ok(RunPlan {
            text: self.text,
            links: self.links,
            action,
            json: self.json,
            config_path: self.config,
        })
    }
}

impl RunPlan {
    /// Load the configuration this run asked for
    pub fn load_config(&self) -> Result<ToolConfig> {
        match &self.config_path {
            Some(path) => ToolConfig::load_from(path),
            None => Ok(ToolConfig::load()),
        }
    }

    /// Build the document, apply the action and render the result
    pub fn run(&self, config: ToolConfig) -> Result<String> {
        let (document, paragraph) = self.build_document()?;
        let mut tool = LinkTool::new(document, config);

        match &self.action {
            Action::Show => {}
            Action::Add {
                selection,
                href,
                target,
                rel,
            } => add_link(&mut tool, paragraph, *selection, href, target, rel)?,
            Action::Remove { selection } => remove_link(&mut tool, paragraph, *selection)?,
        }

        if let Some(Diagnostic::Mutation(err)) = tool
            .model()
            .diagnostics
            .iter()
            .find(|d| matches!(d, Diagnostic::Mutation(_)))
        {
            bail!("document not updated: {}", err);
        }

        let model = tool.model();
        if self.json {
            let tree = model
                .document
                .export(model.document.root())
                .ok_or_else(|| anyhow!("document root missing"))?;
            serde_json::to_string_pretty(&tree).context("serializing document")
        } else {
            Ok(model.html())
        }
    }

    /// One `<p>` holding the text, with `--link` spans already wrapped
    fn build_document(&self) -> Result<(Document, NodeId)> {
        let mut doc = Document::new();
        let paragraph = doc.create_element(ElementData::new("p"));
        let text = doc.create_text_node(&self.text);
        doc.append_child(doc.root(), paragraph)?;
        doc.append_child(paragraph, text)?;

        let mut scratch = Selection::new();
        for link in &self.links {
            let range = Range::from_text_offsets(&doc, paragraph, link.span.start, link.span.end)?;
            let attrs = LinkAttributes::new(prepare_link(&link.href), "", "");
            mutator::wrap(&mut doc, &mut scratch, &range, &attrs)
                .with_context(|| format!("linking {}", link.span))?;
        }
        Ok((doc, paragraph))
    }
}

fn select(tool: &mut LinkTool, paragraph: NodeId, span: Span) -> Result<()> {
    let range = Range::from_text_offsets(&tool.model().document, paragraph, span.start, span.end)?;
    tool.surround(Some(range));
    if !tool.model().menu.is_open() {
        bail!("could not open the link menu for {}", span);
    }
    Ok(())
}

fn add_link(
    tool: &mut LinkTool,
    paragraph: NodeId,
    span: Span,
    href: &str,
    target: &Option<String>,
    rel: &Option<String>,
) -> Result<()> {
    select(tool, paragraph, span)?;

    tool.dispatch(Msg::set_input(href));
    if let Some(target) = target {
        if !tool.model().options.has_target(target) {
            bail!("target '{}' is not available", target);
        }
        tool.dispatch(Msg::Menu(MenuMsg::SelectTarget(target.clone())));
    }
    if let Some(rel) = rel {
        if !tool.model().options.has_relation(rel) {
            bail!("rel '{}' is not available", rel);
        }
        tool.dispatch(Msg::Menu(MenuMsg::SelectRelation(rel.clone())));
    }

    if !tool.model().menu.add_visible {
        // Same values as the link already there
        tool.clear();
        return Ok(());
    }

    tool.dispatch(Msg::submit());
    if tool.model().menu.error_visible {
        bail!("{}: '{}'", INVALID_URL_HINT, href);
    }
    Ok(())
}

fn remove_link(tool: &mut LinkTool, paragraph: NodeId, span: Span) -> Result<()> {
    select(tool, paragraph, span)?;
    if !tool.model().menu.remove_visible {
        bail!("no link at {}", span);
    }
    tool.dispatch(Msg::remove());
    Ok(())
}
