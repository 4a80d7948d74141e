use serde::Serialize;
use std::path::Path;

use crate::error::{CostError, Result};

const SECTION_PREFIX: &str = "## ";

/// One level-2 section of the backlog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub content: String,
}

impl Section {
    /// True when the section has no visible body text
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Read the raw backlog markdown
pub fn read_backlog(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CostError::ReadBacklog {
        path: path.to_path_buf(),
        source,
    })
}

/// Split a document into its `## ` sections, in document order.
///
/// Text before the first heading belongs to no section and is dropped.
pub fn split_sections(document: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in document.split('\n') {
        if let Some(heading) = line.strip_prefix(SECTION_PREFIX) {
            if let Some((name, body)) = current.take() {
                sections.push(Section {
                    name,
                    content: body.join("\n"),
                });
            }
            current = Some((heading.trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((name, body)) = current {
        sections.push(Section {
            name,
            content: body.join("\n"),
        });
    }

    sections
}
