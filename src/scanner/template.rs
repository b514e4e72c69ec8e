use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

/// Template prefix looked up relative to the working directory.
pub const DEFAULT_TEMPLATE_PATH: &str = "template/prefix.txt";

/// Header text prepended to every batch report.
#[derive(Debug, Clone)]
pub struct Template {
    content: String,
}

impl Template {
    pub fn new(content: String) -> Self {
        Self { content }
    }

    /// Fill the first bare `Software:` line with `software` and make sure
    /// the header ends with a newline.
    pub fn render(&self, software: &str) -> String {
        let mut filled = false;
        let mut out = self
            .content
            .split('\n')
            .map(|line| {
                if !filled && line.trim() == "Software:" {
                    filled = true;
                    format!("Software: {}", software)
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

/// Load a template prefix; a missing file means "no template".
pub fn load_template(path: &Path) -> Result<Option<Template>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(Template::new(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => {
            Err(e).with_context(|| format!("failed to read template {}", path.display()))
        }
    }
}
