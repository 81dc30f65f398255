//! Selector and source loading shared by all commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use pathsel_html::HtmlTree;

/// Failures while gathering command input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("selector is required: use positional argument, -q/--query, or --query-file")]
    MissingSelector,

    #[error("selector cannot be empty")]
    EmptySelector,

    #[error("source is required: use positional argument or -s/--source")]
    MissingSource,

    #[error("selector and source cannot both be read from stdin")]
    BothFromStdin,

    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error(transparent)]
    Html(#[from] pathsel_html::Error),
}

/// Where the selector text comes from. Inline text wins over a file.
#[derive(Debug, Default)]
pub struct SelectorInput {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
}

impl SelectorInput {
    pub fn load(&self) -> Result<String, InputError> {
        let text = match (&self.text, &self.file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => read_path(path)?,
            (None, None) => return Err(InputError::MissingSelector),
        };
        if text.trim().is_empty() {
            return Err(InputError::EmptySelector);
        }
        Ok(text.trim().to_owned())
    }

    fn reads_stdin(&self) -> bool {
        self.text.is_none() && self.file.as_deref().is_some_and(is_stdin)
    }
}

/// Where the HTML comes from. Inline text wins over a path.
#[derive(Debug, Default)]
pub struct SourceInput {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
}

impl SourceInput {
    pub fn load(&self, selector: &SelectorInput) -> Result<String, InputError> {
        match (&self.text, &self.path) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) if is_stdin(path) && selector.reads_stdin() => {
                Err(InputError::BothFromStdin)
            }
            (None, Some(path)) => read_path(path),
            (None, None) => Err(InputError::MissingSource),
        }
    }

    pub fn parse(&self, selector: &SelectorInput) -> Result<HtmlTree, InputError> {
        let source = self.load(selector)?;
        let tree = HtmlTree::parse(&source)?;
        tracing::debug!(nodes = tree.len(), bytes = source.len(), "parsed source");
        Ok(tree)
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_path(path: &Path) -> Result<String, InputError> {
    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(InputError::Stdin)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Print `error: ...` and exit with status 1.
pub fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1)
}
