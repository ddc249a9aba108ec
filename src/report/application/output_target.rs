use std::path::PathBuf;

/// Where a finished report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Written to the caller's console sink, with colour if it is a terminal.
    Stdout,
    /// Written as plain Markdown to a file; the console only gets a confirmation.
    File(PathBuf),
}

impl From<Option<PathBuf>> for OutputTarget {
    fn from(outfile: Option<PathBuf>) -> Self {
        match outfile {
            Some(path) => OutputTarget::File(path),
            None => OutputTarget::Stdout,
        }
    }
}
