//! GitHub Actions step output writer (`$GITHUB_OUTPUT`)

use crate::error::Result;
use crate::types::LinkResult;
use std::io::Write;
use std::path::{Path, PathBuf};

const DELIMITER: &str = "PROJECTLINK_EOF";

/// Appends `name<<DELIM` blocks to the step output file
pub struct ActionOutput {
    path: PathBuf,
}

impl ActionOutput {
    /// Writer for an explicit output file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writer for `$GITHUB_OUTPUT`, if set
    pub fn from_env() -> Option<Self> {
        std::env::var_os("GITHUB_OUTPUT")
            .filter(|p| !p.is_empty())
            .map(Self::new)
    }

    /// Output file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append named values to the output file.
    ///
    /// Values are written verbatim; the runner does not decode heredoc blocks.
    pub fn write(&self, values: &[(&str, &str)]) -> Result<()> {
        let mut f = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        for (name, value) in values {
            writeln!(f, "{name}<<{DELIMITER}")?;
            writeln!(f, "{value}")?;
            writeln!(f, "{DELIMITER}")?;
        }
        Ok(())
    }

    /// Write the `projectUrl` and `itemId` outputs
    pub fn write_link(&self, result: &LinkResult) -> Result<()> {
        self.write(&[
            ("projectUrl", result.project_url.as_str()),
            ("itemId", result.item_id.as_str()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_link() {
        let dir = TempDir::new().unwrap();
        let output = ActionOutput::new(dir.path().join("output"));
        output
            .write_link(&LinkResult {
                project_url: "https://github.com/orgs/stellarwp/projects/1".into(),
                item_id: "PVTI_1".into(),
            })
            .unwrap();

        let content = std::fs::read_to_string(output.path()).unwrap();
        assert_eq!(
            content,
            "projectUrl<<PROJECTLINK_EOF\n\
             https://github.com/orgs/stellarwp/projects/1\n\
             PROJECTLINK_EOF\n\
             itemId<<PROJECTLINK_EOF\n\
             PVTI_1\n\
             PROJECTLINK_EOF\n"
        );
    }

    #[test]
    fn test_write_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "existing=1\n").unwrap();

        ActionOutput::new(&path).write(&[("itemId", "a")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("existing=1\n"));
        assert!(content.ends_with("itemId<<PROJECTLINK_EOF\na\nPROJECTLINK_EOF\n"));
    }

    #[test]
    fn test_value_written_verbatim() {
        let dir = TempDir::new().unwrap();
        let output = ActionOutput::new(dir.path().join("output"));
        output
            .write(&[("projectUrl", "https://ghe.example.com/orgs/a%20b/projects/1")])
            .unwrap();

        let content = std::fs::read_to_string(output.path()).unwrap();
        assert_eq!(
            content,
            "projectUrl<<PROJECTLINK_EOF\n\
             https://ghe.example.com/orgs/a%20b/projects/1\n\
             PROJECTLINK_EOF\n"
        );
    }
}
