use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const MANIFEST_FILE: &str = "Bl.toml";

/// Indentation used by the pretty-printer when nothing else is configured.
pub const DEFAULT_INDENT: usize = 3;

/// The parsed Bl.toml manifest.
#[derive(Debug, Clone)]
pub struct BlManifest {
    pub project: ProjectSection,
    pub format: FormatSection,
    pub codegen: CodegenSection,
    /// The directory containing the Bl.toml file.
    pub root_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    #[serde(default)]
    pub entry: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormatSection {
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for FormatSection {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodegenSection {
    /// Run the IF_ELSE simplification pass before generating code.
    #[serde(default)]
    pub simplify: bool,
}

#[derive(Deserialize)]
struct RawManifest {
    project: ProjectSection,
    #[serde(default)]
    format: FormatSection,
    #[serde(default)]
    codegen: CodegenSection,
}

/// Errors that can occur when loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("no Bl.toml found (searched from {0})")]
    NotFound(String),
    #[error("failed to read Bl.toml: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("invalid Bl.toml: {0}")]
    ParseError(String),
    #[error("invalid Bl.toml: [format] indent must be between 1 and 16, got {0}")]
    BadIndent(usize),
    #[error("invalid Bl.toml: [project] entry '{0}' must be a .bl file")]
    BadEntry(String),
}

impl BlManifest {
    /// Entry file resolved against the manifest directory.
    pub fn entry_path(&self) -> Option<PathBuf> {
        self.project
            .entry
            .as_ref()
            .map(|entry| self.root_dir.join(entry))
    }
}

/// Walk up from `start_dir` looking for `Bl.toml`.
pub fn find_manifest(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_manifest(path: &Path) -> Result<BlManifest, ManifestError> {
    let content = std::fs::read_to_string(path)?;
    let root_dir = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    parse_manifest(&content, root_dir)
}

pub fn parse_manifest(content: &str, root_dir: PathBuf) -> Result<BlManifest, ManifestError> {
    let raw: RawManifest =
        toml::from_str(content).map_err(|e| ManifestError::ParseError(e.to_string()))?;

    if !(1..=16).contains(&raw.format.indent) {
        return Err(ManifestError::BadIndent(raw.format.indent));
    }
    if let Some(ref entry) = raw.project.entry {
        if !entry.ends_with(".bl") {
            return Err(ManifestError::BadEntry(entry.clone()));
        }
    }

    Ok(BlManifest {
        project: raw.project,
        format: raw.format,
        codegen: raw.codegen,
        root_dir,
    })
}

/// Find and load the manifest starting from a source file's directory.
pub fn find_and_load_manifest(source_file: &Path) -> Result<BlManifest, ManifestError> {
    let start_dir = source_file.parent().unwrap_or_else(|| Path::new("."));
    let manifest_path = find_manifest(start_dir)
        .ok_or_else(|| ManifestError::NotFound(start_dir.display().to_string()))?;
    load_manifest(&manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
[project]
name = "robots"
"#;
        let manifest = parse_manifest(toml, PathBuf::from(".")).unwrap();
        assert_eq!(manifest.project.name, "robots");
        assert_eq!(manifest.format.indent, DEFAULT_INDENT);
        assert!(!manifest.codegen.simplify);
        assert!(manifest.entry_path().is_none());
    }

    #[test]
    fn parse_full_manifest() {
        let toml = r#"
[project]
name = "robots"
entry = "src/hunter.bl"

[format]
indent = 4

[codegen]
simplify = true
"#;
        let manifest = parse_manifest(toml, PathBuf::from("/work")).unwrap();
        assert_eq!(manifest.format.indent, 4);
        assert!(manifest.codegen.simplify);
        assert_eq!(
            manifest.entry_path(),
            Some(PathBuf::from("/work/src/hunter.bl"))
        );
    }

    #[test]
    fn missing_project_section_fails() {
        let err = parse_manifest("[format]\nindent = 2\n", PathBuf::from(".")).unwrap_err();
        assert!(matches!(err, ManifestError::ParseError(_)));
    }

    #[test]
    fn zero_indent_rejected() {
        let toml = "[project]\nname = \"x\"\n[format]\nindent = 0\n";
        let err = parse_manifest(toml, PathBuf::from(".")).unwrap_err();
        assert!(matches!(err, ManifestError::BadIndent(0)));
    }

    #[test]
    fn entry_must_be_bl_source() {
        let toml = "[project]\nname = \"x\"\nentry = \"main.txt\"\n";
        let err = parse_manifest(toml, PathBuf::from(".")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid Bl.toml: [project] entry 'main.txt' must be a .bl file"
        );
    }

    #[test]
    fn find_manifest_walks_up() {
        let tmp = std::env::temp_dir().join("bl_test_manifest");
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(tmp.join("src/nested")).unwrap();
        std::fs::write(tmp.join(MANIFEST_FILE), "[project]\nname = \"test\"\n").unwrap();

        let found = find_manifest(&tmp.join("src/nested"));
        assert_eq!(found, Some(tmp.join(MANIFEST_FILE)));

        let manifest = find_and_load_manifest(&tmp.join("src/nested/main.bl")).unwrap();
        assert_eq!(manifest.project.name, "test");
        assert_eq!(manifest.root_dir, tmp);

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
