// Core data model shared across the crate: file contexts, index keys,
// implicit elements, and the per-file analysis records.
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tree_sitter::Node;

// Result type alias used throughout the library
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to load the JavaScript grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("failed to parse {0}")]
    Parse(String),

    #[error("invalid scan pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// Which logical index an implicit element's occurrence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKey {
    /// Component descriptors: explicit registrations and SFC exports.
    Components,
    /// Root-instance descriptors linked to a mount point.
    Options,
}

/// Recognized format of the file the visited nodes belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Ordinary JavaScript source.
    Script,
    /// Single-file component bundling template, script, and style sections.
    SingleFileComponent,
}

/// Dialect a stand-alone expression was parsed from. Template-attribute
/// expressions (`v-for`, bindings) get their own dialect so handlers can
/// restrict themselves to template contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionDialect {
    JavaScript,
    VueTemplate,
}

/// Host-supplied facts about the containing file: its recognized format and
/// its name. Borrowed by every matcher call; carries no per-node state.
#[derive(Debug, Clone, PartialEq)]
pub struct FileContext {
    pub kind: FileKind,
    pub file_name: String,
}

impl FileContext {
    pub fn new(kind: FileKind, file_name: impl Into<String>) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
        }
    }

    /// Derive the context from a path: `.vue` files are single-file
    /// components, everything else is treated as ordinary script.
    pub fn from_path(path: &Path) -> Self {
        let kind = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("vue") => FileKind::SingleFileComponent,
            _ => FileKind::Script,
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { kind, file_name }
    }

    pub fn is_single_file_component(&self) -> bool {
        self.kind == FileKind::SingleFileComponent
    }

    /// File name with its last extension stripped; the fallback component
    /// name for single-file components without a `name` property.
    pub fn name_without_extension(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.file_name,
        }
    }
}

/// A synthesized, not-directly-declared symbol produced for indexing.
///
/// Created transiently while one file is visited; the declaration node is
/// borrowed from the host tree and the element never outlives the traversal
/// that produced it. At most one element is produced per object literal.
#[derive(Debug, Clone)]
pub struct ImplicitElement<'tree> {
    /// Symbol name; may be empty for a root-instance descriptor without a
    /// mount-point binding.
    pub name: String,
    pub index_key: IndexKey,
    /// The property node the element was derived from.
    pub declaration: Node<'tree>,
}

impl<'tree> ImplicitElement<'tree> {
    pub fn new(name: impl Into<String>, index_key: IndexKey, declaration: Node<'tree>) -> Self {
        Self {
            name: name.into(),
            index_key,
            declaration,
        }
    }
}

/// Owned, serializable form of an [`ImplicitElement`], valid past the end of
/// the traversal that produced it. Lines are 1-based, columns 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplicitElementRecord {
    pub name: String,
    pub index_key: IndexKey,
    pub line: usize,
    pub column: usize,
}

/// A literal that the stub policy decided to retain, with its raw source
/// text (quotes included for strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StubRecord {
    pub value: String,
    pub line: usize,
}

/// Everything extracted from a single file in one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub file: String,
    pub kind: FileKind,
    pub implicit_elements: Vec<ImplicitElementRecord>,
    pub stub_literals: Vec<StubRecord>,
}

impl FileAnalysis {
    pub fn empty(context: &FileContext) -> Self {
        Self {
            file: context.file_name.clone(),
            kind: context.kind,
            implicit_elements: Vec::new(),
            stub_literals: Vec::new(),
        }
    }

    /// One-line summary for terminal display.
    pub fn summary(&self) -> String {
        format!(
            "File: {} | Implicit elements: {} | Stub literals: {}",
            self.file,
            self.implicit_elements.len(),
            self.stub_literals.len()
        )
    }
}
