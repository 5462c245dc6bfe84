// Per-file analysis: parse a source string (or the script block of a
// single-file component), visit every node once in source order, and collect
// the implicit elements and stub-significant literals the core recognizes.

use std::fs;
use std::path::Path;

use tracing::debug;
use tree_sitter::{Node, Parser};

use crate::indexer::{ImplicitElementIndexer, IndexRegistry, IndexingData, OccurrenceSink};
use crate::patterns::{self, node_text};
use crate::sfc;
use crate::stubs;
use crate::types::{
    AnalysisError, FileAnalysis, FileContext, FileKind, ImplicitElementRecord, Result, StubRecord,
};

/// Vue-aware analyzer over JavaScript sources.
///
/// Holds the parser and the index registry; one analyzer per thread, one
/// parse per file. No state is carried across files.
pub struct VueAnalyzer {
    parser: Parser,
    registry: IndexRegistry,
}

impl VueAnalyzer {
    pub fn new() -> Result<Self> {
        Self::with_registry(IndexRegistry::default())
    }

    /// Use a host-constructed registry instead of the default identifiers.
    pub fn with_registry(registry: IndexRegistry) -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_javascript::LANGUAGE.into();
        parser.set_language(&language)?;
        Ok(Self { parser, registry })
    }

    pub fn registry(&self) -> &IndexRegistry {
        &self.registry
    }

    /// Analyze one file from disk; the context (script vs single-file
    /// component) is derived from the path.
    pub fn analyze_file(&mut self, path: &Path) -> Result<FileAnalysis> {
        let source = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let context = FileContext::from_path(path);
        let mut analysis = self.analyze_source(&source, &context)?;
        analysis.file = path.display().to_string();
        Ok(analysis)
    }

    /// Analyze an in-memory source under the given file context.
    pub fn analyze_source(&mut self, source: &str, context: &FileContext) -> Result<FileAnalysis> {
        self.run(source, context, None)
    }

    /// Analyze and additionally emit one occurrence per implicit element
    /// whose index key has a registered identifier.
    pub fn index_source(
        &mut self,
        source: &str,
        context: &FileContext,
        sink: &mut dyn OccurrenceSink,
    ) -> Result<FileAnalysis> {
        self.run(source, context, Some(sink))
    }

    fn run(
        &mut self,
        source: &str,
        context: &FileContext,
        sink: Option<&mut dyn OccurrenceSink>,
    ) -> Result<FileAnalysis> {
        // Only the script block of a single-file component is JavaScript.
        let (script, line_offset) = match context.kind {
            FileKind::SingleFileComponent => match sfc::extract_script_block(source) {
                Some(block) => (block.content(source), block.line_offset),
                None => {
                    debug!(file = %context.file_name, "no script block, nothing to index");
                    return Ok(FileAnalysis::empty(context));
                }
            },
            FileKind::Script => (source, 0),
        };

        let tree = self
            .parser
            .parse(script, None)
            .ok_or_else(|| AnalysisError::Parse(context.file_name.clone()))?;
        let bytes = script.as_bytes();

        let indexer = ImplicitElementIndexer::new(&self.registry);
        let mut data = IndexingData::new();
        let mut stub_nodes = Vec::new();
        visit(
            tree.root_node(),
            bytes,
            context,
            &indexer,
            &mut data,
            &mut stub_nodes,
        );

        if let Some(sink) = sink {
            indexer.index_all(&data, sink);
        }

        let implicit_elements = data
            .elements()
            .iter()
            .map(|element| ImplicitElementRecord {
                name: element.name.clone(),
                index_key: element.index_key,
                line: element.declaration.start_position().row + 1 + line_offset,
                column: element.declaration.start_position().column,
            })
            .collect();
        let stub_literals = stub_nodes
            .iter()
            .map(|node| StubRecord {
                value: node_text(*node, bytes).to_string(),
                line: node.start_position().row + 1 + line_offset,
            })
            .collect();

        Ok(FileAnalysis {
            file: context.file_name.clone(),
            kind: context.kind,
            implicit_elements,
            stub_literals,
        })
    }
}

// One pass over the tree in source order; properties feed the indexer,
// literals feed the stub policy.
fn visit<'tree>(
    node: Node<'tree>,
    source: &[u8],
    context: &FileContext,
    indexer: &ImplicitElementIndexer<'_>,
    data: &mut IndexingData<'tree>,
    stub_nodes: &mut Vec<Node<'tree>>,
) {
    if patterns::is_property(&node) {
        indexer.on_property_visited(node, source, context, data);
    }
    if stubs::is_significant_literal(node, source, context) {
        stub_nodes.push(node);
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit(child, source, context, indexer, data, stub_nodes);
    }
}
