pub mod analyzer;
pub mod cli;
pub mod indexer;
pub mod patterns;
pub mod scanner;
pub mod sfc;
pub mod stubs;
pub mod types;
pub mod vfor;

// Re-export commonly used types
pub use analyzer::VueAnalyzer;
pub use indexer::{
    ImplicitElementIndexer, IndexRegistry, IndexingData, OccurrenceSink, COMPONENTS_INDEX_ID,
    OPTIONS_INDEX_ID,
};
pub use patterns::{match_descriptor, DescriptorMatch};
pub use scanner::{ScanConfig, SourceScanner};
pub use sfc::{extract_script_block, ScriptBlock};
pub use stubs::is_significant_literal;
pub use types::*;
pub use vfor::{IterableElementType, LoopVariableTypeForwarder};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
