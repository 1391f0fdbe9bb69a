mod aggregator;
mod pipeline;
mod processor;
mod resolver;
mod writer;

pub use aggregator::combine_results;
pub use pipeline::{FailedDocument, PipelineStage, ProcessingPipeline, RunOptions, RunSummary};
pub use processor::DocumentProcessor;
pub use resolver::{is_glob_pattern, PatternResolver};
pub use writer::{individual_file_name, ResultWriter};

/// Suffix a file must carry to be treated as a document.
pub const DOCUMENT_EXTENSION: &str = ".pdf";

fn document_extension_start(name: &str) -> Option<usize> {
    let start = name.len().checked_sub(DOCUMENT_EXTENSION.len())?;
    (name.is_char_boundary(start) && name[start..].eq_ignore_ascii_case(DOCUMENT_EXTENSION))
        .then_some(start)
}

/// Whether `name` ends with the document extension, ignoring ASCII case.
pub fn has_document_extension(name: &str) -> bool {
    document_extension_start(name).is_some()
}

/// `name` with one trailing document extension removed, if present.
pub fn strip_document_extension(name: &str) -> &str {
    match document_extension_start(name) {
        Some(start) => &name[..start],
        None => name,
    }
}
