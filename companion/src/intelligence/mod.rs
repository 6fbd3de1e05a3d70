pub mod directive;

pub use directive::{extract_filter_directive, DirectiveExtraction, DirectiveOutcome};
