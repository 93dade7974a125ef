//! Combined options and batch conversion.
//!
//! [`ConvertOptions`] carries the options of both directions, usually derived
//! from one style dictionary. Batches of independent inputs are converted in
//! parallel with Rayon; results keep input order.
//!
//! # Example
//!
//! ```
//! use draftmark::convert::{markdown_to_documents, ConvertOptions};
//!
//! fn main() -> draftmark::Result<()> {
//!     let options = ConvertOptions::default();
//!     let docs = markdown_to_documents(&["# One", "*two*"], &options);
//!     assert_eq!(docs.len(), 2);
//!     assert_eq!(docs[0].as_ref().unwrap().blocks[0].text, "One");
//!     Ok(())
//! }
//! ```

use crate::config::StyleOverrides;
use crate::error::Result;
use crate::model::Document;
use crate::parser::{markdown_to_document, ParseOptions};
use crate::render::{to_markdown, RenderOptions};
use rayon::prelude::*;

/// Options for both conversion directions.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Markdown → document options
    pub parse: ParseOptions,

    /// Document → Markdown options
    pub render: RenderOptions,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive both directions' options from one style dictionary.
    pub fn from_overrides(overrides: &StyleOverrides) -> Self {
        Self {
            parse: ParseOptions::from_overrides(overrides),
            render: RenderOptions::from_overrides(overrides),
        }
    }

    /// Load a style dictionary from JSON and derive options from it.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_overrides(&StyleOverrides::from_json(json)?))
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }
}

/// Convert many Markdown inputs in parallel.
pub fn markdown_to_documents<S>(inputs: &[S], options: &ConvertOptions) -> Vec<Result<Document>>
where
    S: AsRef<str> + Sync,
{
    log::debug!("Converting {} Markdown inputs", inputs.len());
    inputs
        .par_iter()
        .map(|md| markdown_to_document(md.as_ref(), &options.parse))
        .collect()
}

/// Render many documents to Markdown in parallel.
pub fn documents_to_markdown(docs: &[Document], options: &ConvertOptions) -> Vec<Result<String>> {
    log::debug!("Rendering {} documents", docs.len());
    docs.par_iter()
        .map(|doc| to_markdown(doc, &options.render))
        .collect()
}
