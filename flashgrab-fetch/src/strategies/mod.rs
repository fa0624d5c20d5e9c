//! Built-in extraction strategies.
//!
//! - [`JsonLdStrategy`] - Reads `application/ld+json` script blocks
//! - [`MarkupStrategy`] - Pairs elements whose class names mention
//!   "question" or "answer"

mod jsonld;
mod markup;

pub use jsonld::JsonLdStrategy;
pub use markup::MarkupStrategy;
