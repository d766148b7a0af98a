//! Stylesheet doc-comment parsing.
//!
//! Three stages, each in its own module:
//!
//! 1. [`comments`] pulls `/** ... */` blocks out of stylesheet text and
//!    strips the ` * ` gutters.
//! 2. [`tags`] splits a normalized block into a free description and a
//!    list of `@tag` entries.
//! 3. [`sections`] turns tagged blocks into the section forest, resolving
//!    `@sectionof` references and grouping sections by `@page`.

pub mod comments;
pub mod sections;
pub mod tags;

pub use comments::extract_blocks;
pub use sections::{RawSection, assemble, collect_raw_sections};
pub use tags::{ParsedComment, Tag, parse_block};
