//! Core attribute model for CA 7 LJOB job-scheduler listings.
//!
//! This crate defines the shared vocabulary for LJOB parsing:
//!
//! - [`Section`] — the closed set of listing sections, with the precedence
//!   order used by bare-token lookup.
//! - [`HeaderAttribute`], [`JobInformationAttribute`],
//!   [`AgentInformationAttribute`], [`ProseAttribute`] — one closed
//!   registry of labeled attributes per section, matched case-insensitively
//!   by token.
//! - [`Attribute`] — any attribute of any section as a single value.
//! - [`AttributeStore`] — the first-wins mapping a parse produces, with
//!   sectioned and precedence-ordered lookups.
//! - [`ParseError`] / [`ParseWarning`] — the fatal and recoverable
//!   condition types shared with the parser.
//!
//! # Example
//!
//! ```
//! use ljob_core::{Attribute, AttributeStore, JobInformationAttribute, Section};
//!
//! let mut store = AttributeStore::new();
//! store.insert_first(
//!     Attribute::JobInformation(JobInformationAttribute::Msgclass),
//!     "B",
//! );
//!
//! // Bare tokens resolve through section precedence; sectioned lookups
//! // are independent of every other section.
//! assert_eq!(store.get("msgclass"), Some("B"));
//! assert_eq!(store.get_in(Section::JobInformation, "MSGCLASS"), Some("B"));
//! assert_eq!(store.get_in(Section::Header, "MSGCLASS"), None);
//! ```

mod attribute;
mod error;
mod section;
mod store;

pub use attribute::{
    AgentInformationAttribute, Attribute, HeaderAttribute, JobInformationAttribute,
    ProseAttribute, match_any_token, match_in_section,
};
pub use error::{ParseError, ParseWarning};
pub use section::Section;
pub use store::{AttributeStore, StoreEntry};
