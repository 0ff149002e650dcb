//! Name handling: picking family/subfamily strings out of naming records,
//! stripping style keywords and making names safe for the filesystem.

pub mod keywords;
pub mod resolver;
pub mod sanitize;

pub use keywords::{KeywordFilter, title_case};
pub use resolver::{NameKind, NamingRecord, ResolvedName, resolve, resolve_name};
pub use sanitize::{NameContext, sanitize};
