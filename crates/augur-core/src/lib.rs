pub mod bundle;
pub mod entry;
mod error;
pub mod flag;
pub mod render;

pub use bundle::{BundleSummary, ReasoningBundle, RejectedAnnotation};
pub use entry::{ReasoningEntry, parse_reasoning_entry};
pub use error::{ParseError, ParseErrorKind};
pub use flag::{FlagSources, use_reasoning_v1};
pub use render::{Row, RowStyle, RowView, render};
