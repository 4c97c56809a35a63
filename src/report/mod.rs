//! Report rendering for pgvet
//!
//! Turns ranked findings into a Markdown document. Numbers in tables are
//! grouped per the user's locale; sizes in prose use binary units.

mod locale;
mod printer;
mod table;

pub use locale::{parse_locale, NumberFormat};
pub use printer::{ReportPrinter, Source};
pub use table::{Cell, MarkdownTable};
