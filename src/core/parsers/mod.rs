pub mod tsx;

pub use tsx::{ExtractedComments, ParsedTsx, parse_tsx_source};
