// Resume extraction pipeline: raw document bytes -> plain text -> line
// sequence -> typed profile. Every field extractor is a pure, total function
// so a sparse or garbled resume degrades to an empty profile, never an error.

pub mod dates;
pub mod entries;
pub mod parser;
pub mod personal_info;
pub mod profile;
pub mod segmenter;
pub mod skills;
pub mod summary;
pub mod text_extractor;
