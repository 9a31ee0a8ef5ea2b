pub mod milestone;
pub mod question;
pub mod recommendation;
pub mod resume;
