// Resume ingestion: multipart upload, the fire-and-forget processing
// pipeline, and materialization of parsed profiles into milestones.

pub mod handlers;
pub mod materializer;
pub mod pipeline;
