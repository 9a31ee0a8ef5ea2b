// Mock job/course recommendation generators and their handlers. Stand-ins
// for real job-board and course-catalog integrations.

pub mod handlers;
pub mod mock;
