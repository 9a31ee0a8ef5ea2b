// Q&A: intent classification over a fixed vocabulary plus per-intent answer
// builders backed by the timeline and recommendation data.

pub mod answers;
pub mod classifier;
pub mod handlers;
