pub mod compose;
pub mod outlet;
pub mod privacy;
pub mod quality;
pub mod research;
pub mod workflow;
