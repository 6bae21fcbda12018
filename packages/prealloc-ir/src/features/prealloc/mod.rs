//! Prealloc Feature
//!
//! Ties the other features together: walks every block of a file, feeds
//! statements to the candidate tracker, and for each enabled loop combines
//! its trip count with the appends found in its body.
//!
//! ## Structure
//! - `application/` - BlockAnalyzer, analyze_file

pub mod application;
