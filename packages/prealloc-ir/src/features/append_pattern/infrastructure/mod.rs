//! Append pattern infrastructure

mod body_scanner;

pub use body_scanner::scan_loop_body;
