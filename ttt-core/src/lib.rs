pub mod board;
pub mod rendering;
pub mod session;

// Re-export main components
pub use board::*;
pub use rendering::*;
pub use session::*;
