pub mod hierarchy;
pub mod manager;
pub mod propagate;
pub mod stats;
pub mod types;


pub use hierarchy::*;
pub use manager::*;
pub use propagate::*;
pub use stats::*;
pub use types::*;
