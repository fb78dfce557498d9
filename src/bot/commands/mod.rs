//! Discord command implementations organized by category.

/// Currency commands: daily, balance, roll
pub mod economy;

/// General utility commands
pub mod general;

// Export commands
pub use economy::*;
pub use general::*;
