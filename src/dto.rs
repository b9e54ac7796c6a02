pub mod health;
pub mod todo;

pub use health::*;
pub use todo::*;
