pub mod error;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod types;

pub use error::*;
pub use node::*;
pub use parser::*;
pub use types::*;
