pub mod color;
pub mod fields;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod scanner;
pub mod sources;
pub mod strings;

pub use parser::MapInfoError;
pub use registry::Registry;
pub use sources::{Lump, load_order};
pub use strings::{StringMap, StringTable};
