pub use path::*;

mod path;
