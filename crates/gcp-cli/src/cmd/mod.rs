pub mod completion;
pub mod path;
pub mod vs;
