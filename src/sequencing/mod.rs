pub mod melody;
pub mod note;

pub use melody::{assemble, demo, Melody};
pub use note::Note;
