pub mod creation;
pub mod image;
pub mod slots;
pub mod style;
pub mod wire;

pub use creation::*;
pub use image::*;
pub use slots::*;
pub use style::*;
pub use wire::*;
