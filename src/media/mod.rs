pub mod encoder;
pub mod error;

pub use encoder::ImageEncoder;
pub use error::ImageError;
