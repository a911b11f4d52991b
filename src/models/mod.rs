pub mod outcome;
pub mod people;
pub mod request;

pub use outcome::*;
pub use people::*;
pub use request::*;
