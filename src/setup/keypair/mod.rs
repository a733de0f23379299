mod public;
mod secret;

pub use public::*;
pub use secret::*;
