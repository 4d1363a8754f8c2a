mod cards;
mod extraction;
mod view_state;

pub use cards::*;
pub use extraction::*;
pub use view_state::*;
