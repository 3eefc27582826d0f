mod interaction;

pub use interaction::{InteractionController, InteractionState};
