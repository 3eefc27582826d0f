mod events;

pub use events::{EditorEvent, Outcome};
