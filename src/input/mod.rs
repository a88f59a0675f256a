pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{EventHandled, InputEvent, MouseButton, PointerEvent, PointerType, WheelEvent};
pub use handler::{DragSession, InteractionContext, InteractionController};
