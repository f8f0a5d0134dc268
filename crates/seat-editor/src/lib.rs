pub mod editor;
pub mod input;
pub mod tools;

pub use editor::Editor;
pub use input::{CanvasOrigin, InputEvent};
pub use tools::{DragTool, MarqueeTool, Tool, ToolContext, ToolKind};
