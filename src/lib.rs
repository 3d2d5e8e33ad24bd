// Public library interface for reqmap.
// The dashboard embeds the layout engine; the debug CLI drives it from a file.

pub mod estimate;
pub mod layout;

pub use layout::{layout, layout_many, layout_with_log, Item, LayoutConfig, LayoutJob, Node, Rect};
