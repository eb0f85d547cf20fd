//! Types shared by the widget registry, the renderer and the editor.
//!
//! Widget view functions live with the registry but produce render nodes that the
//! renderer assembles into a page, so the render tree and the responsive/theme
//! vocabulary sit here where both sides can reach them.

pub mod breakpoint;
pub mod store;
pub mod theme;
pub mod vdom;

pub use breakpoint::{Breakpoint, ByBreakpoint};
pub use store::StoreContext;
pub use theme::ThemeTokens;
pub use vdom::{CssRule, VNode};
