//! # Pagecraft Renderer
//!
//! Turns a [`PageDocument`](pagecraft_document::PageDocument) into a node tree
//! plus stylesheet, for the editor canvas or the public storefront.
//!
//! ```text
//! PageDocument ─┐
//! store theme ──┼─→ render_page ─→ RenderedPage ─→ to_html
//! StoreContext ─┘        │            ├─ root: VNode
//!                        │            ├─ styles: Vec<CssRule>
//!                  WidgetRegistry     └─ diagnostics
//! ```
//!
//! Rendering is pure and never fails. A widget whose type is not registered,
//! or whose custom CSS cannot be read, is skipped with a diagnostic while the
//! rest of the page renders normally.

mod custom_css;
mod diagnostics;
mod html;
pub mod layout;
mod placeholders;
mod renderer;
mod theme;

pub use custom_css::scope_custom_css;
pub use diagnostics::RenderDiagnostic;
pub use html::{render_css, to_html, to_html_fragment, HtmlOptions};
pub use layout::{resolve_col_span, resolve_visibility, Resolved};
pub use placeholders::{substitute_store_name, LEGACY_STORE_NAME, STORE_NAME_PLACEHOLDER};
pub use renderer::{
    render_page, row_element_id, section_element_id, widget_element_id, RenderMode,
    RenderOptions, RenderedPage,
};
pub use theme::{color_variables, page_theme, widget_theme};
