//! # Pagecraft Document Model
//!
//! The page document edited by the canvas and rendered by the storefront.
//!
//! ```text
//! PageDocument
//!   └─ Section (vertical stacking, ordered)
//!        └─ Row (12-column grid, ordered)
//!             └─ WidgetBase (left → right)
//! ```
//!
//! Sections are held behind `Arc` so a document clone shares every section with
//! its source; mutating a section through [`PageDocument::section_mut`] (or any of
//! the row/widget lookups) copies only that section. Undo snapshots are therefore
//! cheap clones of the section list.

pub mod id_generator;
pub mod model;
pub mod slug;
pub mod style;
pub mod template;
pub mod tree;
pub mod validate;
pub mod visitor;

pub use id_generator::{new_page_id, IdGenerator};
pub use model::{
    AnalyticsSettings, ColSpan, CustomCode, NavigationPlacement, PageDocument, PageStatus,
    PublishEvent, Row, RowAlignment, Section, SectionBackground, SeoSettings, Visibility,
    WidgetBase, GRID_COLUMNS,
};
pub use slug::{is_valid_slug, slugify, HOME_SLUG};
pub use style::{
    BackgroundSettings, BorderSettings, ResponsiveSettings, ShadowSettings, SpacingSettings,
    StyleSettings, TypographySettings,
};
pub use template::PageTemplate;
pub use tree::{RowLocation, WidgetLocation};
pub use validate::{validate_document, DocumentError, DocumentIssue, RESERVED_WIDGET_ID_PREFIXES};
pub use visitor::{Visitor, VisitorMut};

pub use pagecraft_common::{Breakpoint, ByBreakpoint, ThemeTokens};
