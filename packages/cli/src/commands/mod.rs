pub mod edit;
pub mod init;
pub mod pages;
pub mod publish;
pub mod render;
pub mod validate;

use clap::Args;

pub use edit::{add_widget, set_prop, AddWidgetArgs, SetPropArgs};
pub use init::{init, InitArgs};
pub use pages::{archive, create, delete, list, slug, widgets, CreateArgs, SlugArgs};
pub use publish::{history, publish, restore, storefront, RestoreArgs};
pub use render::{render, RenderArgs};
pub use validate::{validate, ValidateArgs};

/// A page addressed by id or slug
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page id or slug
    pub page: String,
}
