//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod guild;
pub mod panel;
pub mod panel_message;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use guild::{Column as GuildColumn, Entity as Guild, Model as GuildModel};
pub use panel::{Column as PanelColumn, Entity as Panel, Model as PanelModel, PanelType};
pub use panel_message::{
    Column as PanelMessageColumn, Entity as PanelMessage, Model as PanelMessageModel,
};
