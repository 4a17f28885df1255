pub mod create;
pub mod edit;
pub mod list;
pub mod translation;

pub use create::create;
pub use edit::edit;
pub use list::list;
pub use translation::add_translation;
