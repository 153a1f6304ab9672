mod export;
mod list;
mod read;
mod write;

pub use export::handle_export;
pub use list::handle_list;
pub use read::handle_read;
pub use write::handle_write;
