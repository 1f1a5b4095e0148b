//! Model to entity mappers
//!
//! `From`/`TryFrom<Model> for Entity` convert database rows to domain objects.
//! Rows carrying enumerated text columns map fallibly.

mod notification;
mod post;
mod user;

pub use notification::media_list;
pub use post::authored_posts;
