//! Value objects - immutable types that represent domain concepts

mod page;
mod snowflake;

pub use page::{Page, PageRequest};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
