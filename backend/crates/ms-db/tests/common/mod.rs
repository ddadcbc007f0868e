#![allow(dead_code)]

mod fixtures;
mod test_db;

pub use fixtures::{create_test_member, create_test_order};
pub use test_db::create_test_pool;
