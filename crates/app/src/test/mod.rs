//! Service test support: a shared Postgres container with a database per test.

mod context;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
