//! Service test support.

pub(crate) mod helpers;

pub(crate) use context::TestContext;
