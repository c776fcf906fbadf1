//! Shared test helpers for `reelbreak-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that
//! behaviour tests can focus on the flow instead of boilerplate.

pub mod pages;
pub mod stores;

pub use pages::{MockAssetResolver, MockPageView};
pub use stores::MockStateStore;
