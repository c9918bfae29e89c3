pub mod async_resource;

pub use async_resource::{AsyncResource, RefreshReason, ResourceOptions, ResourceSnapshot};
