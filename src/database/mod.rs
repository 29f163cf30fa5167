//! Persistence layer: typed gateway over the hosted backend.

pub mod entity;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod models;
pub mod supabase;

pub use entity::{Draftable, Entity};
pub use error::{AuthError, GatewayError};
pub use gateway::{AccessMode, Gateway};
