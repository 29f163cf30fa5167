//! Public page view models.
//!
//! Each page builds a language-resolved view from the shared content
//! snapshot. Sections with zero items are omitted from the serialized
//! view, so a fully unconfigured backend still renders a usable, if
//! empty, site.

pub mod about;
pub mod blog;
pub mod contact;
pub mod gallery;
pub mod home;
pub mod team;
pub mod work;
