//! UI components built with Leptos.
//!
//! - [`LandingPage`] - Page shell (header, hero, pricing, footer)
//! - [`nav`] - Auth-dependent navigation buttons and user menu
//! - [`auth_modal`] - Sign-in / sign-up modal
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod auth_modal;
pub mod icons;
pub mod landing;
pub mod nav;

pub use landing::LandingPage;
