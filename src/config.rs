//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Auth service endpoints are taken from the build environment so the same
//! sources can target a local stack or the hosted project.

// =============================================================================
// Application Metadata
// =============================================================================

/// Product name used in page and modal copy.
pub const APP_NAME: &str = "JobAI";

/// Hero tagline.
pub const APP_TAGLINE: &str = "Land your next role faster with AI-matched job applications";

// =============================================================================
// Auth Service Configuration
// =============================================================================

/// Base URL of the hosted auth project (`JOBAI_SUPABASE_URL` at build time).
pub const SUPABASE_URL: &str = match option_env!("JOBAI_SUPABASE_URL") {
    Some(url) => url,
    None => "http://localhost:54321",
};

/// Public anon key sent as the `apikey` header (`JOBAI_SUPABASE_ANON_KEY`).
pub const SUPABASE_ANON_KEY: &str = match option_env!("JOBAI_SUPABASE_ANON_KEY") {
    Some(key) => key,
    None => "",
};

/// localStorage key for the persisted session.
pub const SESSION_STORAGE_KEY: &str = "jobai.auth.session";

/// Sessions expiring within this many seconds are refreshed before use.
pub const SESSION_REFRESH_MARGIN_SECS: i64 = 60;

// =============================================================================
// Credential Modal
// =============================================================================

/// Minimum password length accepted before contacting the auth service.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Modal timing constants (milliseconds).
pub mod modal_delays {
    /// Delay between sign-in success and closing + reloading the page.
    pub const SIGN_IN_RELOAD: u32 = 1000;
    /// Delay between sign-up success and switching to sign-in mode.
    pub const SIGN_UP_SWITCH: u32 = 2000;
    /// Lifetime of an error or success notice.
    pub const NOTICE_HIDE: u32 = 5000;
}

/// User-facing modal messages.
pub mod messages {
    pub const MISSING_FIELDS: &str = "Please fill in all fields";
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
    pub const UNEXPECTED: &str = "An unexpected error occurred. Please try again.";
    pub const SIGNED_UP: &str = "Account created successfully! You can now sign in.";
    pub const SIGNED_IN: &str = "Signed in successfully!";
}

// =============================================================================
// Call-to-action Gating
// =============================================================================

/// CTA labels that require a signed-in user.
pub const GATED_CTA_LABELS: &[&str] = &["Try Now", "Get Started", "Start Free Trial"];

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
