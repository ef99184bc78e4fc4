//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowRight as ArrowRight, LuBriefcase as Brand, LuCircleAlert as Alert,
        LuCircleCheck as Success, LuGauge as Dashboard, LuLoaderCircle as Spinner,
        LuLogOut as SignOut, LuSettings as Settings, LuUser as User, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowRight as ArrowRight, BsArrowRepeat as Spinner, BsBoxArrowRight as SignOut,
        BsBriefcaseFill as Brand, BsCheckCircle as Success, BsExclamationCircle as Alert,
        BsGear as Settings, BsPerson as User, BsSpeedometer2 as Dashboard, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(ALERT, Alert);
themed_icon!(ARROW_RIGHT, ArrowRight);
themed_icon!(BRAND, Brand);
themed_icon!(CLOSE, Close);
themed_icon!(DASHBOARD, Dashboard);
themed_icon!(SETTINGS, Settings);
themed_icon!(SIGN_OUT, SignOut);
themed_icon!(SPINNER, Spinner);
themed_icon!(SUCCESS, Success);
themed_icon!(USER, User);
