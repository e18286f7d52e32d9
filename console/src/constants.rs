//! Fixed delays, durations and user-facing copy shared by the console

use std::time::Duration;

/// Notification feed constants
pub mod notifications {
    use super::Duration;

    /// How long a notification stays visible before it removes itself
    pub const DISPLAY_DURATION: Duration = Duration::from_secs(4);

    /// Capacity of the broadcast channel feeding renderers
    pub const EVENT_CHANNEL_CAPACITY: usize = 256;
}

/// Page reload delays scheduled after broad server-side changes
pub mod reload {
    use super::Duration;

    /// Reload after the reverse proxy confirmed its restart
    pub const AFTER_PROXY_RESTART: Duration = Duration::from_millis(1500);

    /// Reload after the proxy dropped the connection while restarting
    pub const AFTER_PROXY_DISCONNECT: Duration = Duration::from_millis(2500);

    /// Reload after boot menus were regenerated
    pub const AFTER_MENU_REGENERATION: Duration = Duration::from_millis(1000);
}

/// Control-plane endpoints, relative to the console base URL
pub mod endpoints {
    /// Prefix the control plane is mounted under behind the proxy
    pub const ADMIN_PREFIX: &str = "/admin";

    pub const PROXY_RESTART: &str = "/admin/nginx/restart";

    pub const MENUS_REGENERATE: &str = "/admin/api/menus/regenerate";

    pub const SYSTEM_STATUS: &str = "/admin/api/system/status";
}

/// Fixed action identifiers used as control and action targets
pub mod targets {
    pub const RESTART_PROXY: &str = "restart-proxy";

    pub const REGENERATE_MENUS: &str = "regenerate-menus";

    pub const DHCP: &str = "dhcp";

    pub const TFTP: &str = "tftp";
}

/// User-facing copy
pub mod messages {
    pub const PROXY_RESTART_PROMPT: &str =
        "Restart NGINX server?\n\nNote: The page may reload and reconnect automatically.";
    pub const PROXY_RESTART_OVERLAY: &str = "Restarting NGINX...";
    pub const PROXY_RESTART_BUSY_LABEL: &str = "Restarting...";
    pub const PROXY_RESTART_IDLE_LABEL: &str = "Restart NGINX";
    pub const PROXY_RESTART_SUCCESS: &str = "NGINX restarted successfully!";
    pub const PROXY_RESTART_DISCONNECT: &str = "NGINX restarting... Page will reload.";

    pub const MENUS_PROMPT: &str = "Regenerate iPXE menus from images.yaml?";
    pub const MENUS_OVERLAY: &str = "Regenerating menus...";
    pub const MENUS_BUSY_LABEL: &str = "Regenerating...";
    pub const MENUS_IDLE_LABEL: &str = "Regenerate Menus";
    pub const MENUS_SUCCESS: &str = "Menus regenerated successfully!";

    /// Shown when a failed response carries no error text
    pub const UNKNOWN_ERROR: &str = "Unknown error";

    /// Shown when the response body is not a valid action envelope
    pub const MALFORMED_RESPONSE: &str = "Malformed response from control plane";
}
