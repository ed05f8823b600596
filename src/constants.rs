// Central constants for display limits and timeouts.
pub const MAX_LIST_ROWS: usize = 10; // list replies truncate here, remote order preserved
pub const REGISTRATION_IDLE_SECS: u64 = 600; // pending registrations evicted after 10 idle minutes
pub const REMOTE_TIMEOUT_SECS: u64 = 15; // overall budget per remote call, no retries

// Fallback card canvas.
pub const CARD_WIDTH: u32 = 900;
pub const CARD_HEIGHT: u32 = 600;
