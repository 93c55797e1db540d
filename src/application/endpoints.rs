//! Endpoint catalogue - the fixed API paths the flows call.

/// First-run superadmin signup.
pub const SUPERADMIN_CREATE: &str = "/superadmin/create";

/// Superadmin login.
pub const SUPERADMIN_LOGIN: &str = "/superadmin/login";

/// First-run school installation.
pub const SCHOOL_INSTALL: &str = "/school/install";

/// Tenant database provisioning.
pub const DATABASE_CREATE: &str = "/database/create";

/// Portal login for all user roles.
pub const PORTAL_LOGIN: &str = "/auth/login";

/// Session refresh; exchanges the refresh credential for new tokens.
pub const SESSION_REFRESH: &str = "/auth/refreshToken";

/// Account activation.
pub const ACCOUNT_ACTIVATE: &str = "/api/activate";
