//! Tenant isolation configuration.

use serde::{Deserialize, Serialize};

/// Controls which roles bypass institute scoping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Role names exempt from the institute requirement.
    #[serde(default = "default_exempt_roles")]
    pub exempt_roles: Vec<String>,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            exempt_roles: default_exempt_roles(),
        }
    }
}

fn default_exempt_roles() -> Vec<String> {
    vec!["super_admin".to_string()]
}
