use serde::{Deserialize, Serialize};

wire_enum! {
    /// Account role. Admin access is granted to `ADMIN` and `SUPER_ADMIN`.
    Role {
        Customer => "CUSTOMER" | "customer" | "user",
        Vendor => "VENDOR" | "vendor",
        Admin => "ADMIN" | "admin",
        SuperAdmin => "SUPER_ADMIN" | "super_admin" | "superadmin" | "superAdmin",
    }
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

wire_enum! {
    UserStatus {
        Active => "ACTIVE" | "active",
        Pending => "PENDING" | "pending",
        Suspended => "SUSPENDED" | "suspended",
        Deactivated => "DEACTIVATED" | "deactivated",
    }
}

/// A platform account (shopper, vendor or admin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default = "default_user_status")]
    pub status: UserStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_user_status() -> UserStatus {
    UserStatus::Active
}

impl User {
    pub fn full_name(&self) -> String {
        let name = [&self.first_name, &self.last_name]
            .into_iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone().unwrap_or_else(|| self.id.clone())
        } else {
            name
        }
    }
}

/// Body of `PUT /api/admin/users/:id/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatusUpdate {
    pub status: UserStatus,
}
