use super::options;
use crate::domain::{Role, User, UserStatus};
use crate::ui::{Column, FilterBar, FilterField, Form, FormField, Modal, Table};

pub fn user_filters() -> FilterBar {
    FilterBar::new(vec![
        FilterField::select_values("role", "Role", &options(Role::ALL, Role::as_str)),
        FilterField::select_values("status", "Status", &options(UserStatus::ALL, UserStatus::as_str)),
        FilterField::text("search", "Search"),
    ])
}

pub fn user_table() -> Table<User> {
    Table::new(
        vec![
            Column::custom("name", "Name", User::full_name),
            Column::field("email", "Email"),
            Column::field("role", "Role"),
            Column::field("status", "Status"),
            Column::field("createdAt", "Joined"),
        ],
        |u| u.id.clone(),
    )
    .with_empty_text("No users found")
}

pub fn status_modal() -> Modal {
    Modal::new(
        "Change account status",
        Form::new(vec![
            FormField::select("status", "Status", &options(UserStatus::ALL, UserStatus::as_str)).required()
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_filter_offers_wire_values() {
        let mut filters = user_filters();
        assert!(filters.change("role", "SUPER_ADMIN").is_ok());
        assert!(filters.change("role", "superadmin").is_err());
    }

    #[test]
    fn rows_use_full_name() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "u1", "firstName": "Tunde", "lastName": "Bello", "role": "VENDOR", "status": "SUSPENDED"
        }))
        .unwrap();
        assert_eq!(user_table().rows(&[user])[0][..4], ["Tunde Bello", "-", "VENDOR", "SUSPENDED"]);
    }
}
