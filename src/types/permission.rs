use entity::user::{Model as UserModel, Role};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    AddArticle,
    ViewArticle,
    ChangeArticle,
    DeleteArticle,
    PublishArticle,
    AddJournalistSubscription,
    DeleteJournalistSubscription,
    AddPublisherSubscription,
    DeletePublisherSubscription,
}

const EDITOR: &[Permission] = &[
    Permission::ChangeArticle,
    Permission::DeleteArticle,
    Permission::ViewArticle,
    Permission::PublishArticle,
];

const JOURNALIST: &[Permission] = &[
    Permission::AddArticle,
    Permission::ChangeArticle,
    Permission::ViewArticle,
    Permission::DeleteArticle,
];

const READER: &[Permission] = &[
    Permission::ViewArticle,
    Permission::AddJournalistSubscription,
    Permission::DeleteJournalistSubscription,
    Permission::AddPublisherSubscription,
    Permission::DeletePublisherSubscription,
];

/// Group permissions granted by a role.
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Editor => EDITOR,
        Role::Journalist => JOURNALIST,
        Role::Reader => READER,
    }
}

pub fn has_permission(user: &UserModel, perm: Permission) -> bool {
    user.is_active && (user.is_superuser || permissions_for(user.role).contains(&perm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: Role) -> UserModel {
        UserModel {
            id: 1,
            username: "u".into(),
            email: "u@news.com".into(),
            first_name: String::new(),
            last_name: String::new(),
            password: String::new(),
            role,
            profile_photo: None,
            is_staff: false,
            is_superuser: false,
            is_active: true,
            token_hash: None,
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn only_editors_publish() {
        assert!(has_permission(&user(Role::Editor), Permission::PublishArticle));
        assert!(!has_permission(&user(Role::Journalist), Permission::PublishArticle));
        assert!(!has_permission(&user(Role::Reader), Permission::PublishArticle));
    }

    #[test]
    fn editors_cannot_author() {
        assert!(!has_permission(&user(Role::Editor), Permission::AddArticle));
        assert!(has_permission(&user(Role::Journalist), Permission::AddArticle));
    }

    #[test]
    fn readers_manage_subscriptions_only() {
        let reader = user(Role::Reader);
        assert!(has_permission(&reader, Permission::AddPublisherSubscription));
        assert!(has_permission(&reader, Permission::ViewArticle));
        assert!(!has_permission(&reader, Permission::ChangeArticle));
        assert!(!has_permission(&user(Role::Journalist), Permission::AddJournalistSubscription));
    }

    #[test]
    fn superuser_has_everything_unless_inactive() {
        let mut admin = user(Role::Reader);
        admin.is_superuser = true;
        assert!(has_permission(&admin, Permission::PublishArticle));
        admin.is_active = false;
        assert!(!has_permission(&admin, Permission::ViewArticle));
    }
}
