use std::collections::{HashMap, HashSet};

use crate::db::mariadb_service::MariaDbService;
use crate::{
    types::{
        error::AppError,
        user::{DBUserCreate, JournalistSummary, RAdminUserUpdate, RProfileUpdate},
    },
    utils::token::{self, construct_token, encrypt, new_token},
};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel, Role};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl MariaDbService {
    pub async fn user_exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Username.eq(username))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// Every active account registered under `email`; addresses are not unique.
    pub async fn find_active_users_by_email(&self, email: &str) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email))
            .filter(entity::user::Column::IsActive.eq(true))
            .order_by_asc(entity::user::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    /// A user with role JOURNALIST. Anyone else reads as missing.
    pub async fn get_journalist(&self, id: i32) -> Result<UserModel, AppError> {
        let user = self.get_user_by_id(id).await?;
        if user.role != Role::Journalist {
            return Err(AppError::NotFound);
        }
        Ok(user)
    }

    pub async fn users_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, UserModel>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(User::find()
            .filter(entity::user::Column::Id.is_in(ids.to_vec()))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect())
    }

    pub async fn user_count(&self) -> Result<u64, AppError> {
        Ok(User::find().count(&self.database_connection).await?)
    }

    pub async fn journalist_summary(&self, user: UserModel) -> Result<JournalistSummary, AppError> {
        let article_count = self.published_count_for_author(user.id).await?;
        Ok(JournalistSummary {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_photo: user.profile_photo,
            article_count,
        })
    }

    /// Sidebar entries for followed journalists, ordered by username.
    pub async fn journalist_summaries(&self, ids: &HashSet<i32>) -> Result<Vec<JournalistSummary>, AppError> {
        let ids: Vec<i32> = ids.iter().copied().collect();
        let mut users: Vec<UserModel> = self.users_by_ids(&ids).await?.into_values().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        let mut out = Vec::with_capacity(users.len());
        for user in users {
            out.push(self.journalist_summary(user).await?);
        }
        Ok(out)
    }

    pub async fn list_users(&self) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .order_by_asc(entity::user::Column::Username)
            .all(&self.database_connection)
            .await?)
    }

    /// Creates the user and its publisher affiliations in one transaction.
    pub async fn create_user(
        &self,
        payload: DBUserCreate,
        publisher_ids: &[i32],
    ) -> Result<UserModel, AppError> {
        if self.user_exists_by_username(&payload.username).await? {
            return Err(AppError::AlreadyExists);
        }
        let txn = self.database_connection.begin().await?;

        let user = UserActive {
            username: Set(payload.username),
            email: Set(payload.email),
            first_name: Set(payload.first_name),
            last_name: Set(payload.last_name),
            password: Set(payload.password),
            role: Set(payload.role),
            profile_photo: Set(payload.profile_photo),
            is_staff: Set(payload.is_staff),
            is_superuser: Set(payload.is_superuser),
            is_active: Set(true),
            token_hash: Set(None),
            date_joined: Set(Utc::now()),
            last_login: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        Self::set_user_publishers(&txn, user.id, publisher_ids).await?;

        txn.commit().await?;
        Ok(user)
    }

    /// Issues a fresh API token. Any previous token stops working.
    pub async fn issue_token(&self, user_id: i32) -> Result<String, AppError> {
        let user = self.get_user_by_id(user_id).await?;
        let secret = new_token();
        let hashed = encrypt(&secret).map_err(|e| AppError::Internal(e.to_string()))?;
        let mut am: UserActive = user.into();
        am.token_hash = Set(Some(hashed));
        am.update(&self.database_connection).await?;
        Ok(construct_token(user_id, &secret))
    }

    pub async fn clear_token(&self, user_id: i32) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(user_id).await?.into();
        am.token_hash = Set(None);
        am.update(&self.database_connection).await?;
        Ok(())
    }

    /// Resolves a client token to its active owner.
    pub async fn authenticate_token(&self, raw: &str) -> Result<UserModel, AppError> {
        let (user_id, secret) = token::extract_token_parts(raw).ok_or(AppError::Unauthorized)?;
        let user = match self.get_user_by_id(user_id).await {
            Ok(user) => user,
            Err(AppError::NotFound) => return Err(AppError::Unauthorized),
            Err(e) => return Err(e),
        };
        let valid = user
            .token_hash
            .as_deref()
            .is_some_and(|hash| token::verify(&secret, hash));
        if !valid || !user.is_active {
            return Err(AppError::Unauthorized);
        }
        Ok(user)
    }

    /// Username and password check. Inactive accounts are refused.
    pub async fn authenticate_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserModel, AppError> {
        let user = match self.get_user_by_username(username).await {
            Ok(user) => user,
            Err(AppError::NotFound) => return Err(AppError::Unauthorized),
            Err(e) => return Err(e),
        };
        if !user.is_active || !token::verify(password, &user.password) {
            return Err(AppError::Unauthorized);
        }
        Ok(user)
    }

    pub async fn record_login(&self, user: UserModel) -> Result<UserModel, AppError> {
        let mut am: UserActive = user.into();
        am.last_login = Set(Some(Utc::now()));
        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        changes: RProfileUpdate,
    ) -> Result<UserModel, AppError> {
        let mut am: UserActive = self.get_user_by_id(user_id).await?.into();
        if let Some(first_name) = changes.first_name {
            am.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            am.last_name = Set(last_name);
        }
        if let Some(email) = changes.email {
            am.email = Set(email);
        }
        if let Some(photo) = changes.profile_photo {
            am.profile_photo = Set(Some(photo).filter(|p| !p.is_empty()));
        }
        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn admin_update_user(
        &self,
        user_id: i32,
        changes: RAdminUserUpdate,
    ) -> Result<UserModel, AppError> {
        let txn = self.database_connection.begin().await?;
        let user = User::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;

        let mut am: UserActive = user.into();
        if let Some(role) = changes.role {
            am.role = Set(role);
        }
        if let Some(is_active) = changes.is_active {
            am.is_active = Set(is_active);
            if !is_active {
                am.token_hash = Set(None);
            }
        }
        if let Some(is_staff) = changes.is_staff {
            am.is_staff = Set(is_staff);
        }
        let user = am.update(&txn).await?;

        if let Some(publishers) = changes.publishers {
            Self::set_user_publishers(&txn, user.id, &publishers).await?;
        }
        txn.commit().await?;
        Ok(user)
    }
}
