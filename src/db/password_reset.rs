use crate::db::mariadb_service::MariaDbService;
use crate::{types::error::AppError, utils::token};
use chrono::{Duration, Utc};
use entity::password_reset::{self, ActiveModel as ResetActive, Entity as PasswordReset};
use entity::user::{ActiveModel as UserActive, Entity as User};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

/// How long a reset link stays valid.
pub const RESET_TTL_MINUTES: i64 = 30;

impl MariaDbService {
    pub async fn create_password_reset(&self, user_id: i32) -> Result<String, AppError> {
        self.expire_password_resets().await?;

        let code = token::new_reset_code();
        let now = Utc::now();
        PasswordReset::insert(ResetActive {
            id: Set(code.clone()),
            user_id: Set(user_id),
            used: Set(false),
            expires_at: Set(now + Duration::minutes(RESET_TTL_MINUTES)),
            created_at: Set(now),
        })
        .exec(&self.database_connection)
        .await?;
        Ok(code)
    }

    /// Consumes a reset code and stores the new password hash.
    /// Codes for another user, used codes and expired codes all read as missing.
    pub async fn confirm_password_reset(
        &self,
        user_id: i32,
        code: &str,
        password_hash: String,
    ) -> Result<(), AppError> {
        let txn = self.database_connection.begin().await?;

        let reset = PasswordReset::find_by_id(code.to_string())
            .one(&txn)
            .await?
            .filter(|r| r.user_id == user_id && !r.used && r.expires_at > Utc::now());
        let Some(reset) = reset else {
            txn.rollback().await?;
            return Err(AppError::Missing(
                "The password reset link is invalid or has expired.".to_string(),
            ));
        };

        let user = User::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;

        let mut am: ResetActive = reset.into();
        am.used = Set(true);
        am.update(&txn).await?;

        let mut am: UserActive = user.into();
        am.password = Set(password_hash);
        am.token_hash = Set(None);
        am.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Hard-delete reset codes that are used or past their expiry.
    pub async fn expire_password_resets(&self) -> Result<u64, AppError> {
        let res = PasswordReset::delete_many()
            .filter(
                Condition::any()
                    .add(password_reset::Column::Used.eq(true))
                    .add(password_reset::Column::ExpiresAt.lte(Utc::now())),
            )
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected)
    }
}
