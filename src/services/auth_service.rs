use crate::config::AppConfig;
use crate::entities::{
    contract_entity as contracts, plan_entity as plans, student_entity as students,
    subscription_entity as subscriptions, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::external::Notifier;
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
    notifier: Arc<dyn Notifier>,
    app: AppConfig,
}

/// Guardian fields after presence checks.
struct Guardian<'a> {
    cpf: &'a str,
    name: &'a str,
    phone: &'a str,
    email: &'a str,
    password: &'a str,
}

impl AuthService {
    pub fn new(
        pool: DatabaseConnection,
        jwt_service: JwtService,
        notifier: Arc<dyn Notifier>,
        app: AppConfig,
    ) -> Self {
        Self {
            pool,
            jwt_service,
            notifier,
            app,
        }
    }

    /// Creates the guardian, one student per child and a subscription to the chosen plan.
    /// Returns the new user id.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<i64> {
        // Validate the form before touching the database
        let guardian = validate_guardian(&request)?;
        if request.children.is_empty() {
            return Err(AppError::ValidationError(
                "At least one child is required".to_string(),
            ));
        }
        if request.children.iter().any(|c| non_blank(&c.name).is_none()) {
            return Err(AppError::ValidationError(
                "Every child needs a name".to_string(),
            ));
        }
        let plan_id = request
            .selected_plan
            .ok_or_else(|| AppError::ValidationError("A plan must be selected".to_string()))?;
        let token = non_blank(&request.contract_slug)
            .ok_or_else(|| AppError::ValidationError("Missing invite token".to_string()))?;

        // Invite token must still be current
        let contract = contracts::Entity::find()
            .filter(contracts::Column::InviteToken.eq(token))
            .one(&self.pool)
            .await?;
        if contract.is_none() {
            return Err(AppError::ValidationError(
                "Invalid or expired invite link".to_string(),
            ));
        }

        let password_hash = hash_password(guardian.password)?;

        let txn = self.pool.begin().await?;

        // Guardian
        let user = users::ActiveModel {
            name: Set(guardian.name.to_string()),
            email: Set(guardian.email.to_string()),
            password_hash: Set(password_hash),
            cpf: Set(guardian.cpf.to_string()),
            phone: Set(Some(guardian.phone.to_string())),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::from_db_conflict(e, "Email or CPF already registered"))?;

        // One student per child
        for child in &request.children {
            let birth_date = parse_birth_date(child.dob.as_deref());
            if birth_date.is_none()
                && let Some(dob) = non_blank(&child.dob)
            {
                log::warn!(
                    "Ignoring unparseable birth date {dob:?} for a child of user {}",
                    user.id
                );
            }

            students::ActiveModel {
                name: Set(non_blank(&child.name).unwrap_or_default().to_string()),
                user_id: Set(user.id),
                birth_date: Set(birth_date),
                shift: Set(child.shift.clone()),
                reference_photo_url: Set(child.photo_preview.clone()),
                school_course: Set(Some(school_course_label(child))),
                class_id: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        // Unknown plan undoes the staged user and students
        let plan = plans::Entity::find_by_id(plan_id).one(&txn).await?;
        if plan.is_none() {
            txn.rollback().await?;
            return Err(AppError::ValidationError(
                "Selected plan not found".to_string(),
            ));
        }

        // Subscription
        subscriptions::ActiveModel {
            user_id: Set(user.id),
            plan_id: Set(plan_id),
            subscribed_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "Registered user {} with {} children on plan {}",
            user.id,
            request.children.len(),
            plan_id
        );

        // Welcome message, failures are only logged
        self.spawn_welcome(guardian.phone, guardian.name);

        Ok(user.id)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(request.email.trim()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError(
                "Invalid email or password".to_string(),
            ));
        }

        let access_token = self.jwt_service.generate_access_token(user.id, &user.email)?;

        Ok(LoginResponse {
            user: user.into(),
            access_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    fn spawn_welcome(&self, phone: &str, parent_name: &str) {
        let notifier = self.notifier.clone();
        let phone = format_br_phone(phone);
        let first_name = parent_name
            .split_whitespace()
            .next()
            .unwrap_or(parent_name)
            .to_string();
        let link = self.app.client_dashboard_link();

        tokio::spawn(async move {
            if let Err(e) = notifier.send_welcome(&phone, &first_name, &link).await {
                log::warn!("Failed to send welcome message to {phone}: {e}");
            }
        });
    }
}

fn validate_guardian(request: &RegisterRequest) -> AppResult<Guardian<'_>> {
    let missing = || AppError::ValidationError("Missing required guardian fields".to_string());
    Ok(Guardian {
        cpf: non_blank(&request.cpf).ok_or_else(missing)?,
        name: non_blank(&request.parent_name).ok_or_else(missing)?,
        phone: non_blank(&request.phone).ok_or_else(missing)?,
        email: non_blank(&request.parent_email).ok_or_else(missing)?,
        password: request
            .password
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(missing)?,
    })
}

fn school_course_label(child: &ChildRequest) -> String {
    format!(
        "{} - {} ({})",
        child.school.as_deref().unwrap_or_default(),
        child.class_name.as_deref().unwrap_or_default(),
        child.shift.as_deref().unwrap_or_default()
    )
}
