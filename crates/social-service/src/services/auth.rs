//! Authentication service
//!
//! Handles user registration, login, token refresh, and logout. Tokens are
//! stateless JWTs, so logout only acknowledges the request.

use social_common::auth::{hash_password, validate_password_strength, verify_or_invalid};
use social_common::AppError;
use social_core::entities::{normalize_username, User};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, MessageResponse, RefreshTokenRequest, RegisterRequest, UserPublic};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        let username = normalize_username(&request.username)?;
        let email = request.email.trim().to_lowercase();

        if self.ctx.user_repo().username_exists(&username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = User::new(self.ctx.generate_id(), username, email, request.display_name);

        // The unique indexes still decide a race between two registrations
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        self.issue_tokens(&user).await
    }

    /// Login with a username or an email address
    #[instrument(skip(self, request), fields(login = %request.login))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let login = request.login.trim();

        let user = self
            .ctx
            .user_repo()
            .find_by_login(login)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        verify_or_invalid(&request.password, &password_hash).inspect_err(|_| {
            warn!(user_id = %user.id, "Login failed: invalid password");
        })?;

        if !user.can_login() {
            warn!(user_id = %user.id, "Login refused: account deactivated");
            return Err(DomainError::AccountDeactivated.into());
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.issue_tokens(&user).await
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .filter(User::can_login)
            .ok_or(AppError::InvalidToken)?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        self.issue_tokens(&user).await
    }

    /// Acknowledge a logout
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: Snowflake) -> ServiceResult<MessageResponse> {
        info!(user_id = %user_id, "User logged out successfully");
        Ok(MessageResponse::new("logged out successfully"))
    }

    /// Current user's public profile
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Snowflake) -> ServiceResult<UserPublic> {
        UserService::new(self.ctx).get_user(user_id).await
    }

    /// Validate an access token and return the user ID
    pub fn validate_token(&self, token: &str) -> ServiceResult<Snowflake> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(claims.user_id()?)
    }

    async fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, &user.username)?;

        let profile = UserService::new(self.ctx).with_stats(user).await?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            profile,
        ))
    }
}
