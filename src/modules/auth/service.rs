use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use shopfront_auth::{ROLE_USER, TOKEN_TYPE, create_access_token};
use shopfront_config::JwtConfig;
use shopfront_core::{AppError, hash_password, verify_password, verify_password_for_unknown_user};
use shopfront_observability::{track_jwt_issued, track_user_login, track_user_registered};

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto, User, UserCredentials};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(user.username = %dto.username, db.operation = "INSERT", db.table = "users"))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        debug!("Registering user");

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "WITH inserted AS (
                 INSERT INTO users (username, email, password_hash, role_id)
                 SELECT $1, $2, $3, id FROM roles WHERE name = $4
                 RETURNING id, username, email, role_id, created_at
             )
             SELECT i.id, i.username, i.email, r.name AS role, i.created_at
             FROM inserted i JOIN roles r ON r.id = i.role_id",
        )
        .bind(dto.username.trim())
        .bind(dto.email.trim().to_lowercase())
        .bind(&password_hash)
        .bind(ROLE_USER)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            warn!(error = %e, "Registration rejected by database");
            AppError::conflict_on_unique(e, "Username or email already exists")
        })?
        .ok_or_else(|| AppError::internal_error("Default role 'user' is missing"))?;

        track_user_registered();
        info!(user.id = %user.id, "User registered");

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.username = %dto.username))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT u.id, u.username, u.email, u.password_hash, u.role_id, r.name AS role, u.created_at
             FROM users u JOIN roles r ON r.id = u.role_id
             WHERE u.username = $1",
        )
        .bind(dto.username.trim())
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        let Some(credentials) = credentials else {
            verify_password_for_unknown_user(&dto.password);
            debug!("Unknown username");
            track_user_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &credentials.password_hash) {
            debug!(user.id = %credentials.id, "Password mismatch");
            track_user_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let access_token = create_access_token(
            credentials.id.into_inner(),
            &credentials.username,
            &credentials.role,
            jwt_config,
        )?;

        track_jwt_issued();
        track_user_login(true);
        info!(user.id = %credentials.id, user.role = %credentials.role, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: jwt_config.access_token_expiry,
            user: credentials.into(),
        })
    }
}
