use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, verify_token};
use crate::auth::password::{hash_password, verify_password};
use crate::config::Config;
use crate::model::role::Role;
use crate::models::{LoginReqDto, TokenType, UserReq, UserSql};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(sqlx::FromRow)]
struct RefreshTokenSql {
    id: u64,
    user_id: u64,
    revoked: bool,
}

async fn username_taken(username: &str, pool: &MySqlPool) -> bool {
    sqlx::query_scalar::<_, i64>("SELECT EXISTS(SELECT 1 FROM users WHERE username = ? LIMIT 1)")
        .bind(username)
        .fetch_one(pool)
        .await
        .map(|exists| exists != 0)
        .unwrap_or(true) // fail-safe: treat lookup errors as taken
}

/// User registration handler
#[utoipa::path(
    post,
    path = "/auth/register",
    responses(
        (status = 201, description = "User registered successfully"),
        (status = 400, description = "Missing username or password"),
        (status = 409, description = "Username already taken"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(user: web::Json<UserReq>, pool: web::Data<MySqlPool>) -> impl Responder {
    let username = user.username.trim().to_lowercase();

    if username.is_empty() || user.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Username and password must not be empty"
        }));
    }

    if Role::from_id(user.role_id).is_none() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Unknown role"
        }));
    }

    if username_taken(&username, pool.get_ref()).await {
        return HttpResponse::Conflict().json(json!({
            "error": "Username already taken"
        }));
    }

    let hashed = hash_password(&user.password);

    let result = sqlx::query("INSERT INTO users (username, password, role_id) VALUES (?, ?, ?)")
        .bind(&username)
        .bind(&hashed)
        .bind(user.role_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => HttpResponse::Created().json(json!({
            "message": "User registered successfully"
        })),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                // Duplicate key: somebody registered the name in between
                if db_err.code().as_deref() == Some("23000") {
                    return HttpResponse::Conflict().json(json!({
                        "error": "Username already exists"
                    }));
                }
            }

            error!(error = %e, "Failed to register user");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register user"
            }))
        }
    }
}

/// Login with username/password, returns an access/refresh token pair
#[utoipa::path(
    post,
    path = "/auth/login",
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(pool, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return HttpResponse::BadRequest().body("Username or password required");
    }

    debug!("Fetching user from database");

    let db_user = match sqlx::query_as::<_, UserSql>(
        "SELECT id, username, password, role_id FROM users WHERE username = ?",
    )
    .bind(&user.username)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(found)) => {
            debug!(user_id = found.id, "User found");
            found
        }
        Ok(None) => {
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if !verify_password(&user.password, &db_user.password) {
        info!("Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    debug!("Password verified, issuing tokens");

    let access_token = generate_access_token(
        db_user.id,
        db_user.username.clone(),
        db_user.role_id,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    let (refresh_token, refresh_claims) = generate_refresh_token(
        db_user.id,
        db_user.username.clone(),
        db_user.role_id,
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    debug!(
        user_id = db_user.id,
        jti = %refresh_claims.jti,
        "Storing refresh token"
    );

    if let Err(e) =
        sqlx::query("INSERT INTO refresh_tokens (user_id, jti, expires_at) VALUES (?, ?, FROM_UNIXTIME(?))")
            .bind(db_user.id)
            .bind(&refresh_claims.jti)
            .bind(refresh_claims.exp as i64)
            .execute(pool.get_ref())
            .await
    {
        error!(error = %e, "Failed to store refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    if let Err(e) = sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = ?")
        .bind(db_user.id)
        .execute(pool.get_ref())
        .await
    {
        // not worth failing the login over
        error!(error = %e, "Failed to update last_login_at");
    }

    info!("Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        refresh_token,
    })
}

/// Rotate a refresh token, returns a fresh token pair
#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "New token pair", body = LoginResponse),
        (status = 401, description = "Missing, invalid or revoked refresh token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn refresh_token(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::Unauthorized().body("No token"),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::Unauthorized().body("Invalid token"),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::Unauthorized().finish();
    }

    let record = match sqlx::query_as::<_, RefreshTokenSql>(
        "SELECT id, user_id, revoked FROM refresh_tokens WHERE jti = ?",
    )
    .bind(&claims.jti)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(r)) if !r.revoked => r,
        Ok(_) => return HttpResponse::Unauthorized().finish(),
        Err(e) => {
            error!(error = %e, "Failed to look up refresh token");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // Rotation: the presented token is spent either way.
    if let Err(e) = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = ?")
        .bind(record.id)
        .execute(pool.get_ref())
        .await
    {
        error!(error = %e, "Failed to revoke refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    let (new_refresh_token, new_claims) = generate_refresh_token(
        claims.user_id,
        claims.sub.clone(),
        claims.role,
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    if let Err(e) =
        sqlx::query("INSERT INTO refresh_tokens (user_id, jti, expires_at) VALUES (?, ?, FROM_UNIXTIME(?))")
            .bind(record.user_id)
            .bind(&new_claims.jti)
            .bind(new_claims.exp as i64)
            .execute(pool.get_ref())
            .await
    {
        error!(error = %e, "Failed to store rotated refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    let access_token = generate_access_token(
        claims.user_id,
        claims.sub.clone(),
        claims.role,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        refresh_token: new_refresh_token,
    })
}

/// Revoke the presented refresh token
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Token revoked (or was never valid)")
    ),
    tag = "Auth"
)]
pub async fn logout(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::NoContent().finish(),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::NoContent().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::NoContent().finish();
    }

    // Idempotent: succeeds even if the token was already revoked or unknown.
    let _ = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE jti = ?")
        .bind(&claims.jti)
        .execute(pool.get_ref())
        .await;

    HttpResponse::NoContent().finish()
}
