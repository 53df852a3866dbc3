//! Staff sign-up and login form checks. Credentials are never verified here.

use axum::{http::StatusCode, response::IntoResponse, response::Response, routing::post, Router};
use serde::Deserialize;
use serde_json::json;

use crate::workflows::forms::{check_email, is_blank, FieldErrorKind, FieldErrorSet, FieldName};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub fn validate_signup(form: &SignupForm) -> Result<(), FieldErrorSet> {
    let mut errors = FieldErrorSet::new();

    if is_blank(&form.name) {
        errors.insert(FieldName::Name, FieldErrorKind::Required, "Name is required");
    }
    check_email(&mut errors, &form.email);
    if form.password.is_empty() {
        errors.insert(
            FieldName::Password,
            FieldErrorKind::Required,
            "Password is required",
        );
    }
    if form.password != form.confirm_password {
        errors.insert(
            FieldName::ConfirmPassword,
            FieldErrorKind::PasswordMismatch,
            "Passwords do not match",
        );
    }

    errors.into_result(())
}

pub fn validate_login(form: &LoginForm) -> Result<(), FieldErrorSet> {
    let mut errors = FieldErrorSet::new();

    if is_blank(&form.email) {
        errors.insert(FieldName::Email, FieldErrorKind::Required, "Email is required");
    }
    if form.password.is_empty() {
        errors.insert(
            FieldName::Password,
            FieldErrorKind::Required,
            "Password is required",
        );
    }

    errors.into_result(())
}

pub fn accounts_router() -> Router {
    Router::new()
        .route("/api/v1/accounts/signup/validate", post(signup_handler))
        .route("/api/v1/accounts/login/validate", post(login_handler))
}

async fn signup_handler(axum::Json(form): axum::Json<SignupForm>) -> Response {
    field_response(validate_signup(&form))
}

async fn login_handler(axum::Json(form): axum::Json<LoginForm>) -> Response {
    field_response(validate_login(&form))
}

fn field_response(result: Result<(), FieldErrorSet>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(errors) => {
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
