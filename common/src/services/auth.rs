//! Sign-in, sign-up and session lookup.

use tracing::info;

use crate::backend::{HostedBackend, Session, SignUp, UserMetadata};
use crate::error::ServiceError;
use crate::form::{LoginForm, SignupForm};
use crate::model::{Role, Viewer};

pub async fn sign_in<B: HostedBackend + ?Sized>(
    backend: &B,
    form: &LoginForm,
) -> Result<Session, ServiceError> {
    form.validate()?;
    let session = backend
        .sign_in(form.email.trim(), &form.password)
        .await
        .map_err(|e| ServiceError::Validation(e.message))?;
    info!("User {} signed in", session.user.id);
    Ok(session)
}

/// Register a new account. The role chosen on the form is stored in the auth
/// metadata, where the admin gate reads it.
pub async fn sign_up<B: HostedBackend + ?Sized>(
    backend: &B,
    form: &SignupForm,
) -> Result<SignUp, ServiceError> {
    form.validate()?;
    let role = if form.admin { Role::Admin } else { Role::User };
    let metadata = UserMetadata {
        name: Some(form.name.trim().to_string()),
        role: Some(role.as_str().to_string()),
    };
    let signup = backend
        .sign_up(form.email.trim(), &form.password, metadata)
        .await
        .map_err(|e| ServiceError::Validation(e.message))?;
    info!("User {} signed up as {}", signup.user.id, role.as_str());
    Ok(signup)
}

/// The signed-in viewer, if any.
pub async fn viewer<B: HostedBackend + ?Sized>(backend: &B) -> Result<Option<Viewer>, ServiceError> {
    let user = backend
        .current_user()
        .await
        .map_err(|e| ServiceError::backend("Erro ao verificar sessão", e))?;
    Ok(user.map(|u| u.viewer()))
}

/// The signed-in viewer, required to be an admin.
pub async fn require_admin<B: HostedBackend + ?Sized>(backend: &B) -> Result<Viewer, ServiceError> {
    match viewer(backend).await? {
        Some(v) if v.is_admin() => Ok(v),
        _ => Err(ServiceError::Forbidden),
    }
}

pub async fn sign_out<B: HostedBackend + ?Sized>(backend: &B) -> Result<(), ServiceError> {
    backend
        .sign_out()
        .await
        .map_err(|e| ServiceError::backend("Erro ao encerrar sessão", e))
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;

    fn signup_form(admin: bool) -> SignupForm {
        SignupForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "segredo".into(),
            confirm: "segredo".into(),
            admin,
        }
    }

    #[tokio::test]
    async fn test_password_mismatch_makes_no_call() {
        let db = MemoryBackend::new();
        let mut form = signup_form(false);
        form.confirm = "outro".into();
        assert!(sign_up(&db, &form).await.is_err());
        assert_eq!(db.calls(), 0);
    }

    #[tokio::test]
    async fn test_admin_gate() {
        let db = MemoryBackend::new();
        let admin = sign_up(&db, &signup_form(true)).await.unwrap();
        let scoped = db.with_token(&admin.session.unwrap().access_token);
        assert!(require_admin(&scoped).await.is_ok());

        let mut form = signup_form(false);
        form.email = "bia@example.com".into();
        let user = sign_up(&db, &form).await.unwrap();
        let scoped = db.with_token(&user.session.unwrap().access_token);
        assert_eq!(require_admin(&scoped).await.unwrap_err(), ServiceError::Forbidden);

        assert_eq!(require_admin(&db).await.unwrap_err(), ServiceError::Forbidden);
    }

    #[tokio::test]
    async fn test_sign_in_surfaces_backend_message() {
        let db = MemoryBackend::new();
        let form = LoginForm {
            email: "ninguem@example.com".into(),
            password: "x".into(),
        };
        let err = sign_in(&db, &form).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_viewer_after_sign_in() {
        let db = MemoryBackend::new();
        sign_up(&db, &signup_form(false)).await.unwrap();
        let session = sign_in(
            &db,
            &LoginForm {
                email: "ana@example.com".into(),
                password: "segredo".into(),
            },
        )
        .await
        .unwrap();
        let v = viewer(&db.with_token(&session.access_token)).await.unwrap().unwrap();
        assert_eq!(v.name, "Ana");
        assert_eq!(v.role, Role::User);
    }
}
