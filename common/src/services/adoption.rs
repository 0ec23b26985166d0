//! Adopting a plant: one planting row per (user, plant).

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::backend::{self, AuthUser, HostedBackend, Query};
use crate::error::ServiceError;
use crate::form::AdoptionForm;
use crate::model::{NewPlanting, NewUser, User, PLANTINGS_TABLE, STATUS_PLANTED, USERS_TABLE};

/// Record that the signed-in user adopted `plant_id`.
///
/// The user's `usuarios` row is created on the fly when missing; failing to
/// create it is logged and the planting is attempted anyway.
pub async fn adopt<B: HostedBackend + ?Sized>(
    backend: &B,
    plant_id: &str,
    form: &AdoptionForm,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    form.validate()?;

    let user = backend
        .current_user()
        .await
        .map_err(|e| ServiceError::backend("Erro ao realizar adoção", e))?
        .ok_or(ServiceError::Unauthenticated)?;

    ensure_user_row(backend, &user, now).await;

    let planting = NewPlanting {
        user_id: user.id.clone(),
        plant_id: plant_id.to_string(),
        location: form.location.trim().to_string(),
        status: STATUS_PLANTED.to_string(),
        planted_at: now,
        notes: form.notes(),
    };

    match backend::insert(backend, PLANTINGS_TABLE, &planting).await {
        Ok(()) => {
            info!("User {} adopted plant {plant_id}", user.id);
            Ok(())
        }
        Err(e) if e.is_unique_violation() => Err(ServiceError::DuplicateAdoption),
        Err(e) => {
            warn!("Adoption error: {e}");
            Err(ServiceError::backend("Erro ao realizar adoção", e))
        }
    }
}

/// Insert the `usuarios` row for `user` if it does not exist yet.
async fn ensure_user_row<B: HostedBackend + ?Sized>(
    backend: &B,
    user: &AuthUser,
    now: DateTime<Utc>,
) {
    let existing =
        backend::fetch_optional::<User, _>(backend, Query::from(USERS_TABLE).eq("id", &user.id))
            .await;
    if matches!(existing, Ok(Some(_))) {
        return;
    }

    let row = NewUser {
        id: user.id.clone(),
        name: user.display_name(),
        created_at: now,
    };
    if let Err(e) = backend::insert(backend, USERS_TABLE, &row).await {
        warn!("Error creating user record for {}: {e}", user.id);
    }
}

// ─── tests ───────────────────────────────────────────────────────────────
