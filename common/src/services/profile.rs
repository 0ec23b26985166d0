//! Data behind the profile page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::{self, HostedBackend, Query};
use crate::error::ServiceError;
use crate::growth::Growth;
use crate::model::{
    Plant, Planting, PlantingArea, PlantingWithPlant, Publication, Viewer, AREAS_TABLE,
    PLANTINGS_TABLE, PLANTS_TABLE, PUBLICATIONS_TABLE,
};

/// One row of the growth-tracking tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthEntry {
    pub planting: PlantingWithPlant,
    pub growth: Growth,
}

/// Everything the profile tabs render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub viewer: Viewer,
    pub plantings: Vec<GrowthEntry>,
    pub areas: Vec<PlantingArea>,
    pub tips: Vec<Publication>,
}

/// Load the signed-in user's profile. `None` when nobody is signed in.
pub async fn load<B: HostedBackend + ?Sized>(
    backend: &B,
    tips_limit: u32,
    now: DateTime<Utc>,
) -> Result<Option<Profile>, ServiceError> {
    let Some(user) = backend
        .current_user()
        .await
        .map_err(|e| ServiceError::backend("Erro ao carregar perfil", e))?
    else {
        return Ok(None);
    };

    let plantings = plantings_of(backend, &user.id).await?;
    let areas = backend::fetch(backend, &Query::from(AREAS_TABLE).order("nome", true))
        .await
        .map_err(|e| ServiceError::backend("Erro ao carregar áreas de plantio", e))?;
    let tips = backend::fetch(
        backend,
        &Query::from(PUBLICATIONS_TABLE)
            .order("visualizacoes", false)
            .limit(tips_limit),
    )
    .await
    .map_err(|e| ServiceError::backend("Erro ao carregar publicações", e))?;

    Ok(Some(Profile {
        viewer: user.viewer(),
        plantings: plantings
            .into_iter()
            .map(|p| GrowthEntry {
                growth: Growth::between(p.planting.planted_at, now),
                planting: p,
            })
            .collect(),
        areas,
        tips,
    }))
}

/// A user's plantings, newest first, each joined with its plant.
pub async fn plantings_of<B: HostedBackend + ?Sized>(
    backend: &B,
    user_id: &str,
) -> Result<Vec<PlantingWithPlant>, ServiceError> {
    let plantings: Vec<Planting> = backend::fetch(
        backend,
        &Query::from(PLANTINGS_TABLE)
            .eq("usuario_id", user_id)
            .order("data_plantio", false),
    )
    .await
    .map_err(|e| ServiceError::backend("Erro ao carregar plantios", e))?;

    if plantings.is_empty() {
        return Ok(Vec::new());
    }

    let mut ids: Vec<String> = plantings.iter().map(|p| p.plant_id.clone()).collect();
    ids.sort();
    ids.dedup();
    let plants: Vec<Plant> = backend::fetch(backend, &Query::from(PLANTS_TABLE).is_in("id", ids))
        .await
        .map_err(|e| ServiceError::backend("Erro ao buscar plantas", e))?;

    Ok(plantings
        .into_iter()
        .map(|planting| {
            let plant = plants.iter().find(|p| p.id == planting.plant_id).cloned();
            PlantingWithPlant { planting, plant }
        })
        .collect())
}

// ─── tests ───────────────────────────────────────────────────────────────
