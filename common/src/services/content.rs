//! Read-only content: publications and the home-page highlights.

use serde::{Deserialize, Serialize};

use crate::backend::{self, HostedBackend, Query};
use crate::error::ServiceError;
use crate::model::{Plant, PlantingArea, Publication, AREAS_TABLE, PUBLICATIONS_TABLE};
use crate::services::plants;

/// Featured plant and planting area on the home page. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    pub plant: Option<Plant>,
    pub area: Option<PlantingArea>,
}

/// Publications, most viewed first.
pub async fn publications<B: HostedBackend + ?Sized>(
    backend: &B,
) -> Result<Vec<Publication>, ServiceError> {
    backend::fetch(
        backend,
        &Query::from(PUBLICATIONS_TABLE).order("visualizacoes", false),
    )
    .await
    .map_err(|e| ServiceError::backend("Erro ao carregar publicações", e))
}

pub async fn highlights<B: HostedBackend + ?Sized>(
    backend: &B,
    plant_name: &str,
    area_name: &str,
) -> Result<Highlights, ServiceError> {
    let plant = plants::find_by_name(backend, plant_name).await?;
    let area = backend::fetch_optional(backend, Query::from(AREAS_TABLE).eq("nome", area_name))
        .await
        .map_err(|e| ServiceError::backend("Erro ao carregar áreas de plantio", e))?;
    Ok(Highlights { plant, area })
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_publications_by_views() {
        let db = MemoryBackend::new();
        for (i, views) in [5, 50, 0].into_iter().enumerate() {
            db.seed(
                PUBLICATIONS_TABLE,
                json!({
                    "id": i, "titulo": format!("P{views}"), "conteudo": "", "autor": "A",
                    "visualizacoes": views,
                    "created_at": "2024-01-01T00:00:00+00:00",
                    "updated_at": "2024-01-01T00:00:00+00:00"
                }),
            );
        }
        let titles: Vec<String> = publications(&db).await.unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["P50", "P5", "P0"]);
    }

    #[tokio::test]
    async fn test_highlights_missing_are_none() {
        let db = MemoryBackend::new();
        db.seed(AREAS_TABLE, json!({ "id": 1, "nome": "Parque Moscoso", "localizacao": "Centro" }));
        let h = highlights(&db, "Pitanga", "Parque Moscoso").await.unwrap();
        assert!(h.plant.is_none());
        assert_eq!(h.area.map(|a| a.location), Some("Centro".to_string()));
    }
}
