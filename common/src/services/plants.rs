//! Plant catalog access: listing, lookup, image upload and creation.

use chrono::Utc;
use tracing::{error, info};

use crate::backend::{self, HostedBackend, Query};
use crate::error::ServiceError;
use crate::form::PlantForm;
use crate::model::{NewPlant, Plant, PLANTS_TABLE};
use crate::upload::ImageUpload;

/// All plants ordered by name.
pub async fn get_all<B: HostedBackend + ?Sized>(backend: &B) -> Result<Vec<Plant>, ServiceError> {
    let query = Query::from(PLANTS_TABLE).order("nome", true);
    backend::fetch(backend, &query).await.map_err(|e| {
        error!("Erro ao buscar plantas: {e}");
        ServiceError::backend("Erro ao buscar plantas", e)
    })
}

pub async fn get_by_id<B: HostedBackend + ?Sized>(
    backend: &B,
    id: &str,
) -> Result<Option<Plant>, ServiceError> {
    backend::fetch_optional(backend, Query::from(PLANTS_TABLE).eq("id", id))
        .await
        .map_err(|e| ServiceError::backend("Erro ao carregar informações da planta", e))
}

/// Zero or one plant with exactly this name.
pub async fn find_by_name<B: HostedBackend + ?Sized>(
    backend: &B,
    name: &str,
) -> Result<Option<Plant>, ServiceError> {
    backend::fetch_optional(backend, Query::from(PLANTS_TABLE).eq("nome", name))
        .await
        .map_err(|e| ServiceError::backend("Erro ao buscar plantas", e))
}

/// Validate and store an image in `bucket`, returning its public address.
///
/// Validation failures return before anything is sent to the backend.
pub async fn upload_image<B: HostedBackend + ?Sized>(
    backend: &B,
    bucket: &str,
    file: ImageUpload,
) -> Result<String, ServiceError> {
    file.validate()?;

    let name = file.storage_name(Utc::now().timestamp_millis());
    backend
        .upload(bucket, &name, &file.content_type, file.bytes)
        .await
        .map_err(|e| {
            error!("Erro no upload da imagem: {e}");
            ServiceError::backend("Erro no upload", e)
        })?;
    Ok(backend.public_url(bucket, &name))
}

pub async fn create<B: HostedBackend + ?Sized>(
    backend: &B,
    plant: &NewPlant,
) -> Result<(), ServiceError> {
    backend::insert(backend, PLANTS_TABLE, plant).await.map_err(|e| {
        error!("Erro ao salvar planta no banco: {e}");
        ServiceError::backend("Erro ao salvar planta", e)
    })?;
    info!("Plant {:?} created", plant.name);
    Ok(())
}

/// Full admin submission: validate, upload the optional image, insert.
///
/// A failed insert after a successful upload leaves the stored file behind.
pub async fn create_from_form<B: HostedBackend + ?Sized>(
    backend: &B,
    bucket: &str,
    form: &PlantForm,
    image: Option<ImageUpload>,
) -> Result<(), ServiceError> {
    form.validate()?;
    if let Some(file) = &image {
        file.validate()?;
    }

    let image_url = match image {
        Some(file) => Some(upload_image(backend, bucket, file).await?),
        None => None,
    };
    create(backend, &form.to_new_plant(image_url)).await
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;
    use crate::error::BackendError;
    use crate::upload::MAX_IMAGE_SIZE_BYTES;
    use serde_json::json;

    fn seed_plant(db: &MemoryBackend, id: i64, name: &str) {
        db.seed(
            PLANTS_TABLE,
            json!({
                "id": id,
                "nome": name,
                "nome_cientifico": format!("{name} sp."),
                "caracteristicas": [],
                "created_at": "2024-01-01T00:00:00+00:00"
            }),
        );
    }

    #[tokio::test]
    async fn test_get_all_sorted_by_name() {
        let db = MemoryBackend::new();
        seed_plant(&db, 1, "Pitanga");
        seed_plant(&db, 2, "Araçá");
        seed_plant(&db, 3, "Ipê");
        let names: Vec<String> = get_all(&db).await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Araçá", "Ipê", "Pitanga"]);
    }

    #[tokio::test]
    async fn test_get_by_id_and_name() {
        let db = MemoryBackend::new();
        seed_plant(&db, 42, "Pitanga");
        assert_eq!(get_by_id(&db, "42").await.unwrap().unwrap().name, "Pitanga");
        assert!(get_by_id(&db, "7").await.unwrap().is_none());
        assert!(find_by_name(&db, "Pitanga").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_upload_rejects_without_network() {
        let db = MemoryBackend::new();
        let pdf = ImageUpload::new("doc.pdf", "application/pdf", vec![1; 10]);
        assert!(upload_image(&db, "plantas", pdf).await.is_err());

        let huge = ImageUpload::new("big.png", "image/png", vec![0; MAX_IMAGE_SIZE_BYTES]);
        assert!(upload_image(&db, "plantas", huge).await.is_err());

        assert_eq!(db.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let db = MemoryBackend::new();
        let img = ImageUpload::new("foto.jpg", "image/jpeg", vec![1, 2, 3]);
        let url = upload_image(&db, "plantas", img).await.unwrap();
        let stored = db.objects("plantas");
        assert_eq!(stored.len(), 1);
        assert!(stored[0].ends_with(".jpg"));
        assert_eq!(url, format!("memory://storage/plantas/{}", stored[0]));
    }

    #[tokio::test]
    async fn test_create_error_is_prefixed() {
        let db = MemoryBackend::new();
        db.fail_inserts_into(PLANTS_TABLE, BackendError::new("permission denied"));
        let mut form = PlantForm::default();
        form.set("nome", "Ipê");
        form.set("nomeCientifico", "Handroanthus albus");
        let err = create_from_form(&db, "plantas", &form, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Erro ao salvar planta: permission denied");
    }
}
