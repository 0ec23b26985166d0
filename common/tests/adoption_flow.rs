//! End-to-end flows against the in-memory backend: catalog, adoption and the
//! profile view, driven the way the pages drive them.

use chrono::{Duration, Utc};
use serde_json::json;

use florescer_common::backend::memory::MemoryBackend;
use florescer_common::form::{AdoptionForm, PlantForm, SignupForm};
use florescer_common::model::{PLANTINGS_TABLE, PLANTS_TABLE, STATUS_PLANTED};
use florescer_common::route::{parse_fragment, Navigator, Page, Route};
use florescer_common::services::{adoption, auth, plants, profile};
use florescer_common::upload::ImageUpload;
use florescer_common::ServiceError;

fn signup(name: &str, email: &str, admin: bool) -> SignupForm {
    SignupForm {
        name: name.into(),
        email: email.into(),
        password: "segredo".into(),
        confirm: "segredo".into(),
        admin,
    }
}

#[tokio::test]
async fn test_adopt_from_fragment_then_duplicate() {
    let db = MemoryBackend::new();
    db.seed(
        PLANTS_TABLE,
        json!({
            "id": 42, "nome": "Pitanga", "nome_cientifico": "Eugenia uniflora",
            "created_at": "2024-01-01T00:00:00+00:00"
        }),
    );
    let account = auth::sign_up(&db, &signup("Ana", "ana@example.com", false)).await.unwrap();
    let session = db.with_token(&account.session.unwrap().access_token);

    let route = parse_fragment("#/adocao?id=42");
    assert_eq!(route.page, Page::Adoption);
    let plant_id = route.param("id").unwrap();
    let plant = plants::get_by_id(&session, plant_id).await.unwrap().unwrap();
    assert_eq!(plant.name, "Pitanga");

    let form = AdoptionForm {
        location: "Quintal".into(),
        notes: String::new(),
    };
    adoption::adopt(&session, plant_id, &form, Utc::now()).await.unwrap();

    let rows = db.rows(PLANTINGS_TABLE);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["planta_id"], "42");
    assert_eq!(rows[0]["status"], STATUS_PLANTED);
    assert_eq!(rows[0]["local"], "Quintal");

    let again = adoption::adopt(&session, plant_id, &form, Utc::now()).await;
    assert_eq!(again.unwrap_err(), ServiceError::DuplicateAdoption);
    assert_eq!(db.rows(PLANTINGS_TABLE).len(), 1);

    let mut nav = Navigator::from_fragment("#/adocao?id=42");
    let write = nav.navigate(Route::new(Page::AdoptionSuccess), "#/adocao?id=42");
    assert_eq!(write.as_deref(), Some("#/adocaoSucesso"));
}

#[tokio::test]
async fn test_admin_creates_plant_then_user_adopts_and_sees_growth() {
    let db = MemoryBackend::new();
    let admin = auth::sign_up(&db, &signup("Admin", "admin@example.com", true)).await.unwrap();
    let admin = db.with_token(&admin.session.unwrap().access_token);
    auth::require_admin(&admin).await.unwrap();

    let mut form = PlantForm::default();
    form.set("nome", "Ipê Amarelo");
    form.set("nomeCientifico", "Handroanthus albus");
    form.set("caracteristicasTexto", "Flores amarelas\n\nCaducifólia\n");
    let image = ImageUpload::new("ipe.JPG", "image/jpeg", vec![0xFF, 0xD8, 0xFF]);
    plants::create_from_form(&admin, "plantas", &form, Some(image)).await.unwrap();

    assert_eq!(db.objects("plantas").len(), 1);
    let catalog = plants::get_all(&db).await.unwrap();
    assert_eq!(catalog.len(), 1);
    let ipe = &catalog[0];
    assert_eq!(ipe.characteristics, vec!["Flores amarelas", "Caducifólia"]);
    assert!(ipe.image_url.as_deref().is_some_and(|u| u.ends_with(".jpg")));

    let user = auth::sign_up(&db, &signup("Bia", "bia@example.com", false)).await.unwrap();
    let user = db.with_token(&user.session.unwrap().access_token);
    assert!(auth::require_admin(&user).await.is_err());

    let planted = Utc::now() - Duration::days(12);
    let form = AdoptionForm {
        location: "Vaso na varanda".into(),
        notes: "rega dia sim dia não".into(),
    };
    adoption::adopt(&user, &ipe.id, &form, planted).await.unwrap();

    let mine = profile::load(&user, 3, Utc::now()).await.unwrap().unwrap();
    assert_eq!(mine.viewer.name, "Bia");
    assert_eq!(mine.plantings.len(), 1);
    let entry = &mine.plantings[0];
    assert_eq!(entry.growth.days, 12);
    assert_eq!(entry.growth.bar_percent, 12);
    assert_eq!(entry.planting.planting.notes.as_deref(), Some("rega dia sim dia não"));
    assert_eq!(entry.planting.plant.as_ref().map(|p| p.name.as_str()), Some("Ipê Amarelo"));
}

#[tokio::test]
async fn test_oversized_image_never_reaches_storage() {
    let db = MemoryBackend::new();
    let mut form = PlantForm::default();
    form.set("nome", "Pitanga");
    form.set("nomeCientifico", "Eugenia uniflora");
    let image = ImageUpload::new("big.png", "image/png", vec![0; 5 * 1024 * 1024]);

    let err = plants::create_from_form(&db, "plantas", &form, Some(image)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(db.calls(), 0);
    assert!(db.rows(PLANTS_TABLE).is_empty());
}
