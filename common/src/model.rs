//! Rows exchanged with the hosted database.
//!
//! Field names follow the hosted schema (`plantas`, `plantios`, ...), so the
//! structs serialise straight into PostgREST payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ─── Tables ──────────────────────────────────────────────────────────────────

pub const PLANTS_TABLE: &str = "plantas";
pub const USERS_TABLE: &str = "usuarios";
pub const PLANTINGS_TABLE: &str = "plantios";
pub const AREAS_TABLE: &str = "areas_plantio";
pub const PUBLICATIONS_TABLE: &str = "publicacoes";

/// Status written on every new planting.
pub const STATUS_PLANTED: &str = "plantado";

/// Display name used when the auth metadata carries none.
pub const DEFAULT_USER_NAME: &str = "Usuário";

/// Rows that can be located by primary key inside a fetched list.
pub trait Identified {
    fn id(&self) -> &str;
}

// ─── Plant ───────────────────────────────────────────────────────────────────

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    #[serde(deserialize_with = "row_id")]
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nome_cientifico")]
    pub scientific_name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "imagem_url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "caracteristicas", default)]
    pub characteristics: Vec<String>,
    #[serde(rename = "curiosidades", default)]
    pub trivia: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Identified for Plant {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Insert payload for `plantas`; `id` and `created_at` are assigned by the
/// database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlant {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nome_cientifico")]
    pub scientific_name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "imagem_url")]
    pub image_url: Option<String>,
    #[serde(rename = "caracteristicas")]
    pub characteristics: Vec<String>,
    #[serde(rename = "curiosidades")]
    pub trivia: Option<String>,
}

// ─── User ────────────────────────────────────────────────────────────────────

/// Application-side user record, keyed by the auth provider's user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "row_id")]
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `usuarios`. Unlike the other tables the id is ours to
/// supply: it must match the auth user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Role stored in auth metadata under `tipo_usuario`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Anything other than the literal `"admin"` is an ordinary user.
    pub fn from_metadata(value: Option<&str>) -> Self {
        match value {
            Some("admin") => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// The signed-in person as the views see them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
}

impl Viewer {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// ─── Planting ────────────────────────────────────────────────────────────────

/// A user's commitment to grow one plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planting {
    #[serde(deserialize_with = "row_id")]
    pub id: String,
    #[serde(rename = "usuario_id", deserialize_with = "row_id")]
    pub user_id: String,
    #[serde(rename = "planta_id", deserialize_with = "row_id")]
    pub plant_id: String,
    #[serde(rename = "data_plantio")]
    pub planted_at: DateTime<Utc>,
    #[serde(rename = "local", default)]
    pub location: Option<String>,
    pub status: String,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Identified for Planting {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Insert payload for `plantios`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlanting {
    #[serde(rename = "usuario_id")]
    pub user_id: String,
    #[serde(rename = "planta_id")]
    pub plant_id: String,
    #[serde(rename = "local")]
    pub location: String,
    pub status: String,
    #[serde(rename = "data_plantio")]
    pub planted_at: DateTime<Utc>,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A planting together with the plant it refers to (profile page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantingWithPlant {
    pub planting: Planting,
    pub plant: Option<Plant>,
}

// ─── Reference content ───────────────────────────────────────────────────────

/// A public place where plantings happen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantingArea {
    #[serde(deserialize_with = "row_id")]
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "localizacao")]
    pub location: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "imagem_url", default)]
    pub image_url: Option<String>,
}

impl Identified for PlantingArea {
    fn id(&self) -> &str {
        &self.id
    }
}

/// An article in the publications section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(deserialize_with = "row_id")]
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "conteudo")]
    pub body: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "imagem_capa_url", default)]
    pub cover_url: Option<String>,
    #[serde(rename = "visualizacoes", default)]
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identified for Publication {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Publication {
    /// Body split into display paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body.split('\n')
    }

    /// Creation date the way the site prints it (`dd/mm/yyyy`).
    pub fn published_on(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }
}

/// Keep only publications whose title contains `term`, ignoring case.
pub fn filter_by_title<'a>(publications: &'a [Publication], term: &str) -> Vec<&'a Publication> {
    let needle = term.to_lowercase();
    publications
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}

// ─── Serde helpers ───────────────────────────────────────────────────────────

/// Accept both uuid (string) and serial (integer) primary keys.
fn row_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn publication(title: &str) -> Publication {
        serde_json::from_value(json!({
            "id": title,
            "titulo": title,
            "conteudo": "primeiro\nsegundo",
            "autor": "Equipe",
            "imagem_capa_url": null,
            "visualizacoes": 10,
            "created_at": "2024-03-05T12:00:00+00:00",
            "updated_at": "2024-03-05T12:00:00+00:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_plant_from_postgrest_row() {
        let row = json!({
            "id": 42,
            "nome": "Pitanga",
            "nome_cientifico": "Eugenia uniflora",
            "descricao": null,
            "imagem_url": "https://x/plantas/1.png",
            "caracteristicas": ["Frutífera", "Nativa"],
            "curiosidades": null,
            "created_at": "2024-01-01T10:00:00.123456+00:00"
        });
        let plant: Plant = serde_json::from_value(row).unwrap();
        assert_eq!(plant.id, "42");
        assert_eq!(plant.name, "Pitanga");
        assert_eq!(plant.characteristics.len(), 2);
        assert!(plant.description.is_none());
    }

    #[test]
    fn test_planting_accepts_uuid_ids() {
        let row = json!({
            "id": "7b1c6f0e-0000-4000-8000-000000000001",
            "usuario_id": "user-1",
            "planta_id": 3,
            "data_plantio": "2024-02-01T00:00:00+00:00",
            "local": "Quintal",
            "status": "plantado",
            "created_at": "2024-02-01T00:00:00+00:00"
        });
        let planting: Planting = serde_json::from_value(row).unwrap();
        assert_eq!(planting.plant_id, "3");
        assert_eq!(planting.location.as_deref(), Some("Quintal"));
        assert!(planting.notes.is_none());
    }

    #[test]
    fn test_new_planting_wire_names() {
        let new = NewPlanting {
            user_id: "u".into(),
            plant_id: "42".into(),
            location: "Quintal".into(),
            status: STATUS_PLANTED.into(),
            planted_at: "2024-02-01T00:00:00Z".parse().unwrap(),
            notes: None,
        };
        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["planta_id"], "42");
        assert_eq!(value["status"], "plantado");
        assert_eq!(value["local"], "Quintal");
        assert!(value.get("observacoes").is_none());
    }

    #[test]
    fn test_role_from_metadata() {
        assert_eq!(Role::from_metadata(Some("admin")), Role::Admin);
        assert_eq!(Role::from_metadata(Some("Admin")), Role::User);
        assert_eq!(Role::from_metadata(None), Role::User);
    }

    #[test]
    fn test_filter_by_title_ignores_case() {
        let pubs = vec![publication("Como plantar Ipê"), publication("Regas no verão")];
        let found = filter_by_title(&pubs, "ipê");
        assert_eq!(found.len(), 1);
        assert_eq!(filter_by_title(&pubs, "").len(), 2);
    }

    #[test]
    fn test_publication_paragraphs_and_date() {
        let p = publication("x");
        assert_eq!(p.paragraphs().collect::<Vec<_>>(), vec!["primeiro", "segundo"]);
        assert_eq!(p.published_on(), "05/03/2024");
    }
}
