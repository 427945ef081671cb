//! REST client for the workout backend. All requests carry the bearer token
//! from localStorage and a JSON content type; calls are fire-and-wait with
//! no retry, a failure surfaces as an `Err(String)` for the page to toast.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use serde::Serialize;

use crate::storage;
use crate::types::{Exercise, RoutineDetail, SetEntry};

const API_URL: &str = "/api";

/// `POST /series` payload.
#[derive(Serialize, Debug)]
pub struct NewSet {
    #[serde(rename = "id_rutina")]
    pub routine_id: i64,
    #[serde(rename = "id_ejercicio")]
    pub exercise_id: i64,
    #[serde(rename = "numero_serie")]
    pub set_number: u32,
    #[serde(rename = "repeticiones")]
    pub reps: u32,
    #[serde(rename = "peso_usado")]
    pub weight: Option<f64>,
    #[serde(rename = "descanso_segundos")]
    pub rest_secs: u32,
}

/// `PUT /series/{id}` payload. Field-level edits send the full merged record.
#[derive(Serialize, Debug)]
pub struct SetUpdate {
    #[serde(rename = "numero_serie")]
    pub set_number: u32,
    #[serde(rename = "repeticiones")]
    pub reps: u32,
    #[serde(rename = "peso_usado")]
    pub weight: Option<f64>,
    #[serde(rename = "descanso_segundos")]
    pub rest_secs: u32,
}

impl SetUpdate {
    pub fn from_entry(entry: &SetEntry) -> Self {
        Self {
            set_number: entry.set_number,
            reps: entry.reps,
            weight: entry.weight,
            rest_secs: entry.rest_or_default(),
        }
    }
}

#[derive(Serialize, Debug)]
struct RoutineUpdate {
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "fecha")]
    date: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
struct CreatedSet {
    #[serde(rename = "id_serie")]
    id: i64,
}

fn auth_headers() -> Result<Headers, String> {
    let headers = Headers::new().map_err(|_| "No se pudieron crear las cabeceras")?;
    let token = storage::load_token().unwrap_or_default();
    headers
        .set("Authorization", &format!("Bearer {}", token))
        .map_err(|_| "No se pudo establecer la autorización")?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|_| "No se pudo establecer el tipo de contenido")?;
    Ok(headers)
}

fn request_init(method: &str, body: Option<&str>, headers: &Headers) -> RequestInit {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(b) = body {
        opts.set_body(&JsValue::from_str(b));
    }
    opts.set_headers(&JsValue::from(headers));
    opts
}

async fn send(method: &str, path: &str, body: Option<String>) -> Result<Response, String> {
    let window = web_sys::window().ok_or("no window")?;
    let headers = auth_headers()?;
    let opts = request_init(method, body.as_deref(), &headers);

    let url = format!("{}{}", API_URL, path);
    let request =
        Request::new_with_str_and_init(&url, &opts).map_err(|_| "Petición inválida")?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "Error de conexión con el servidor")?;
    resp_value.dyn_into().map_err(|_| "Respuesta inválida".to_string())
}

async fn response_json(resp: &Response) -> Result<JsValue, String> {
    let promise = resp.json().map_err(|_| "La respuesta no es JSON")?;
    JsFuture::from(promise)
        .await
        .map_err(|_| "No se pudo leer la respuesta".to_string())
}

/// `GET /rutinas/{id}`: the routine plus its sets joined with exercise
/// name and muscle group. A 404 is reported as "not found".
pub async fn fetch_routine(routine_id: i64) -> Result<RoutineDetail, String> {
    let resp = send("GET", &format!("/rutinas/{}", routine_id), None).await?;
    if resp.status() == 404 {
        return Err("Rutina no encontrada".into());
    }
    if !resp.ok() {
        return Err("Error al cargar la rutina".into());
    }
    let json = response_json(&resp).await?;
    serde_wasm_bindgen::from_value(json).map_err(|_| "Respuesta de rutina inválida".into())
}

/// `PUT /rutinas/{id}` with `{nombre, fecha}`.
pub async fn update_routine(
    routine_id: i64,
    name: &str,
    date: Option<String>,
) -> Result<(), String> {
    let body = serde_json::to_string(&RoutineUpdate { name: name.to_string(), date })
        .map_err(|e| e.to_string())?;
    let resp = send("PUT", &format!("/rutinas/{}", routine_id), Some(body)).await?;
    if !resp.ok() {
        return Err("Error al guardar los cambios".into());
    }
    Ok(())
}

/// `GET /ejercicios`: the full exercise catalog.
pub async fn fetch_exercises() -> Result<Vec<Exercise>, String> {
    let resp = send("GET", "/ejercicios", None).await?;
    if !resp.ok() {
        return Err("Error al cargar ejercicios".into());
    }
    let json = response_json(&resp).await?;
    serde_wasm_bindgen::from_value(json).map_err(|_| "Catálogo inválido".into())
}

/// `POST /series`: create a set, returns the new set id.
pub async fn create_set(new_set: &NewSet) -> Result<i64, String> {
    let body = serde_json::to_string(new_set).map_err(|e| e.to_string())?;
    let resp = send("POST", "/series", Some(body)).await?;
    if !resp.ok() {
        return Err("Error al agregar la serie".into());
    }
    let json = response_json(&resp).await?;
    let created: CreatedSet =
        serde_wasm_bindgen::from_value(json).map_err(|_| "Respuesta de serie inválida")?;
    Ok(created.id)
}

/// `PUT /series/{id}`: update a set's fields.
pub async fn update_set(set_id: i64, update: &SetUpdate) -> Result<(), String> {
    let body = serde_json::to_string(update).map_err(|e| e.to_string())?;
    let resp = send("PUT", &format!("/series/{}", set_id), Some(body)).await?;
    if !resp.ok() {
        return Err("Error al actualizar la serie".into());
    }
    Ok(())
}

/// `DELETE /series/{id}`.
pub async fn delete_set(set_id: i64) -> Result<(), String> {
    let resp = send("DELETE", &format!("/series/{}", set_id), None).await?;
    if !resp.ok() {
        return Err("Error al eliminar la serie".into());
    }
    Ok(())
}
