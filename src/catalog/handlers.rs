use super::state::CatalogState;
use super::types::{
    Instruction, InstructionListParams, InstructionRequest, LoginRequest, LoginResponse,
    MessageResponse, Module, ModuleRequest, ReloadResponse,
};
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::{Extension, Json};
use chrono::Utc;
use std::sync::Arc;

/// Error half of every catalog handler result.
pub type ApiError = (StatusCode, Json<MessageResponse>);

pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
}

fn storage_error(err: anyhow::Error) -> ApiError {
    tracing::error!("Failed to persist catalog change: {:#}", err);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save data")
}

/// Checks the `Authorization: Bearer <token>` header against the admin token.
pub fn authorize(state: &CatalogState, headers: &HeaderMap) -> Result<(), ApiError> {
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == state.admin().token => Ok(()),
        _ => {
            tracing::warn!("Rejected unauthorized admin request");
            Err(api_error(StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ---- AUTH ----

pub async fn handle_login(
    Extension(state): Extension<Arc<CatalogState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let admin = state.admin();
    if req.username == admin.username && req.password == admin.password {
        tracing::info!("Admin {} logged in", req.username);
        Ok(Json(LoginResponse {
            token: admin.token.clone(),
            username: req.username,
        }))
    } else {
        tracing::warn!("Failed login attempt for {:?}", req.username);
        Err(api_error(
            StatusCode::UNAUTHORIZED,
            "Invalid username or password",
        ))
    }
}

// ---- MODULES ----

pub async fn handle_list_modules(
    Extension(state): Extension<Arc<CatalogState>>,
) -> Json<Vec<Module>> {
    let live = state.read().await;
    Json(live.modules.clone())
}

pub async fn handle_create_module(
    Extension(state): Extension<Arc<CatalogState>>,
    headers: HeaderMap,
    Json(req): Json<ModuleRequest>,
) -> Result<(StatusCode, Json<Module>), ApiError> {
    authorize(&state, &headers)?;

    let (Some(code), Some(name)) = (non_empty(req.code), non_empty(req.name)) else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "code and name are required",
        ));
    };

    let now = Utc::now();
    let module = Module {
        id: uuid::Uuid::new_v4().to_string(),
        code,
        name,
        color: req.color,
        created_at: Some(now),
        updated_at: Some(now),
    };

    let mut live = state.write().await;
    let mut modules = live.modules.clone();
    modules.push(module.clone());
    state
        .commit_modules(&mut live, modules)
        .await
        .map_err(storage_error)?;

    tracing::info!("Created module {} ({})", module.id, module.code);
    Ok((StatusCode::CREATED, Json(module)))
}

/// Empty or absent fields keep their previous value.
pub async fn handle_update_module(
    Extension(state): Extension<Arc<CatalogState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<ModuleRequest>,
) -> Result<Json<Module>, ApiError> {
    authorize(&state, &headers)?;

    let mut live = state.write().await;
    let mut modules = live.modules.clone();
    let Some(module) = modules.iter_mut().find(|m| m.id == id) else {
        return Err(api_error(StatusCode::NOT_FOUND, "Module not found"));
    };

    if let Some(code) = non_empty(req.code) {
        module.code = code;
    }
    if let Some(name) = non_empty(req.name) {
        module.name = name;
    }
    if let Some(color) = non_empty(req.color) {
        module.color = Some(color);
    }
    module.updated_at = Some(Utc::now());
    let updated = module.clone();

    state
        .commit_modules(&mut live, modules)
        .await
        .map_err(storage_error)?;

    tracing::info!("Updated module {}", id);
    Ok(Json(updated))
}

pub async fn handle_delete_module(
    Extension(state): Extension<Arc<CatalogState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Module>, ApiError> {
    authorize(&state, &headers)?;

    let mut live = state.write().await;
    let mut modules = live.modules.clone();
    let Some(position) = modules.iter().position(|m| m.id == id) else {
        return Err(api_error(StatusCode::NOT_FOUND, "Module not found"));
    };
    let deleted = modules.remove(position);

    state
        .commit_modules(&mut live, modules)
        .await
        .map_err(storage_error)?;

    tracing::info!("Deleted module {}", id);
    Ok(Json(deleted))
}

// ---- INSTRUCTIONS ----

/// Plain list filter: exact module match plus a case-insensitive substring
/// match on title, transaction code or notes. Ranked search lives under
/// `/api/search`.
pub async fn handle_list_instructions(
    Extension(state): Extension<Arc<CatalogState>>,
    Query(params): Query<InstructionListParams>,
) -> Json<Vec<Instruction>> {
    let live = state.read().await;
    let module_id = non_empty(params.module_id);
    let needle = non_empty(params.search).map(|s| s.to_lowercase());

    let instructions = live
        .instructions
        .iter()
        .filter(|i| match &module_id {
            Some(module_id) => i.module_id.as_ref() == Some(module_id),
            None => true,
        })
        .filter(|i| match &needle {
            Some(needle) => [&i.title, &i.transaction_code, &i.notes]
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .cloned()
        .collect();

    Json(instructions)
}

pub async fn handle_get_instruction(
    Extension(state): Extension<Arc<CatalogState>>,
    Path(id): Path<String>,
) -> Result<Json<Instruction>, ApiError> {
    let live = state.read().await;
    let found = live.instructions.iter().find(|i| i.id == id).cloned();

    found
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Instruction not found"))
}

pub async fn handle_create_instruction(
    Extension(state): Extension<Arc<CatalogState>>,
    headers: HeaderMap,
    Json(req): Json<InstructionRequest>,
) -> Result<(StatusCode, Json<Instruction>), ApiError> {
    authorize(&state, &headers)?;

    let (Some(title), Some(module_id)) = (non_empty(req.title), non_empty(req.module_id)) else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "title and moduleId are required",
        ));
    };

    let now = Utc::now();
    let instruction = Instruction {
        id: uuid::Uuid::new_v4().to_string(),
        title,
        module_id: Some(module_id),
        transaction_code: req.transaction_code.unwrap_or_default(),
        steps: req.steps.unwrap_or_default(),
        notes: req.notes.unwrap_or_default(),
        media: req.media.unwrap_or_default(),
        created_at: Some(now),
        updated_at: Some(now),
    };

    let mut live = state.write().await;
    let mut instructions = live.instructions.clone();
    instructions.push(instruction.clone());
    state
        .commit_instructions(&mut live, instructions)
        .await
        .map_err(storage_error)?;

    tracing::info!("Created instruction {} ({})", instruction.id, instruction.title);
    Ok((StatusCode::CREATED, Json(instruction)))
}

/// Absent fields keep their previous value; present ones (even empty) replace it.
pub async fn handle_update_instruction(
    Extension(state): Extension<Arc<CatalogState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<InstructionRequest>,
) -> Result<Json<Instruction>, ApiError> {
    authorize(&state, &headers)?;

    let mut live = state.write().await;
    let mut instructions = live.instructions.clone();
    let Some(instruction) = instructions.iter_mut().find(|i| i.id == id) else {
        return Err(api_error(StatusCode::NOT_FOUND, "Instruction not found"));
    };

    if let Some(title) = req.title {
        instruction.title = title;
    }
    if let Some(module_id) = req.module_id {
        instruction.module_id = Some(module_id);
    }
    if let Some(code) = req.transaction_code {
        instruction.transaction_code = code;
    }
    if let Some(steps) = req.steps {
        instruction.steps = steps;
    }
    if let Some(notes) = req.notes {
        instruction.notes = notes;
    }
    if let Some(media) = req.media {
        instruction.media = media;
    }
    instruction.updated_at = Some(Utc::now());
    let updated = instruction.clone();

    state
        .commit_instructions(&mut live, instructions)
        .await
        .map_err(storage_error)?;

    tracing::info!("Updated instruction {}", id);
    Ok(Json(updated))
}

pub async fn handle_delete_instruction(
    Extension(state): Extension<Arc<CatalogState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Instruction>, ApiError> {
    authorize(&state, &headers)?;

    let mut live = state.write().await;
    let mut instructions = live.instructions.clone();
    let Some(position) = instructions.iter().position(|i| i.id == id) else {
        return Err(api_error(StatusCode::NOT_FOUND, "Instruction not found"));
    };
    let deleted = instructions.remove(position);

    state
        .commit_instructions(&mut live, instructions)
        .await
        .map_err(storage_error)?;

    tracing::info!("Deleted instruction {}", id);
    Ok(Json(deleted))
}

// ---- DATA RELOAD ----

/// Re-reads the data files (e.g. after editing them by hand) and rebuilds
/// the search index.
pub async fn handle_reload(
    Extension(state): Extension<Arc<CatalogState>>,
    headers: HeaderMap,
) -> Result<Json<ReloadResponse>, ApiError> {
    authorize(&state, &headers)?;

    let (modules, instructions) = state.reload().await;
    Ok(Json(ReloadResponse {
        modules,
        instructions,
    }))
}
