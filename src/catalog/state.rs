//! Shared application state.
//!
//! The live record set and the search index built from it sit behind a single
//! lock, so a reader always sees an index that matches the instructions it
//! resolves hits against. Every write goes to disk first and only then
//! replaces the live set and rebuilds the index.

use super::store::{INSTRUCTIONS_FILE, JsonFileStore, MODULES_FILE};
use super::types::{Instruction, Module};
use crate::config::AdminCredentials;
use crate::search::assistant;
use crate::search::engine::SearchIndex;
use crate::search::types::AssistantReply;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory copy of the data files plus the index over `instructions`.
#[derive(Debug, Default)]
pub struct LiveCatalog {
    pub modules: Vec<Module>,
    pub instructions: Vec<Instruction>,
    pub index: SearchIndex,
}

impl LiveCatalog {
    pub fn new(modules: Vec<Module>, instructions: Vec<Instruction>) -> Self {
        let index = SearchIndex::build(&instructions);
        Self {
            modules,
            instructions,
            index,
        }
    }

    pub fn search(&self, query: &str, scope: Option<&str>, limit: usize) -> Vec<&Instruction> {
        self.index.search(&self.instructions, query, scope, limit)
    }

    pub fn suggest(&self, message: &str) -> Option<AssistantReply> {
        assistant::suggest(&self.index, &self.instructions, message)
    }

    fn replace_instructions(&mut self, instructions: Vec<Instruction>) {
        self.index.build_index(&instructions);
        self.instructions = instructions;
    }
}

pub struct CatalogState {
    live: RwLock<LiveCatalog>,
    modules_store: JsonFileStore<Module>,
    instructions_store: JsonFileStore<Instruction>,
    admin: AdminCredentials,
}

impl CatalogState {
    /// Opens (or creates) the data files in `data_dir` and loads them.
    pub async fn open(data_dir: &Path, admin: AdminCredentials) -> Result<Arc<Self>> {
        let modules_store = JsonFileStore::open(data_dir.join(MODULES_FILE)).await?;
        let instructions_store = JsonFileStore::open(data_dir.join(INSTRUCTIONS_FILE)).await?;

        let state = Arc::new(Self {
            live: RwLock::new(LiveCatalog::default()),
            modules_store,
            instructions_store,
            admin,
        });
        state.reload().await;

        Ok(state)
    }

    /// Re-reads both data files and rebuilds the index.
    /// Returns `(modules, instructions)` counts.
    pub async fn reload(&self) -> (usize, usize) {
        let modules = self.modules_store.load().await;
        let instructions = self.instructions_store.load().await;
        let counts = (modules.len(), instructions.len());

        *self.live.write().await = LiveCatalog::new(modules, instructions);

        tracing::info!(
            "Catalog loaded: {} modules, {} instructions",
            counts.0,
            counts.1
        );
        counts
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, LiveCatalog> {
        self.live.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, LiveCatalog> {
        self.live.write().await
    }

    pub fn admin(&self) -> &AdminCredentials {
        &self.admin
    }

    /// Persists `modules` and, on success, makes them the live set.
    pub async fn commit_modules(&self, live: &mut LiveCatalog, modules: Vec<Module>) -> Result<()> {
        self.modules_store.save(&modules).await?;
        live.modules = modules;
        Ok(())
    }

    /// Persists `instructions` and, on success, makes them the live set and
    /// rebuilds the search index from them.
    pub async fn commit_instructions(
        &self,
        live: &mut LiveCatalog,
        instructions: Vec<Instruction>,
    ) -> Result<()> {
        self.instructions_store.save(&instructions).await?;
        live.replace_instructions(instructions);
        Ok(())
    }
}
