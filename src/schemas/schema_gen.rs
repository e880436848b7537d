use std::{fs, path::Path};

use schemars::{JsonSchema, schema_for};
use tracing::info;

use crate::utils::{dir::DirUtils, errors::EmptyResult};

pub struct SchemaGen {}

impl SchemaGen {
    pub fn new() -> Self {
        Self {}
    }

    /// Writes the build file schema, for editor completion of provisioner.yaml.
    pub fn execute(&self, output: &Path) -> EmptyResult {
        let path = DirUtils::resolve(&DirUtils::curr_dir()?, output)?;
        self.generate_single::<crate::models::config::Config>(&path)
    }

    fn generate_single<T>(&self, path: &Path) -> EmptyResult
    where
        T: JsonSchema,
    {
        let schema = schema_for!(T);
        let schema_str = serde_json::to_string_pretty(&schema)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, schema_str)?;
        info!("✅ Schema generated successfully at {}", path.display());
        Ok(())
    }
}
