//! Application skeleton generation.
//!
//! Route files are written beneath a skeleton produced by a
//! [`ProjectScaffolder`] from an [`AppConfig`]. The scaffolder runs once per
//! generation, before any route file is emitted.

use crate::document::Info;
use crate::emitter::write_to_file;
use anyhow::{Context, Result};
use heck::ToKebabCase;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Description used when the schema does not provide one.
pub const DEFAULT_DESCRIPTION: &str = "Swagger converted custom L³ application";

/// Configuration record handed to the scaffolder.
///
/// The values other than `name` and `description` are fixed metadata for the
/// generated application; the generator itself does not act on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub name: String,
    pub description: String,
    pub prefix: String,
    pub asynchronous: String,
    pub timeout: String,
    pub sdk_version: String,
    pub runtime: String,
}

impl AppConfig {
    /// Builds the record for an application called `name`.
    pub fn new(name: &str, info: &Info) -> Self {
        let description = info
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION);

        Self {
            name: name.to_string(),
            description: description.to_string(),
            prefix: "/".to_string(),
            asynchronous: "true".to_string(),
            timeout: "15".to_string(),
            sdk_version: "3".to_string(),
            runtime: "nodejs20.x".to_string(),
        }
    }

    /// Directory holding the whole generated project.
    pub fn project_dir(&self, output_root: &Path) -> PathBuf {
        output_root.join(self.name.to_kebab_case())
    }

    /// Directory holding the application sources.
    pub fn app_dir(&self, output_root: &Path) -> PathBuf {
        self.project_dir(output_root).join(&self.name)
    }
}

/// Materializes the application skeleton that route files are written into.
pub trait ProjectScaffolder {
    /// Creates the skeleton for `config` below `output_root`.
    fn create_files(&self, config: &AppConfig, output_root: &Path) -> Result<()>;
}

/// Default scaffolder: a minimal L³ project layout.
///
/// Produces
///
/// ```text
/// {out}/{kebab-name}/config.json
/// {out}/{kebab-name}/{name}/src/app.js
/// {out}/{kebab-name}/{name}/src/routes/
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SkeletonScaffolder;

impl ProjectScaffolder for SkeletonScaffolder {
    fn create_files(&self, config: &AppConfig, output_root: &Path) -> Result<()> {
        let project_dir = config.project_dir(output_root);
        let src_dir = config.app_dir(output_root).join("src");
        info!("Scaffolding {} in {}", config.name, project_dir.display());

        let routes_dir = src_dir.join("routes");
        fs::create_dir_all(&routes_dir)
            .with_context(|| format!("Failed to create directory: {}", routes_dir.display()))?;

        let json = serde_json::to_string_pretty(config)
            .context("Failed to serialize application config to JSON")?;
        write_to_file(&format!("{}\n", json), &project_dir.join("config.json"))?;

        write_to_file(&app_module(config), &src_dir.join("app.js"))?;

        debug!("Skeleton for {} complete", config.name);
        Ok(())
    }
}

fn app_module(config: &AppConfig) -> String {
    format!(
        "'use strict';\n\
         \n\
         /**\n \
         * {name}\n \
         * {description}\n \
         *\n \
         * runtime: {runtime}, timeout: {timeout}s\n \
         */\n\
         const Router = require('@lambda-lambda-lambda/router');\n\
         \n\
         exports.handler = {async_kw}(event, context, callback) => {{\n  \
         const {{request, response}} = event.Records[0].cf;\n\
         \n  \
         const router = new Router(request, response);\n  \
         router.setPrefix('{prefix}');\n  \
         router.setRoutes(__dirname + '/routes');\n\
         \n  \
         return router.response();\n\
         }};\n",
        name = config.name,
        description = config.description,
        runtime = config.runtime,
        timeout = config.timeout,
        prefix = config.prefix,
        async_kw = if config.asynchronous == "true" { "async " } else { "" },
    )
}
