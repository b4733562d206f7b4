pub mod activation;
pub mod alter;
pub mod apply;
pub mod ddl;
pub mod delta;
pub mod ir;
pub mod keys;
pub mod lenient;
pub mod naming;
pub mod schema;
pub mod template;
pub mod templates;
pub mod types;

use wasm_bindgen::prelude::*;

pub use alter::{
    AlterScriptGenerator, GenerateError, GenerateOptions, Scope, generate_container_script, generate_for_scope,
    generate_script, generate_script_from_str, generate_view_script,
};
pub use apply::{ApplyError, ApplyReport, Applier, OracleError, StatementExecutor, apply_script, split_script};
pub use ddl::DdlProvider;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render a delta document (JSON text) to an Oracle alter script
#[wasm_bindgen(js_name = "generateScript")]
pub fn render_alter_script(delta: &str, db_version: Option<String>) -> Result<String, String> {
    let options = GenerateOptions { db_version };
    generate_script_from_str(delta, &options).map_err(|e| e.to_string())
}

/// Always rejected: delta scripts exist only for the whole model
#[wasm_bindgen(js_name = "generateViewScript")]
pub fn render_view_script(delta: &str) -> Result<String, String> {
    generate_view_script(delta, &GenerateOptions::default()).map_err(|e| e.to_string())
}

/// Always rejected: delta scripts exist only for the whole model
#[wasm_bindgen(js_name = "generateContainerScript")]
pub fn render_container_script(delta: &str) -> Result<String, String> {
    generate_container_script(delta, &GenerateOptions::default()).map_err(|e| e.to_string())
}
