//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document for the itinerary REST API. The output path is the
//! first argument and defaults to `openapi.json`.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let doc = ApiDoc::openapi();
    let operations = doc.paths.paths.len();
    std::fs::write(&path, doc.to_pretty_json()?)?;

    println!("Wrote {} API paths to {}", operations, path);
    Ok(())
}
