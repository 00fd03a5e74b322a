//! Native search map. Reads `pinpoint.json` from the working directory if it exists.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
use pinpoint::{PinpointError, SearchMapConfig};

#[cfg(not(target_arch = "wasm32"))]
const CONFIG_FILE: &str = "pinpoint.json";

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &Path) -> Result<SearchMapConfig, PinpointError> {
    if !path.exists() {
        return Ok(SearchMapConfig::default());
    }

    let json = std::fs::read_to_string(path)?;
    SearchMapConfig::from_json(&json)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), PinpointError> {
    let config = load_config(Path::new(CONFIG_FILE))?;
    pinpoint_egui::run(config)
}

#[cfg(target_arch = "wasm32")]
fn main() {}
