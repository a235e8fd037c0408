#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod complex;
pub mod parse;
pub mod scene;

use std::fmt;

use complex::color::Rgb;
use indexmap::IndexMap;
use scene::{DEFAULT_SHRINK_FACTOR, LayerBuffer, LayerSet, SceneData};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("kon rayon threadpool niet initialiseren: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize)]
struct LayerExport<'a> {
    positions: &'a [[f64; 3]],
    colors: &'a [Rgb],
    satisfying_count: usize,
}

#[derive(Debug, Serialize)]
struct LayerSetExport<'a> {
    points: LayerExport<'a>,
    edges: LayerExport<'a>,
    triangles: LayerExport<'a>,
    tetrahedrons: LayerExport<'a>,
}

#[derive(Debug, Serialize)]
struct SceneExport<'a> {
    atoms: Vec<&'a str>,
    shrink_factor: f64,
    base: LayerSetExport<'a>,
    properties: IndexMap<&'a str, LayerSetExport<'a>>,
}

#[derive(Debug, Serialize)]
struct TetrahedraExport<'a> {
    base: &'a [[f64; 3]],
    properties: IndexMap<&'a str, &'a [[f64; 3]]>,
}

fn layer_export(buffer: &LayerBuffer) -> LayerExport<'_> {
    LayerExport {
        positions: &buffer.positions,
        colors: &buffer.colors,
        satisfying_count: buffer.satisfying_count,
    }
}

fn layer_set_export(set: &LayerSet) -> LayerSetExport<'_> {
    LayerSetExport {
        points: layer_export(&set.points),
        edges: layer_export(&set.edges),
        triangles: layer_export(&set.triangles),
        tetrahedrons: layer_export(&set.tetrahedra),
    }
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    scene: Option<SceneData>,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            scene: None,
        }
    }

    /// Geeft terug of de engine de minimale initialisatie heeft doorlopen.
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Laad het geometrie- en valuatiedocument (en optioneel een
    /// kleurdocument) en bouw de scène in één keer op. De vorige scène wordt
    /// in zijn geheel vervangen; bij een fout blijft hij staan.
    #[wasm_bindgen]
    pub fn load(
        &mut self,
        model_json: &str,
        atoms_json: &str,
        colors_json: Option<String>,
    ) -> Result<(), JsValue> {
        let complex = parse::model_json::parse_model_str(model_json).map_err(to_js_error)?;
        let valuations =
            parse::model_json::parse_valuations_str(atoms_json).map_err(to_js_error)?;
        let colors = match colors_json.as_deref() {
            Some(input) => Some(parse::model_json::parse_colors_str(input).map_err(to_js_error)?),
            None => None,
        };

        debug_log!(
            "scène laden: {} simplexen, {} proposities",
            complex.simplex_count(),
            valuations.len()
        );

        let scene = SceneData::load(complex, valuations, colors, DEFAULT_SHRINK_FACTOR)
            .map_err(to_js_error)?;
        self.scene = Some(scene);
        Ok(())
    }

    /// Propositienamen in declaratievolgorde, voor de GUI-keuzelijst.
    #[wasm_bindgen]
    pub fn get_properties(&self) -> Result<JsValue, JsValue> {
        let scene = match self.scene.as_ref() {
            Some(scene) => scene,
            None => return Err(js_error("er is geen model geladen")),
        };

        let atoms: Vec<&str> = scene.valuations().atom_names().collect();
        serde_wasm_bindgen::to_value(&atoms).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Alle tekenbuffers: de basislaag plus per propositie de
    /// gepartitioneerde lagen met hun groepsgrenzen.
    #[wasm_bindgen]
    pub fn get_layers(&self) -> Result<JsValue, JsValue> {
        let scene = match self.scene.as_ref() {
            Some(scene) => scene,
            None => return Err(js_error("er is geen model geladen")),
        };

        let export = SceneExport {
            atoms: scene.valuations().atom_names().collect(),
            shrink_factor: scene.shrink_factor(),
            base: layer_set_export(&scene.base().set),
            properties: scene
                .properties()
                .map(|(atom, layer)| (atom, layer_set_export(&layer.set)))
                .collect(),
        };

        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Alleen de tetraëderposities, voor een goedkope update na een
    /// factorwijziging.
    #[wasm_bindgen]
    pub fn get_tetrahedra(&self) -> Result<JsValue, JsValue> {
        let scene = match self.scene.as_ref() {
            Some(scene) => scene,
            None => return Err(js_error("er is geen model geladen")),
        };

        let export = TetrahedraExport {
            base: &scene.base().set.tetrahedra.positions,
            properties: scene
                .properties()
                .map(|(atom, layer)| (atom, layer.set.tetrahedra.positions.as_slice()))
                .collect(),
        };

        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Stel de verkleiningsfactor in; herschrijft uitsluitend de
    /// tetraëderbuffers, in situ.
    #[wasm_bindgen]
    pub fn set_shrink_factor(&mut self, factor: f64) -> Result<(), JsValue> {
        if !factor.is_finite() {
            return Err(js_error("verkleiningsfactor moet een eindig getal zijn"));
        }

        let scene = match self.scene.as_mut() {
            Some(scene) => scene,
            None => return Err(js_error("er is geen model geladen")),
        };

        scene.set_shrink_factor(factor);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn get_shrink_factor(&self) -> Result<f64, JsValue> {
        match self.scene.as_ref() {
            Some(scene) => Ok(scene.shrink_factor()),
            None => Err(js_error("er is geen model geladen")),
        }
    }
}

impl Engine {
    /// Toegang tot de geladen scène voor native consumenten (tests, CLI).
    #[must_use]
    pub fn scene(&self) -> Option<&SceneData> {
        self.scene.as_ref()
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
