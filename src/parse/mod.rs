//! Parsers voor de invoerdocumenten van de viewer.

pub mod model_json;
