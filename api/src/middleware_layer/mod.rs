pub mod json_extractor;
pub mod options_body;
