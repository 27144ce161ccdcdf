pub mod ask;
pub mod root_route;
pub mod store_text;
