pub mod store_text_request;
pub mod store_text_route;
