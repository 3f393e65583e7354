pub mod directions;
pub mod google;
pub mod http_handlers;
