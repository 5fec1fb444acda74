pub mod api_error;
pub mod list_response;
pub mod media;
pub mod numeric;
pub mod ranking;
pub mod validation;
