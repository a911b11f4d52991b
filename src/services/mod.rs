pub mod asset_service;
pub mod auth_service;
pub mod document_service;
pub mod people_service;
pub mod report_service;
pub mod request_service;
