pub mod algorithm_selector;
pub mod password_service;
