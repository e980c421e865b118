pub(crate) mod categories_model;
pub(crate) mod categories_repository;
pub(crate) mod categories_service;
pub(crate) mod classes_repository;

pub use categories_model::{Category, Class, NewClass};
pub use categories_repository::CategoriesRepository;
pub use categories_service::CategoriesService;
pub use classes_repository::ClassesRepository;
