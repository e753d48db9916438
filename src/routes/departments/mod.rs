mod handlers;
mod types;

pub use handlers::{
    create_department, delete_department, get_department, list_departments, update_department,
};
pub use types::{DepartmentRequest, DepartmentResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_department, __path_delete_department, __path_get_department,
    __path_list_departments, __path_update_department,
};
