pub mod http;
pub mod response;
pub mod traits;

pub use http::{Endpoints, HttpTaskApi};
pub use response::error_from_body;
pub use traits::{TaskApi, UserApi};
