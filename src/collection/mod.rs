//! Postman collection loading and the request model.
mod document;
mod loader;
mod model;
mod template;
mod url;


pub use loader::Collection;
pub use model::{AuthSpec, FormPart, FormPartKind, RequestBody, RequestItem};
pub use template::render_template;
pub use url::{QueryParam, UrlSpec, has_empty_authority, is_absolute, join_url};
