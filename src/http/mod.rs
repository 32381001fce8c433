pub mod request;
pub mod response;

pub use request::{Request, RequestBuilder};
pub use response::{EventStream, Response};
