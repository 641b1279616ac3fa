pub mod builder;
pub mod client;
pub mod errors;
pub mod models;
pub mod transport;

pub use builder::*;
pub use client::*;
pub use errors::*;
pub use models::*;
pub use transport::*;

pub mod prelude {
    pub use crate::builder::*;
    pub use crate::client::*;
    pub use crate::errors::*;
    pub use crate::models::*;
    pub use crate::transport::*;
}
