//! Client for the Pixelbin platform REST API.
//!
//! ```no_run
//! use pixelbin_core::platform::{ListFilesQuery, PixelbinClient, PixelbinConfig};
//!
//! let client = PixelbinClient::new(PixelbinConfig::new("api-secret", "https://api.pixelbin.io"));
//! let files = client.assets.list_files(&ListFilesQuery::default())?;
//! # Ok::<(), pixelbin_core::Error>(())
//! ```

mod api_client;
mod assets;
mod client;
mod enums;
mod models;
mod organization;
mod paginator;

pub use api_client::{ApiClient, PixelbinConfig};
pub use assets::Assets;
pub use client::PixelbinClient;
pub use enums::Access;
pub use models::*;
pub use organization::Organization;
pub use paginator::FilesPaginator;
