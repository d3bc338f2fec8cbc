//! Professional-identity directory adapters.

mod http_directory;
mod mock_directory;

pub use http_directory::{HttpIdentityDirectory, HttpIdentityDirectoryConfig};
pub use mock_directory::MockIdentityDirectory;
