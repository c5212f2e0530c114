/// Server services
pub mod upstream;

pub use upstream::{AudioUpstream, DriveUpstream};
