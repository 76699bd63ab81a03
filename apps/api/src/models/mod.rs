pub mod occupation;
pub mod scenario;
