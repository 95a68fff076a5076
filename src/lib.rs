// Public library interface for sectormap
// The binaries drive the same modules the dashboard front end consumes.

pub mod dashboard;
pub mod format;
pub mod index;
pub mod layout;
pub mod loader;
pub mod model;
pub mod rank;
pub mod render;
pub mod stats;
