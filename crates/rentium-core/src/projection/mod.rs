pub mod horizon;

pub use horizon::{project, Projection, ProjectionRow};
