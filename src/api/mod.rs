pub mod reproject;

pub use reproject::{Datum, Reprojection};
