pub mod feature;
pub mod io;
pub mod rgb;
pub mod surface;

pub use self::feature::FeatureBatch;
pub use self::rgb::RgbBatch;
pub use self::surface::SurfaceBatch;
