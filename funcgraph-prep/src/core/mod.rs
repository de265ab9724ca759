pub mod normalize;
pub mod signature;
pub mod summary;
