pub mod builder;
pub mod calls;
