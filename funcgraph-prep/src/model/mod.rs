pub mod descriptor;
pub mod index;
pub mod record;
pub mod span;
