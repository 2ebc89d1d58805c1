pub mod field;
pub mod object;
pub mod release;
pub mod union;
pub mod variant;

pub use object::RawObject;
pub use release::RawRelease;
pub use union::RawUnion;
