pub mod body_scan;
pub mod body_type;
pub mod brand;
pub mod measurement;
pub mod profile;
pub mod recommendation;
pub mod wardrobe;
