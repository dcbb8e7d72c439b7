pub mod catalog;
pub mod colors;
pub mod media;
pub mod mobiles;
pub mod slug;
pub mod specs;
