pub mod _id;
pub mod list;
