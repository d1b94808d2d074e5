pub mod invoice;
pub mod line_item;
