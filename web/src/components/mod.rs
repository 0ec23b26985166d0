pub mod footer;
pub mod header;
pub mod plant_card;
pub mod plant_form;
pub mod plant_gallery;
