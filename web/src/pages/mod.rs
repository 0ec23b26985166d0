pub mod adoption;
pub mod adoption_success;
pub mod catalog;
pub mod catalog_admin;
pub mod contact;
pub mod home;
pub mod login;
pub mod profile;
pub mod publications;
pub mod signup;
