pub mod campaign;
pub mod company;
pub mod contact;
pub mod email;
pub mod user;
